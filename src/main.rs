use clap::Parser;
use pixelsketch::editor::Editor;
use pixelsketch::sinks::pixmap_file::{self, DirectoryTarget, ExportTarget};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::CliOpts::parse();
    init_logger(args.verbose, args.quiet);

    match args.command {
        cli::Command::New(opts) => new_canvas(&opts).await,
        cli::Command::Show(opts) => show(&opts).await,
        #[cfg(feature = "windowing")]
        cli::Command::Edit(opts) => edit(&opts).await,
    }
}

fn init_logger(verbosity: u8, quietness: u8) {
    let level = match 2 + verbosity as i16 - quietness as i16 {
        i16::MIN..=-1 => LevelFilter::OFF,
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        4..=i16::MAX => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

async fn new_canvas(opts: &cli::NewOpts) -> anyhow::Result<()> {
    let editor = Editor::blank((0.0, 0.0), 1.0)?;
    let image = editor.export(&opts.export_opts.name)?;
    let path = DirectoryTarget::new(&opts.export_opts.out_dir).save(&image).await?;
    println!("{}", path.display());
    Ok(())
}

async fn show(opts: &cli::ShowOpts) -> anyhow::Result<()> {
    let (data, mime) = pixmap_file::load_image_file(&opts.path).await?;
    let mut editor = Editor::blank((0.0, 0.0), 1.0)?;
    editor.import(data, mime).await?;

    let (width, _) = editor.pixmap().get_size();
    for row in editor.pixmap().get_color_data().chunks(width) {
        let line = row.iter().map(|c| format!("{c:X}")).collect::<Vec<_>>().join(" ");
        println!("{line}");
    }
    Ok(())
}

#[cfg(feature = "windowing")]
async fn edit(opts: &cli::EditOpts) -> anyhow::Result<()> {
    use pixelsketch::sinks::window::{self, EditorWindowOptions};
    use std::sync::Arc;

    let mut editor = Editor::blank((0.0, 0.0), opts.cell_size as f32)?;
    if let Some(path) = &opts.load {
        let loaded = match pixmap_file::load_image_file(path).await {
            Ok((data, mime)) => editor.import(data, mime).await.map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        if let Err(e) = loaded {
            tracing::warn!("Could not load {}, starting with a blank canvas instead: {e:#}", path.display());
        }
    }

    let options = EditorWindowOptions {
        cell_size: opts.cell_size,
        file_name: opts.export_opts.name.clone(),
        target: Arc::new(DirectoryTarget::new(&opts.export_opts.out_dir)),
    };
    tokio::task::block_in_place(|| window::run(&mut editor, options))
}
