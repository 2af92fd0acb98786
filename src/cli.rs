use clap::{ArgAction, Args, Parser, Subcommand};
use pixelsketch::file_name::DEFAULT_FILE_NAME;
use std::path::PathBuf;

/// Command-Line arguments as a well formatted struct, parsed using clap.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub(crate) struct CliOpts {
    #[command(subcommand)]
    pub command: Command,

    /// Increase program verbosity
    ///
    /// The default verbosity level is INFO.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, default_value = "0")]
    pub verbose: u8,

    /// Decrease program verbosity
    ///
    /// The default verbosity level is INFO.
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, default_value = "0")]
    pub quiet: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Save a blank canvas as PNG
    New(NewOpts),
    /// Import an image and print the resulting canvas as hex encoded RGBA rows
    Show(ShowOpts),
    /// Open an interactive editor window
    #[cfg(feature = "windowing")]
    Edit(EditOpts),
}

/// Options regarding where exported canvases are stored
#[derive(Args, Debug, Clone)]
pub(crate) struct ExportOpts {
    /// Directory into which canvases are saved
    #[arg(long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Name under which the canvas is saved
    ///
    /// Any extension is replaced by ".png" and characters that are not allowed in file names are removed.
    #[arg(long = "name", default_value = DEFAULT_FILE_NAME)]
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct NewOpts {
    #[command(flatten)]
    pub export_opts: ExportOpts,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ShowOpts {
    /// Path to the image that should be imported
    pub path: PathBuf,
}

#[cfg(feature = "windowing")]
#[derive(Args, Debug, Clone)]
pub(crate) struct EditOpts {
    /// An image from which the initial canvas content is loaded
    ///
    /// It must have exactly the dimensions of the canvas, otherwise a blank canvas is used.
    #[arg(long = "load")]
    pub load: Option<PathBuf>,

    /// On-screen size of one cell in pixels
    #[arg(long = "cell-size", default_value = "32")]
    pub cell_size: usize,

    #[command(flatten)]
    pub export_opts: ExportOpts,
}
