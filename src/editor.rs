//!
//! The editor as seen from its front end: tools plus import and export of the canvas
//!

use crate::codec::{self, ExportError, ImportError};
use crate::file_name::sanitize_file_name;
use crate::mapping::CellMapper;
use crate::pixmap::{Pixmap, GRID_DIM};
use crate::sinks::Feedback;
use crate::tools::{EditorState, PointerEvent, ToolController};
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket ids are unique within the process so that a ticket cannot be completed on another editor
static NEXT_TICKET: AtomicU64 = AtomicU64::new(0);

/// An encoded canvas together with the name it should be saved under
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExportedImage {
    /// sanitized file name, always ending in `.png`
    pub file_name: String,
    /// PNG data
    pub data: Bytes,
}

/// Proof that an import was started and may now be completed
///
/// Only one ticket per editor exists at a time. It must be handed back to [`Editor::complete_import`] or
/// [`Editor::abandon_import`], otherwise the editor keeps rejecting new imports.
#[derive(Debug)]
#[must_use]
pub struct ImportTicket {
    id: u64,
}

/// A pixel art editor with a fixed `GRID_DIM`x`GRID_DIM` canvas
#[derive(Debug)]
pub struct Editor {
    tools: ToolController,
    pending_import: Option<u64>,
}

impl Editor {
    /// Create an editor around an existing tool controller
    pub fn new(tools: ToolController) -> Self {
        Self {
            tools,
            pending_import: None,
        }
    }

    /// Create an editor with a blank canvas drawn at `origin` with square cells of `cell_size`
    pub fn blank(origin: (f32, f32), cell_size: f32) -> anyhow::Result<Self> {
        let mapper = CellMapper::new(origin, cell_size, GRID_DIM)?;
        Ok(Self::new(ToolController::new(EditorState::new()?, mapper)?))
    }

    /// The tools and the canvas they edit
    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    /// Mutable access to the tools, e.g. to switch tool or color
    pub fn tools_mut(&mut self) -> &mut ToolController {
        &mut self.tools
    }

    /// The canvas
    pub fn pixmap(&self) -> &Pixmap {
        self.tools.pixmap()
    }

    /// Feed a pointer event to the tools
    pub fn handle(&mut self, event: PointerEvent, feedback: &mut dyn Feedback) {
        self.tools.handle(event, feedback)
    }

    /// Encode the canvas for saving under a sanitized version of `requested_name`
    ///
    /// Exporting only reads the canvas.
    pub fn export(&self, requested_name: &str) -> Result<ExportedImage, ExportError> {
        let data = codec::encode_png(self.pixmap())?;
        let file_name = sanitize_file_name(requested_name);
        tracing::info!("Exported canvas as {file_name}");
        Ok(ExportedImage {
            file_name,
            data: Bytes::from(data),
        })
    }

    /// Whether an import has been started and not yet completed
    pub fn is_importing(&self) -> bool {
        self.pending_import.is_some()
    }

    /// Start importing a file of type `mime`
    ///
    /// Files that are not images are rejected right away.
    /// While another import is running new ones are rejected with [`ImportError::Busy`].
    pub fn begin_import(&mut self, mime: &str) -> Result<ImportTicket, ImportError> {
        codec::ensure_image_mime(mime)?;
        if self.pending_import.is_some() {
            tracing::warn!("Rejecting import of {mime} because another import is still running");
            return Err(ImportError::Busy);
        }
        let id = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.pending_import = Some(id);
        tracing::debug!("Started import #{id} of {mime}");
        Ok(ImportTicket { id })
    }

    /// Finish an import with the result of decoding it
    ///
    /// On success the whole canvas is replaced at once; on failure it is left exactly as it was.
    pub fn complete_import(
        &mut self,
        ticket: ImportTicket,
        decoded: Result<Pixmap, ImportError>,
    ) -> Result<(), ImportError> {
        if self.pending_import != Some(ticket.id) {
            return Err(ImportError::StaleTicket);
        }
        self.pending_import = None;

        match decoded.and_then(|pixmap| Ok(self.tools.replace_pixmap(pixmap)?)) {
            Ok(()) => {
                tracing::info!("Import #{} replaced the canvas", ticket.id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Import #{} failed: {e}", ticket.id);
                Err(e)
            }
        }
    }

    /// Give up on a started import without touching the canvas
    pub fn abandon_import(&mut self, ticket: ImportTicket) {
        if self.pending_import == Some(ticket.id) {
            tracing::debug!("Abandoned import #{}", ticket.id);
            self.pending_import = None;
        }
    }

    /// Import an image file of type `mime` whose content is `data`
    ///
    /// Decoding happens on the blocking thread pool of the runtime.
    /// The editor stays borrowed until decoding has finished, so pointer events cannot be handled in the
    /// meantime.
    /// Front ends that need to stay interactive should call [`Editor::begin_import`], decode with
    /// [`codec::decode_png`] themselves and hand the result to [`Editor::complete_import`].
    ///
    /// Dropping the returned future before it finished abandons the import.
    pub async fn import(&mut self, data: Bytes, mime: &str) -> Result<(), ImportError> {
        let ticket = self.begin_import(mime)?;
        let pending = PendingImport {
            editor: self,
            ticket: Some(ticket),
        };
        let decoded = tokio::task::spawn_blocking(move || codec::decode_png(&data, GRID_DIM))
            .await
            .unwrap_or_else(|e| Err(ImportError::Interrupted(e.to_string())));
        pending.complete(decoded)
    }
}

/// An import that is abandoned when dropped before being completed
#[derive(Debug)]
struct PendingImport<'a> {
    editor: &'a mut Editor,
    ticket: Option<ImportTicket>,
}

impl PendingImport<'_> {
    fn complete(mut self, decoded: Result<Pixmap, ImportError>) -> Result<(), ImportError> {
        match self.ticket.take() {
            Some(ticket) => self.editor.complete_import(ticket, decoded),
            None => Err(ImportError::StaleTicket),
        }
    }
}

impl Drop for PendingImport<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            tracing::debug!("Import #{} was cancelled", ticket.id);
            self.editor.abandon_import(ticket);
        }
    }
}
