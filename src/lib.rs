#![deny(trivial_casts)]
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    missing_docs,
    missing_debug_implementations,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]

//!
//! A small pixel art editor engine.
//!
//! The canvas is a fixed 16x16 grid of RGBA cells that is edited with a pencil and a rectangle tool through
//! pointer events and can be exported to and imported from PNG images at one image pixel per cell.
//! Rendering, feedback cues and file handling are left to collaborators plugged in via [`sinks`].
//!

pub mod codec;
pub mod editor;
pub mod file_name;
pub mod mapping;
pub mod pixmap;
pub mod raster;
pub mod sinks;
#[cfg_attr(not(feature = "windowing"), allow(dead_code))]
mod texts;
pub mod tools;

pub use editor::{Editor, ExportedImage, ImportTicket};
