//!
//! Conversion of a [`Pixmap`] from and to image files
//!
//! Images map 1:1 onto the grid: one image pixel per cell, row-major, with all four channels kept as they are.
//!

use crate::pixmap::{Color, InvalidSizeError, Pixmap};
use image::{ImageError, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// Reasons why an image could not be imported
///
/// A failed import never touches the canvas.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file picker reported a type that is not an image
    #[error("The selected file has type {mime:?} which is not an image")]
    NotAnImage {
        /// the type hint that was given
        mime: String,
    },
    /// The data is not a readable raster image
    #[error("The selected file could not be read as an image: {0}")]
    Decode(#[from] image::ImageError),
    /// The image does not have exactly the dimensions of the canvas
    #[error("The image is {width}x{height} pixels but only {expected}x{expected} images can be imported")]
    SizeMismatch {
        /// the canvas dimension
        expected: usize,
        /// actual image width
        width: u32,
        /// actual image height
        height: u32,
    },
    /// The canvas cannot hold the decoded image
    #[error(transparent)]
    InvalidCanvas(#[from] InvalidSizeError),
    /// Another import was started before and has not finished yet
    #[error("Another image is still being imported")]
    Busy,
    /// The import was completed with a ticket that does not belong to the running import
    #[error("The import was already finished or belongs to a different canvas")]
    StaleTicket,
    /// Decoding was aborted before it produced a result
    #[error("The import was interrupted: {0}")]
    Interrupted(String),
}

/// Reasons why the canvas could not be exported
#[derive(Debug, Error)]
pub enum ExportError {
    /// The encoder failed
    #[error("The image could not be encoded as PNG: {0}")]
    Encode(#[from] image::ImageError),
    /// The canvas is larger than an image can be
    #[error("A canvas of {width}x{height} cells cannot be stored as an image")]
    TooLarge {
        /// canvas width
        width: usize,
        /// canvas height
        height: usize,
    },
}

/// Check the type hint of a file before reading it
pub fn ensure_image_mime(mime: &str) -> Result<(), ImportError> {
    if mime.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(ImportError::NotAnImage {
            mime: mime.to_string(),
        })
    }
}

/// Encode the pixmap as PNG image with one pixel per cell
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let (width, height) = pixmap.get_size();
    let too_large = || ExportError::TooLarge { width, height };
    let img_width = u32::try_from(width).map_err(|_| too_large())?;
    let img_height = u32::try_from(height).map_err(|_| too_large())?;

    let raw = pixmap
        .get_color_data()
        .iter()
        .flat_map(|c| <[u8; 4]>::from(*c))
        .collect::<Vec<_>>();
    let img = RgbaImage::from_raw(img_width, img_height, raw).ok_or_else(too_large)?;

    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;
    tracing::debug!("Encoded {width}x{height} canvas into {}B of PNG data", png_bytes.len());
    Ok(png_bytes)
}

/// Decode an image into a new `expected_dim`x`expected_dim` pixmap
///
/// Any raster format understood by the `image` crate is accepted, PNG being what [`encode_png`] produces.
/// The dimensions are read from the image header and checked before any pixel data is decoded.
pub fn decode_png(data: &[u8], expected_dim: usize) -> Result<Pixmap, ImportError> {
    let reader = || ImageReader::new(Cursor::new(data)).with_guessed_format().map_err(ImageError::IoError);

    let (width, height) = reader()?.into_dimensions()?;
    if width as usize != expected_dim || height as usize != expected_dim {
        tracing::debug!("Rejecting {width}x{height} image for a {expected_dim}x{expected_dim} canvas");
        return Err(ImportError::SizeMismatch {
            expected: expected_dim,
            width,
            height,
        });
    }

    let img = reader()?.decode()?;
    let colors = img.to_rgba8().pixels().map(|px| Color::from(*px)).collect();
    Ok(Pixmap::from_raw(expected_dim, expected_dim, colors)?)
}
