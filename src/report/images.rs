//! Photo decoding and sizing for embedding into the document.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use image::{GenericImageView, ImageFormat};

/// English Metric Units per inch, the unit DOCX drawings are sized in.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Tallest drawing placed on a page; fits the printable area of a
/// letter page with one-inch margins.
pub const MAX_HEIGHT_IN: f64 = 8.5;

/// A decoded picture re-encoded as PNG and sized for display.
#[derive(Clone, PartialEq)]
pub struct EmbeddedImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub width_emu: u32,
    pub height_emu: u32,
}

impl fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedImage")
            .field("png_len", &self.png.len())
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .field("width_emu", &self.width_emu)
            .field("height_emu", &self.height_emu)
            .finish()
    }
}

impl EmbeddedImage {
    /// Decode PNG or JPEG bytes and size them to `width_in` inches wide,
    /// keeping the aspect ratio. Pictures that would come out taller than
    /// `MAX_HEIGHT_IN` are scaled down to that height instead.
    pub fn decode(bytes: &[u8], width_in: f64) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let (width_px, height_px) = decoded.dimensions();

        let mut png = Vec::new();
        decoded.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let (width_emu, height_emu) = fit_emu(width_px, height_px, width_in);

        Ok(Self {
            png,
            width_px,
            height_px,
            width_emu,
            height_emu,
        })
    }
}

/// Drawing extent in EMU for a `width_px` x `height_px` picture shown
/// `width_in` inches wide, capped at `MAX_HEIGHT_IN` tall.
fn fit_emu(width_px: u32, height_px: u32, width_in: f64) -> (u32, u32) {
    let width_px = u64::from(width_px.max(1));
    let height_px = u64::from(height_px);
    let max_height = (MAX_HEIGHT_IN * EMU_PER_INCH).round() as u64;

    let width_emu = (width_in * EMU_PER_INCH).round() as u64;
    let height_emu = width_emu * height_px / width_px;
    if height_emu <= max_height {
        return (width_emu as u32, height_emu as u32);
    }

    let scaled_width = (max_height * width_px / height_px.max(1)).max(1);
    (scaled_width as u32, max_height as u32)
}

/// Load the letterhead logo. Any failure is logged and yields `None`.
pub fn load_logo(path: &Path, width_in: f64) -> Option<EmbeddedImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Logo not available at {}: {}", path.display(), e);
            return None;
        }
    };

    match EmbeddedImage::decode(&bytes, width_in) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Logo at {} could not be decoded: {}", path.display(), e);
            None
        }
    }
}
