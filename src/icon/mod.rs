use image::{DynamicImage, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to decode icon image: {message}")]
    Decode { message: String },
    #[error("icon buffer length does not match {width}x{height} RGBA dimensions")]
    BufferMismatch { width: u32, height: u32 },
}

pub type IconResult<T> = std::result::Result<T, IconError>;

/// Decoded pixels of a media server's icon.
///
/// Owned by the caller and read-only to the resolution pipeline. A degenerate
/// icon (zero-sized or fully transparent) is a valid value and analyzes to an
/// empty palette.
#[derive(Debug, Clone)]
pub struct ServerIcon {
    pixels: RgbaImage,
}

impl ServerIcon {
    /// Decode from encoded bytes as downloaded by the discovery layer.
    pub fn from_bytes(bytes: &[u8]) -> IconResult<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|err| IconError::Decode {
            message: err.to_string(),
        })?;
        Ok(Self::from_image(&decoded))
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
        }
    }

    /// Wrap a raw RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> IconResult<Self> {
        let pixels = RgbaImage::from_raw(width, height, data)
            .ok_or(IconError::BufferMismatch { width, height })?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    pub(crate) fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl From<RgbaImage> for ServerIcon {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}
