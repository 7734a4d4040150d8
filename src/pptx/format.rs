//! Format types for PPTX presentations.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

/// Image format types a picture shape can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Get the MIME type for this image format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Get the file extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Detect image format from its magic number.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        const SIGNATURES: [(&[u8], ImageFormat); 6] = [
            (&[0x89, b'P', b'N', b'G'], ImageFormat::Png),
            (&[0xFF, 0xD8, 0xFF], ImageFormat::Jpeg),
            (b"GIF8", ImageFormat::Gif),
            (b"BM", ImageFormat::Bmp),
            (&[b'I', b'I', 0x2A, 0x00], ImageFormat::Tiff),
            (&[b'M', b'M', 0x00, 0x2A], ImageFormat::Tiff),
        ];

        if bytes.len() < 4 {
            return None;
        }
        SIGNATURES
            .iter()
            .find(|(magic, _)| bytes.starts_with(magic))
            .map(|&(_, format)| format)
    }
}

/// Encoded image bytes shared between every picture shape that shows them.
///
/// Cloning is cheap; the bytes are reference counted. Two `ImageData` values
/// with the same content end up in one media part when the package is saved.
#[derive(Debug, Clone)]
pub struct ImageData {
    bytes: Arc<[u8]>,
    format: ImageFormat,
}

impl ImageData {
    /// Wrap encoded bytes, rejecting anything that is not a known image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::detect_from_bytes(&bytes)
            .ok_or_else(|| Error::InvalidFormat("Unknown image format".to_string()))?;
        Ok(Self {
            bytes: bytes.into(),
            format,
        })
    }

    /// Read an image file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(bytes).map_err(|e| match e {
            Error::InvalidFormat(msg) => {
                Error::InvalidFormat(format!("{}: {}", path.display(), msg))
            },
            other => other,
        })
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// SHA-256 of the encoded bytes, used to share one media part.
    pub fn digest(&self) -> Vec<u8> {
        Sha256::digest(&self.bytes).to_vec()
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `algn` attribute on `<a:pPr>`.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }

    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "l" => Some(Self::Left),
            "ctr" => Some(Self::Center),
            "r" => Some(Self::Right),
            "just" => Some(Self::Justify),
            _ => None,
        }
    }
}
