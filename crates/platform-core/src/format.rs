//! Capture format data model.

use std::fmt;
use std::str::FromStr;

use camgrab_common::error::CamgrabError;
use serde::{Deserialize, Serialize};

/// A frame resolution in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count. Resolution listings deduplicate and sort by this.
    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Caller-facing output pixel encodings.
///
/// `Unknown` is never a valid capture request; it exists so callers can
/// represent "not negotiated yet" and always fails negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PixelEncoding {
    #[default]
    Unknown,
    /// Planar YUV 4:2:0 — full-resolution luma plane followed by two
    /// quarter-resolution chroma planes.
    I420,
    /// Packed RGB, 3 bytes per pixel.
    Rgb24,
    /// Packed RGB with alpha, 4 bytes per pixel.
    Rgba32,
}

impl PixelEncoding {
    /// Byte size of one converted frame at the given resolution.
    ///
    /// Returns `None` for `Unknown`, which has no defined layout.
    pub fn frame_bytes(self, width: u32, height: u32) -> Option<usize> {
        let pixels = width as usize * height as usize;
        match self {
            Self::Unknown => None,
            Self::I420 => Some(pixels + (pixels / 4) * 2),
            Self::Rgb24 => Some(pixels * 3),
            Self::Rgba32 => Some(pixels * 4),
        }
    }
}

impl fmt::Display for PixelEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::I420 => "i420",
            Self::Rgb24 => "rgb24",
            Self::Rgba32 => "rgba32",
        };
        f.write_str(name)
    }
}

impl FromStr for PixelEncoding {
    type Err = CamgrabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i420" => Ok(Self::I420),
            "rgb24" => Ok(Self::Rgb24),
            "rgba32" => Ok(Self::Rgba32),
            other => Err(CamgrabError::invalid_argument(format!(
                "Unknown pixel encoding '{other}' (expected i420, rgb24, or rgba32)"
            ))),
        }
    }
}

/// Opaque identifier of a device-native codec, FourCC style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecId(pub [u8; 4]);

impl CodecId {
    pub const RGB24: CodecId = CodecId(*b"RGB3");
    pub const RGB32: CodecId = CodecId(*b"RGB4");
    pub const I420: CodecId = CodecId(*b"I420");
    pub const NV12: CodecId = CodecId(*b"NV12");
    pub const YUY2: CodecId = CodecId(*b"YUY2");
    pub const MJPG: CodecId = CodecId(*b"MJPG");
    pub const H264: CodecId = CodecId(*b"H264");

    /// Whether frames in this codec carry a compressed bitstream.
    ///
    /// Resolved from a fixed table of known identifiers. Codecs not in the
    /// table are treated as compressed.
    pub fn is_compressed(self) -> bool {
        !matches!(
            self,
            Self::RGB24 | Self::RGB32 | Self::I420 | Self::NV12 | Self::YUY2
        )
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            let c = if byte.is_ascii_graphic() {
                byte as char
            } else {
                '?'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// One entry from a device's advertised capability list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeFormat {
    pub width: u32,
    pub height: u32,
    pub codec: CodecId,
    /// Structural compressed-ness of `codec`, fixed at enumeration time.
    pub compressed: bool,
    /// Advertised frame rate in frames per second, 0 when the device does
    /// not report one. Negotiation ignores it.
    pub frame_rate: u32,
}

impl NativeFormat {
    /// Build an entry, resolving the compressed flag from the codec table.
    pub fn new(width: u32, height: u32, codec: CodecId, frame_rate: u32) -> Self {
        Self {
            width,
            height,
            codec,
            compressed: codec.is_compressed(),
            frame_rate,
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

impl fmt::Display for NativeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {} @ {}fps",
            self.width, self.height, self.codec, self.frame_rate
        )
    }
}
