//! CamGrab Capture Engine
//!
//! Exposes a logical video-capture source over a platform backend: it
//! enumerates capture devices, negotiates the native format closest to a
//! requested resolution, pulls raw frames one at a time, converts them to
//! a caller-chosen pixel encoding, and hands out each converted frame
//! through a strict lock/unlock window.
//!
//! # Architecture
//!
//! ```text
//! caller ──▶ CaptureHandle ──▶ CaptureSession ──▶ ColorConverter
//!                │                  │                  │
//!                ▼                  ▼                  ▼
//!          DeviceRegistry      DeviceStream      FrameTransform
//!          (backend probe)     (native frames)   (pixel reformat)
//! ```
//!
//! Device access and pixel reformatting live behind the capability traits
//! in `camgrab-platform-core`; this crate owns negotiation, the session
//! lifecycle, and the frame lock protocol.

pub mod convert;
pub mod handle;
pub mod negotiate;
pub mod registry;
pub mod session;

#[cfg(test)]
mod testutil;

pub use convert::ColorConverter;
pub use handle::{list_devices, list_resolutions, open_capture, CaptureHandle};
pub use negotiate::select_format;
pub use registry::DeviceRegistry;
pub use session::CaptureSession;
