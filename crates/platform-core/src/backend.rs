//! Backend capability traits.
//!
//! A platform backend owns device access and pixel reformatting; the
//! capture engine only calls these contracts. Implementations wrap an OS
//! media subsystem (Media Foundation, V4L2, AVFoundation) or the bundled
//! simulation backend.

use camgrab_common::error::CamgrabResult;

use crate::format::{NativeFormat, PixelEncoding};

/// One raw frame as delivered by a device stream.
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    /// Frame payload in the stream's native codec.
    pub bytes: Vec<u8>,

    /// Device timestamp in microseconds, 0 if the backend does not stamp
    /// frames. The engine passes it through without interpreting it.
    pub timestamp_us: u64,
}

/// Abstract interface for a platform capture backend.
pub trait CaptureBackend: Send + Sync {
    /// Start the media subsystem if needed and enumerate capture devices.
    ///
    /// Every call performs a fresh probe; callers that want a stable view
    /// hold on to the returned handles.
    fn probe(&self) -> CamgrabResult<Vec<Box<dyn DeviceHandle>>>;

    /// Bind the platform conversion engine to one (native, output) pair.
    ///
    /// Fails when the engine does not support the combination.
    fn new_transform(
        &self,
        input: &NativeFormat,
        output: PixelEncoding,
    ) -> CamgrabResult<Box<dyn FrameTransform>>;
}

/// An enumerated capture device that has not been activated yet.
///
/// The registry owns handles for its lifetime; sessions borrow one only
/// long enough to activate it.
pub trait DeviceHandle: Send + Sync {
    /// Human-readable device name.
    fn name(&self) -> CamgrabResult<String>;

    /// The device's advertised native formats.
    fn formats(&self) -> CamgrabResult<Vec<NativeFormat>>;

    /// Activate the device connection at one native format.
    fn activate(&self, format: &NativeFormat) -> CamgrabResult<Box<dyn DeviceStream>>;
}

/// An activated device connection.
///
/// Dropping the stream releases the connection.
pub trait DeviceStream: Send {
    /// Pull the next available native frame, blocking on the device queue.
    ///
    /// `Ok(None)` means no frame is available this cycle (stalled or
    /// momentarily disconnected device), not a stream failure.
    fn pull_frame(&mut self) -> CamgrabResult<Option<RawFrame>>;
}

/// One bound instance of the platform color-conversion engine.
pub trait FrameTransform: Send {
    /// Required output buffer size in bytes.
    fn output_len(&self) -> usize;

    /// Convert one native frame into `output`.
    ///
    /// `output` is exactly `output_len()` bytes and owned by the caller.
    fn run(&mut self, input: &RawFrame, output: &mut [u8]) -> CamgrabResult<()>;
}
