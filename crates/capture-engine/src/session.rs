//! Capture session lifecycle.

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{
    CaptureBackend, DeviceHandle, DeviceStream, NativeFormat, PixelEncoding,
};

use crate::convert::ColorConverter;

/// One live capture pipeline: an activated device connection feeding a
/// color converter.
///
/// The native format is fixed at open; there is no renegotiation. All
/// entry points take `&mut self`, so a teardown racing an outstanding
/// frame view is unrepresentable, and a locked view borrows the session
/// until it is dropped.
pub struct CaptureSession {
    // Declared before the stream so teardown drops the converter first; a
    // transform outliving its device connection is undefined.
    converter: ColorConverter,
    stream: Box<dyn DeviceStream>,
    format: NativeFormat,
    encoding: PixelEncoding,
    frame_bytes: usize,
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("converter", &self.converter)
            .field("format", &self.format)
            .field("encoding", &self.encoding)
            .field("frame_bytes", &self.frame_bytes)
            .finish()
    }
}

impl CaptureSession {
    /// Activate `device` at `format` and bind a converter to `encoding`.
    ///
    /// Acquisition is staged: stream, converter, then one priming pull so
    /// the session is readable immediately after open. Every stage is an
    /// owned value, so a failure at any point drops the partial state in
    /// reverse acquisition order before this returns.
    pub fn open(
        backend: &dyn CaptureBackend,
        device: &dyn DeviceHandle,
        format: NativeFormat,
        encoding: PixelEncoding,
    ) -> CamgrabResult<Self> {
        if format.width == 0 || format.height == 0 {
            return Err(CamgrabError::negotiation(
                "cannot open a session with a zero-area format",
            ));
        }
        let frame_bytes = encoding
            .frame_bytes(format.width, format.height)
            .ok_or_else(|| {
                CamgrabError::invalid_argument(
                    "cannot open a session with an unknown output encoding",
                )
            })?;

        let stream = device
            .activate(&format)
            .map_err(|e| CamgrabError::acquisition(format!("Device activation failed: {e}")))?;
        let converter = ColorConverter::new(backend, &format, encoding)?;

        let mut session = Self {
            converter,
            stream,
            format,
            encoding,
            frame_bytes,
        };
        session.prime()?;

        tracing::debug!(
            format = %session.format,
            %encoding,
            frame_bytes,
            "Capture session opened"
        );
        Ok(session)
    }

    /// Pull and convert one frame so the first lock sees defined content.
    fn prime(&mut self) -> CamgrabResult<()> {
        match self.stream.pull_frame()? {
            Some(frame) => self.converter.convert(&frame),
            None => {
                tracing::debug!("No frame available during priming pull");
                Ok(())
            }
        }
    }

    /// Pull the next native frame, convert it, and return the locked view.
    ///
    /// `Ok(None)` means no frame was available this cycle; the session
    /// stays usable and the caller may simply try again later.
    pub fn pull_and_lock(&mut self) -> CamgrabResult<Option<&[u8]>> {
        let Some(frame) = self.stream.pull_frame()? else {
            return Ok(None);
        };
        self.converter.convert(&frame)?;
        self.converter.lock().map(Some)
    }

    /// Release the view returned by [`pull_and_lock`](Self::pull_and_lock).
    pub fn release_lock(&mut self) -> CamgrabResult<()> {
        self.converter.unlock()
    }

    /// The native format selected at open.
    pub fn native_format(&self) -> NativeFormat {
        self.format
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    /// Byte size of one converted frame.
    pub fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }
}
