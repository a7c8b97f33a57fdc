//! Color conversion with a strict lock/unlock window.

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{CaptureBackend, FrameTransform, NativeFormat, PixelEncoding, RawFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConvertState {
    /// No frame has been converted yet, or the last conversion failed.
    Empty,
    /// A converted frame is available in the output buffer.
    Ready,
    /// The converted frame is exposed through an outstanding lock.
    Locked,
}

/// Converts native frames into one fixed output encoding and exposes each
/// result through a lock/unlock window over an internally owned buffer.
///
/// The (native, output) binding is fixed at construction for the
/// converter's lifetime.
pub struct ColorConverter {
    transform: Box<dyn FrameTransform>,
    output: Vec<u8>,
    state: ConvertState,
}

impl std::fmt::Debug for ColorConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorConverter")
            .field("output_len", &self.output.len())
            .field("state", &self.state)
            .finish()
    }
}

impl ColorConverter {
    /// Bind the backend conversion engine to one (native, output) pair and
    /// allocate the output buffer at the engine-reported size.
    pub fn new(
        backend: &dyn CaptureBackend,
        input: &NativeFormat,
        output: PixelEncoding,
    ) -> CamgrabResult<Self> {
        let transform = backend.new_transform(input, output).map_err(|e| {
            CamgrabError::acquisition(format!(
                "Conversion engine rejected {} -> {output}: {e}",
                input.codec
            ))
        })?;
        let output_buf = vec![0u8; transform.output_len()];

        Ok(Self {
            transform,
            output: output_buf,
            state: ConvertState::Empty,
        })
    }

    /// Feed one native frame through the conversion engine.
    ///
    /// The output buffer must not mutate under a live view, so calling
    /// this while a lock is outstanding is a usage error. An engine
    /// failure is a recoverable per-call error; the partial frame is
    /// discarded and can never be locked.
    pub fn convert(&mut self, frame: &RawFrame) -> CamgrabResult<()> {
        if self.state == ConvertState::Locked {
            return Err(CamgrabError::usage(
                "convert called while the previous frame view is still locked",
            ));
        }

        if let Err(e) = self.transform.run(frame, &mut self.output) {
            self.state = ConvertState::Empty;
            return Err(CamgrabError::conversion(e.to_string()));
        }

        self.state = ConvertState::Ready;
        Ok(())
    }

    /// Expose the most recently converted frame for read-only inspection.
    ///
    /// Valid only after a successful [`convert`](Self::convert), and only
    /// once per convert/unlock cycle.
    pub fn lock(&mut self) -> CamgrabResult<&[u8]> {
        match self.state {
            ConvertState::Empty => Err(CamgrabError::usage(
                "lock called before any frame was converted",
            )),
            ConvertState::Locked => Err(CamgrabError::usage(
                "lock called while a frame view is already locked",
            )),
            ConvertState::Ready => {
                self.state = ConvertState::Locked;
                Ok(&self.output)
            }
        }
    }

    /// Release the outstanding frame view.
    pub fn unlock(&mut self) -> CamgrabResult<()> {
        if self.state != ConvertState::Locked {
            return Err(CamgrabError::usage(
                "unlock called without an outstanding lock",
            ));
        }
        self.state = ConvertState::Ready;
        Ok(())
    }

    /// Byte size of one converted frame.
    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    pub fn is_locked(&self) -> bool {
        self.state == ConvertState::Locked
    }
}

impl Drop for ColorConverter {
    fn drop(&mut self) {
        // Destroying a locked converter is a programmer error.
        debug_assert!(
            self.state != ConvertState::Locked,
            "converter dropped while a frame view is locked"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockBackend;
    use camgrab_platform_core::CodecId;

    fn converter(backend: &MockBackend) -> ColorConverter {
        let input = NativeFormat::new(4, 2, CodecId::RGB24, 30);
        ColorConverter::new(backend, &input, PixelEncoding::Rgb24).unwrap()
    }

    fn frame() -> RawFrame {
        RawFrame {
            bytes: vec![7; 24],
            timestamp_us: 0,
        }
    }

    #[test]
    fn rejected_pair_is_an_acquisition_error() {
        let mut backend = MockBackend::with_devices(vec![]);
        backend.reject_transforms = true;
        let input = NativeFormat::new(4, 2, CodecId::RGB24, 30);
        let err = ColorConverter::new(&backend, &input, PixelEncoding::Rgb24).unwrap_err();
        assert!(matches!(err, CamgrabError::Acquisition { .. }));
    }

    #[test]
    fn lock_before_any_convert_is_a_usage_error() {
        let backend = MockBackend::with_devices(vec![]);
        let mut converter = converter(&backend);
        assert!(matches!(
            converter.lock(),
            Err(CamgrabError::Usage { .. })
        ));
    }

    #[test]
    fn convert_lock_unlock_cycles() {
        let backend = MockBackend::with_devices(vec![]);
        let mut converter = converter(&backend);

        for _ in 0..3 {
            converter.convert(&frame()).unwrap();
            let view = converter.lock().unwrap();
            assert_eq!(view.len(), 24);
            converter.unlock().unwrap();
        }
    }

    #[test]
    fn double_lock_is_a_usage_error() {
        let backend = MockBackend::with_devices(vec![]);
        let mut converter = converter(&backend);
        converter.convert(&frame()).unwrap();
        converter.lock().unwrap();
        assert!(matches!(converter.lock(), Err(CamgrabError::Usage { .. })));
        converter.unlock().unwrap();
    }

    #[test]
    fn unlock_without_lock_is_a_usage_error() {
        let backend = MockBackend::with_devices(vec![]);
        let mut converter = converter(&backend);
        converter.convert(&frame()).unwrap();
        assert!(matches!(
            converter.unlock(),
            Err(CamgrabError::Usage { .. })
        ));
    }

    #[test]
    fn convert_while_locked_is_a_usage_error() {
        let backend = MockBackend::with_devices(vec![]);
        let mut converter = converter(&backend);
        converter.convert(&frame()).unwrap();
        converter.lock().unwrap();
        assert!(matches!(
            converter.convert(&frame()),
            Err(CamgrabError::Usage { .. })
        ));
        converter.unlock().unwrap();
    }

    #[test]
    fn engine_failure_is_recoverable_and_discards_the_frame() {
        let mut backend = MockBackend::with_devices(vec![]);
        backend.fail_transform_runs = true;
        let mut converter = converter(&backend);

        assert!(matches!(
            converter.convert(&frame()),
            Err(CamgrabError::Conversion { .. })
        ));
        // The partial frame must not be observable.
        assert!(matches!(converter.lock(), Err(CamgrabError::Usage { .. })));
        assert!(!converter.is_locked());
    }
}
