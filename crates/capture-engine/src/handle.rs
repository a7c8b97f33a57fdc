//! Public capture façade and entry points.

use std::collections::BTreeMap;

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{CaptureBackend, NativeFormat, PixelEncoding, Resolution};

use crate::negotiate::select_format;
use crate::registry::DeviceRegistry;
use crate::session::CaptureSession;

/// An open capture source bound to one device and one negotiated format.
///
/// Owns exactly one [`CaptureSession`]; dropping the handle tears the
/// session down (converter first, then the device connection).
pub struct CaptureHandle {
    session: CaptureSession,
}

impl std::fmt::Debug for CaptureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("encoding", &self.encoding())
            .finish()
    }
}

impl CaptureHandle {
    /// Pull one fresh frame and return the converted, locked view.
    ///
    /// `Ok(None)` signals that no frame was available this cycle, not a
    /// failed handle; call again later.
    pub fn lock(&mut self) -> CamgrabResult<Option<&[u8]>> {
        self.session.pull_and_lock()
    }

    /// Release the view returned by [`lock`](Self::lock).
    pub fn unlock(&mut self) -> CamgrabResult<()> {
        self.session.release_lock()
    }

    /// Negotiated frame width; may differ from the requested width.
    pub fn width(&self) -> u32 {
        self.session.native_format().width
    }

    /// Negotiated frame height; may differ from the requested height.
    pub fn height(&self) -> u32 {
        self.session.native_format().height
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.session.encoding()
    }

    /// Byte size of one converted frame.
    pub fn frame_bytes(&self) -> usize {
        self.session.frame_bytes()
    }

    /// The full native format the negotiator selected.
    pub fn native_format(&self) -> NativeFormat {
        self.session.native_format()
    }
}

/// Device names in enumeration order.
pub fn list_devices(backend: &dyn CaptureBackend) -> CamgrabResult<Vec<String>> {
    Ok(DeviceRegistry::probe(backend)?.device_names())
}

/// Deduplicated native resolutions for one device, ascending by pixel area.
///
/// Two advertised formats with the same pixel area collapse into a single
/// entry; the first advertised wins. Fails with `OutOfRange` for an
/// invalid device index.
pub fn list_resolutions(
    backend: &dyn CaptureBackend,
    device_index: u32,
) -> CamgrabResult<Vec<Resolution>> {
    let registry = DeviceRegistry::probe(backend)?;

    let mut by_area: BTreeMap<u64, Resolution> = BTreeMap::new();
    for format in registry.formats(device_index)? {
        let resolution = format.resolution();
        by_area.entry(resolution.pixel_area()).or_insert(resolution);
    }

    Ok(by_area.into_values().collect())
}

/// Open a capture source for `(device_index, width, height, encoding)`.
///
/// Negotiates the native format closest to the requested resolution and
/// opens a session against it; the returned handle reports the
/// negotiated geometry, not the requested one. Fails with
/// `InvalidArgument` for the unknown encoding (before any resource is
/// touched), `OutOfRange` for a bad device index, and `Negotiation` when
/// the device advertises no usable formats.
pub fn open_capture(
    backend: &dyn CaptureBackend,
    device_index: u32,
    width: u32,
    height: u32,
    encoding: PixelEncoding,
) -> CamgrabResult<CaptureHandle> {
    if encoding == PixelEncoding::Unknown {
        return Err(CamgrabError::invalid_argument(
            "cannot capture into the unknown encoding",
        ));
    }

    let registry = DeviceRegistry::probe(backend)?;
    let device = registry.device(device_index)?;
    let candidates = registry.formats(device_index)?;

    let requested = Resolution::new(width, height);
    let format = select_format(requested, &candidates).ok_or_else(|| {
        CamgrabError::negotiation(format!(
            "device {device_index} advertises no usable formats"
        ))
    })?;

    tracing::info!(
        device_index,
        requested = %requested,
        negotiated = %format,
        %encoding,
        "Opening capture"
    );

    let session = CaptureSession::open(backend, device, format, encoding)?;
    Ok(CaptureHandle { session })
}
