//! Device registry: an enumeration snapshot over a platform backend.

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{CaptureBackend, DeviceHandle, NativeFormat};

/// The devices a backend reported at probe time.
///
/// Construction runs the full subsystem probe; separate registries are
/// independent and each pays that cost again.
pub struct DeviceRegistry {
    devices: Vec<Box<dyn DeviceHandle>>,
}

impl DeviceRegistry {
    /// Probe the backend and take ownership of the enumerated devices.
    pub fn probe(backend: &dyn CaptureBackend) -> CamgrabResult<Self> {
        let devices = backend.probe()?;
        tracing::debug!(count = devices.len(), "Probed capture devices");
        Ok(Self { devices })
    }

    pub fn count(&self) -> u32 {
        self.devices.len() as u32
    }

    /// Borrow one enumerated device.
    pub fn device(&self, index: u32) -> CamgrabResult<&dyn DeviceHandle> {
        self.devices
            .get(index as usize)
            .map(|device| device.as_ref())
            .ok_or_else(|| CamgrabError::out_of_range(index, self.count()))
    }

    /// Human-readable name of one device.
    pub fn name(&self, index: u32) -> CamgrabResult<String> {
        self.device(index)?.name()
    }

    /// Advertised native formats of one device.
    ///
    /// A device whose underlying format query fails yields an empty list,
    /// not an error: callers treat "no formats" as "cannot negotiate".
    pub fn formats(&self, index: u32) -> CamgrabResult<Vec<NativeFormat>> {
        let device = self.device(index)?;
        match device.formats() {
            Ok(formats) => Ok(formats),
            Err(e) => {
                tracing::warn!(index, error = %e, "Format query failed; treating device as formatless");
                Ok(Vec::new())
            }
        }
    }

    /// Device names in enumeration order.
    ///
    /// Stops at the first device whose name query fails, so the returned
    /// indices stay aligned with the registry's.
    pub fn device_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.devices.len());
        for (index, device) in self.devices.iter().enumerate() {
            match device.name() {
                Ok(name) => names.push(name),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Device name query failed; truncating listing");
                    break;
                }
            }
        }
        names
    }
}
