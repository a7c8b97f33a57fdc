//! CamGrab Simulation Backend
//!
//! A synthetic implementation of the platform capability traits: devices
//! that advertise realistic format tables and synthesize a moving test
//! pattern, plus a software conversion engine for raw RGB24 input. The
//! CLI and the integration tests run against it; real OS backends
//! implement the same traits.

pub mod pattern;
pub mod transform;

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{
    CaptureBackend, CodecId, DeviceHandle, DeviceStream, FrameTransform, NativeFormat,
    PixelEncoding, RawFrame,
};

use crate::transform::SimTransform;

/// Configuration of one simulated device.
#[derive(Debug, Clone)]
pub struct SimDeviceSpec {
    pub name: String,
    pub formats: Vec<NativeFormat>,
}

impl SimDeviceSpec {
    /// A webcam-like device: a raw RGB24 resolution ladder plus MJPEG
    /// entries the software engine cannot convert.
    pub fn camera(name: &str) -> Self {
        Self {
            name: name.to_string(),
            formats: vec![
                NativeFormat::new(320, 240, CodecId::RGB24, 30),
                NativeFormat::new(640, 480, CodecId::RGB24, 30),
                NativeFormat::new(800, 600, CodecId::RGB24, 30),
                NativeFormat::new(1280, 720, CodecId::RGB24, 15),
                NativeFormat::new(1280, 720, CodecId::MJPG, 30),
                NativeFormat::new(1920, 1080, CodecId::MJPG, 30),
            ],
        }
    }
}

/// Synthetic capture backend.
pub struct SimBackend {
    devices: Vec<SimDeviceSpec>,
}

impl SimBackend {
    /// Backend with the default pair of simulated cameras.
    pub fn new() -> Self {
        Self::with_devices(vec![
            SimDeviceSpec::camera("Simulated Camera 0"),
            SimDeviceSpec::camera("Simulated Camera 1"),
        ])
    }

    pub fn with_devices(devices: Vec<SimDeviceSpec>) -> Self {
        Self { devices }
    }
}

impl Default for SimBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for SimBackend {
    fn probe(&self) -> CamgrabResult<Vec<Box<dyn DeviceHandle>>> {
        tracing::debug!(count = self.devices.len(), "Probing simulated devices");
        Ok(self
            .devices
            .iter()
            .cloned()
            .map(|spec| Box::new(SimDevice { spec }) as Box<dyn DeviceHandle>)
            .collect())
    }

    fn new_transform(
        &self,
        input: &NativeFormat,
        output: PixelEncoding,
    ) -> CamgrabResult<Box<dyn FrameTransform>> {
        Ok(Box::new(SimTransform::new(input, output)?))
    }
}

struct SimDevice {
    spec: SimDeviceSpec,
}

impl DeviceHandle for SimDevice {
    fn name(&self) -> CamgrabResult<String> {
        Ok(self.spec.name.clone())
    }

    fn formats(&self) -> CamgrabResult<Vec<NativeFormat>> {
        Ok(self.spec.formats.clone())
    }

    fn activate(&self, format: &NativeFormat) -> CamgrabResult<Box<dyn DeviceStream>> {
        if !self.spec.formats.contains(format) {
            return Err(CamgrabError::platform(format!(
                "device '{}' does not advertise {format}",
                self.spec.name
            )));
        }
        tracing::debug!(device = %self.spec.name, %format, "Activating simulated stream");
        Ok(Box::new(SimStream {
            format: *format,
            tick: 0,
        }))
    }
}

/// Synthesizes one test-pattern frame per pull.
struct SimStream {
    format: NativeFormat,
    tick: u64,
}

impl DeviceStream for SimStream {
    fn pull_frame(&mut self) -> CamgrabResult<Option<RawFrame>> {
        if self.format.codec != CodecId::RGB24 {
            return Err(CamgrabError::platform(format!(
                "simulated stream cannot synthesize '{}' frames",
                self.format.codec
            )));
        }

        let tick = self.tick;
        self.tick += 1;

        let bytes = pattern::rgb24_frame(self.format.width, self.format.height, tick);
        let frame_interval_us = 1_000_000 / u64::from(self.format.frame_rate.max(1));
        Ok(Some(RawFrame {
            bytes,
            timestamp_us: tick * frame_interval_us,
        }))
    }
}
