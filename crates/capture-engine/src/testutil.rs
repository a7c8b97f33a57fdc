//! Test doubles for the backend capability traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{
    CaptureBackend, CodecId, DeviceHandle, DeviceStream, FrameTransform, NativeFormat,
    PixelEncoding, RawFrame,
};

/// Shared record of teardown order, pushed to from `Drop` impls.
#[derive(Clone, Default)]
pub struct DropLog(Arc<Mutex<Vec<&'static str>>>);

impl DropLog {
    pub fn push(&self, label: &'static str) {
        self.0.lock().unwrap().push(label);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

/// Scriptable stand-in for one enumerated device.
#[derive(Clone)]
pub struct MockDevice {
    pub name: String,
    pub formats: Vec<NativeFormat>,
    pub fail_name: bool,
    pub fail_formats: bool,
    pub fail_activate: bool,
    /// Pull indices (0-based, per device) that yield no frame.
    pub frame_gaps: Vec<u64>,
    pub drop_log: Option<DropLog>,
    activations: Arc<AtomicUsize>,
    pulls: Arc<AtomicUsize>,
}

impl MockDevice {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            formats: vec![NativeFormat::new(640, 480, CodecId::RGB24, 30)],
            fail_name: false,
            fail_formats: false,
            fail_activate: false,
            frame_gaps: Vec::new(),
            drop_log: None,
            activations: Arc::new(AtomicUsize::new(0)),
            pulls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times this device was activated, across all clones.
    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    /// How many frames were pulled from this device, across all streams.
    pub fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

impl DeviceHandle for MockDevice {
    fn name(&self) -> CamgrabResult<String> {
        if self.fail_name {
            return Err(CamgrabError::platform("simulated name query failure"));
        }
        Ok(self.name.clone())
    }

    fn formats(&self) -> CamgrabResult<Vec<NativeFormat>> {
        if self.fail_formats {
            return Err(CamgrabError::platform("simulated format query failure"));
        }
        Ok(self.formats.clone())
    }

    fn activate(&self, format: &NativeFormat) -> CamgrabResult<Box<dyn DeviceStream>> {
        if self.fail_activate {
            return Err(CamgrabError::platform("simulated activation failure"));
        }
        self.activations.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockStream {
            frame_len: 3 * format.width as usize * format.height as usize,
            gaps: self.frame_gaps.clone(),
            next_index: 0,
            pulls: self.pulls.clone(),
            drop_log: self.drop_log.clone(),
        }))
    }
}

struct MockStream {
    frame_len: usize,
    gaps: Vec<u64>,
    next_index: u64,
    pulls: Arc<AtomicUsize>,
    drop_log: Option<DropLog>,
}

impl DeviceStream for MockStream {
    fn pull_frame(&mut self) -> CamgrabResult<Option<RawFrame>> {
        let index = self.next_index;
        self.next_index += 1;
        self.pulls.fetch_add(1, Ordering::SeqCst);

        if self.gaps.contains(&index) {
            return Ok(None);
        }
        Ok(Some(RawFrame {
            bytes: vec![0x5a; self.frame_len],
            timestamp_us: index * 33_333,
        }))
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        if let Some(log) = &self.drop_log {
            log.push("stream");
        }
    }
}

/// Scriptable stand-in for the platform backend.
pub struct MockBackend {
    devices: Vec<MockDevice>,
    pub reject_transforms: bool,
    pub fail_transform_runs: bool,
    pub transform_drop_log: Option<DropLog>,
    probe_count: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn with_devices(devices: Vec<MockDevice>) -> Self {
        Self {
            devices,
            reject_transforms: false,
            fail_transform_runs: false,
            transform_drop_log: None,
            probe_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Clone of one scripted device, sharing its counters.
    pub fn device(&self, index: usize) -> MockDevice {
        self.devices[index].clone()
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }
}

impl CaptureBackend for MockBackend {
    fn probe(&self) -> CamgrabResult<Vec<Box<dyn DeviceHandle>>> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .devices
            .iter()
            .cloned()
            .map(|device| Box::new(device) as Box<dyn DeviceHandle>)
            .collect())
    }

    fn new_transform(
        &self,
        input: &NativeFormat,
        output: PixelEncoding,
    ) -> CamgrabResult<Box<dyn FrameTransform>> {
        if self.reject_transforms {
            return Err(CamgrabError::platform(
                "simulated engine rejection of the conversion pair",
            ));
        }
        let output_len = output
            .frame_bytes(input.width, input.height)
            .ok_or_else(|| CamgrabError::platform("no output layout for the unknown encoding"))?;
        Ok(Box::new(MockTransform {
            output_len,
            fail_runs: self.fail_transform_runs,
            drop_log: self.transform_drop_log.clone(),
        }))
    }
}

struct MockTransform {
    output_len: usize,
    fail_runs: bool,
    drop_log: Option<DropLog>,
}

impl FrameTransform for MockTransform {
    fn output_len(&self) -> usize {
        self.output_len
    }

    fn run(&mut self, input: &RawFrame, output: &mut [u8]) -> CamgrabResult<()> {
        if self.fail_runs {
            return Err(CamgrabError::platform("simulated engine fault"));
        }
        let fill = input.bytes.first().copied().unwrap_or(0);
        output.fill(fill);
        Ok(())
    }
}

impl Drop for MockTransform {
    fn drop(&mut self) {
        if let Some(log) = &self.drop_log {
            log.push("transform");
        }
    }
}
