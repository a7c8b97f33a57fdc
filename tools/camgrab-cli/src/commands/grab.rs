//! Grab frames from a device and write the last one to disk.

use std::io::Write;
use std::path::PathBuf;

use camgrab_capture_engine::open_capture;
use camgrab_common::config::CaptureDefaults;
use camgrab_platform_core::PixelEncoding;
use camgrab_platform_sim::SimBackend;

#[allow(clippy::too_many_arguments)]
pub fn run(
    index: u32,
    width: Option<u32>,
    height: Option<u32>,
    encoding: Option<String>,
    frames: u32,
    output: PathBuf,
    defaults: &CaptureDefaults,
) -> anyhow::Result<()> {
    let width = width.unwrap_or(defaults.width);
    let height = height.unwrap_or(defaults.height);
    let encoding: PixelEncoding = encoding.as_deref().unwrap_or(&defaults.encoding).parse()?;

    let backend = SimBackend::new();
    let mut handle = open_capture(&backend, index, width, height, encoding)?;

    println!(
        "Negotiated {}x{} {} ({} bytes/frame) from request {}x{}",
        handle.width(),
        handle.height(),
        handle.encoding(),
        handle.frame_bytes(),
        width,
        height
    );

    let mut last_frame: Option<Vec<u8>> = None;
    for pulled in 0..frames.max(1) {
        match handle.lock()? {
            Some(view) => {
                last_frame = Some(view.to_vec());
                handle.unlock()?;
            }
            None => {
                tracing::warn!(pulled, "No frame available this cycle");
            }
        }
    }

    let Some(frame) = last_frame else {
        anyhow::bail!("Device produced no frames");
    };

    match handle.encoding() {
        PixelEncoding::Rgb24 => {
            write_ppm(&output, handle.width(), handle.height(), &frame)?;
        }
        _ => {
            std::fs::write(&output, &frame)?;
        }
    }
    println!("Wrote {} bytes to {}", frame.len(), output.display());

    Ok(())
}

/// Binary PPM (P6) writer for RGB24 frames.
fn write_ppm(path: &PathBuf, width: u32, height: u32, rgb: &[u8]) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write!(file, "P6\n{width} {height}\n255\n")?;
    file.write_all(rgb)?;
    Ok(())
}
