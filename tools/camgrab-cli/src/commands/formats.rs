//! Show advertised formats and resolutions for one device.

use camgrab_capture_engine::{list_resolutions, DeviceRegistry};
use camgrab_platform_sim::SimBackend;

pub fn run(index: u32) -> anyhow::Result<()> {
    let backend = SimBackend::new();
    let registry = DeviceRegistry::probe(&backend)?;

    println!("Device: {}", registry.name(index)?);
    println!();

    let formats = registry.formats(index)?;
    if formats.is_empty() {
        println!("No advertised formats (capture cannot be negotiated).");
        return Ok(());
    }

    println!("Advertised formats:");
    for format in &formats {
        println!(
            "  {} {}",
            format,
            if format.compressed { "(compressed)" } else { "" }
        );
    }

    println!();
    println!("Resolutions (deduplicated, ascending area):");
    for resolution in list_resolutions(&backend, index)? {
        println!("  {resolution}");
    }

    Ok(())
}
