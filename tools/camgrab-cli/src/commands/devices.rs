//! List capture devices.

use camgrab_capture_engine::list_devices;
use camgrab_platform_sim::SimBackend;

pub fn run() -> anyhow::Result<()> {
    let backend = SimBackend::new();
    let names = list_devices(&backend)?;

    if names.is_empty() {
        println!("No capture devices found.");
        return Ok(());
    }

    for (index, name) in names.iter().enumerate() {
        println!("[{index}] {name}");
    }

    Ok(())
}
