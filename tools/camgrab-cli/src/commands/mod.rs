pub mod devices;
pub mod formats;
pub mod grab;
