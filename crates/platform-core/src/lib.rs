//! CamGrab platform core contracts.
//!
//! This crate contains the platform-neutral capture data model
//! (resolutions, pixel encodings, native formats) and the capability
//! traits a platform backend implements. The capture engine calls these
//! contracts without coupling to a concrete OS media subsystem.

pub mod backend;
pub mod format;

pub use backend::*;
pub use format::*;
