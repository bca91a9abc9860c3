//! Standalone Helpers
//!
//! Small numeric and timing helpers with no shared state.
//!
//! - [`annotations`]: floor, mixed-number sum, array zoom
//! - [`timing`]: bounded random delays and runtime measurement

pub mod annotations;
pub mod timing;
