//! Core implementation.
//!
//! Decoding, form translation and merging are pure functions over settings
//! dictionaries; the readers and the settings backend talk to the bus.

pub(crate) mod active;
pub(crate) mod decode;
pub(crate) mod devices;
pub(crate) mod form;
pub(crate) mod scan;
pub(crate) mod settings;
pub(crate) mod update;
