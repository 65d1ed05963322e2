//! Utility modules for proxy construction and variant handling.

pub(crate) mod utils;
pub(crate) mod variant;
