//! Type definitions and constants.
//!
//! This module contains NetworkManager D-Bus names, settings section and key
//! names, and the limits applied to operator input.

pub(crate) mod constants;
