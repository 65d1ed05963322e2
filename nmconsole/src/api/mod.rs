//! Public API module.
//!
//! Models, configuration, the profile store and the `NetworkManager`
//! session handle.

pub mod config;
pub mod models;
pub mod network_manager;
pub mod profile_store;
