//! Port traits for the store and configuration.

pub mod config_port;
pub mod record_store;
