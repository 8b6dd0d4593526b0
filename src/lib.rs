//! syno-iscsi Library
//!
//! Administrative operations against a Synology appliance's iSCSI
//! management API: input validation, name resolution, capacity checks and
//! confirmation-gated deletes on top of a pluggable [`client::StorageClient`].

pub mod capacity;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod display;
pub mod error;
pub mod logger;
pub mod lun_type;
pub mod resolve;
pub mod utils;
pub mod validate;

// Re-export key types for easier use
pub use client::{DsmClient, Lun, StorageClient, Target, Volume};
pub use config::{ConnectionArgs, ConnectionConfig};
pub use error::{Result, SynoIscsiError};
pub use lun_type::LunType;
