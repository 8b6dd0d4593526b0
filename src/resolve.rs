//! Name resolution.
//!
//! Each lookup fetches the full collection and scans it for an exact match
//! on the natural key. Results are never cached: a command that resolves
//! twice talks to the appliance twice.

use crate::client::{Lun, StorageClient, Target, Volume};
use crate::error::{Result, SynoIscsiError};
use tracing::debug;

pub async fn volume_by_path<C: StorageClient>(client: &C, path: &str) -> Result<Volume> {
    debug!("Resolving volume {}", path);
    client
        .list_volumes()
        .await?
        .into_iter()
        .find(|v| v.path == path)
        .ok_or_else(|| SynoIscsiError::VolumeNotFound(path.to_string()))
}

pub async fn lun_by_name<C: StorageClient>(client: &C, name: &str) -> Result<Lun> {
    debug!("Resolving LUN {}", name);
    client
        .list_luns()
        .await?
        .into_iter()
        .find(|l| l.name == name)
        .ok_or_else(|| SynoIscsiError::LunNotFound(name.to_string()))
}

pub async fn target_by_name<C: StorageClient>(client: &C, name: &str) -> Result<Target> {
    debug!("Resolving target {}", name);
    client
        .list_targets()
        .await?
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| SynoIscsiError::TargetNotFound(name.to_string()))
}
