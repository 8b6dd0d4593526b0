//! Remote Storage Client
//!
//! The capability surface the orchestration layer consumes. Entities are
//! read-only snapshots returned by the appliance's list calls; nothing here
//! is cached between calls.

pub mod dsm;

use crate::error::Result;
use crate::lun_type::LunType;
use serde::{Deserialize, Serialize};

pub use dsm::DsmClient;

/// Storage volume as reported by the appliance. Capacities arrive as
/// string-encoded byte counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Volume {
    #[serde(rename = "volume_path")]
    pub path: String,
    #[serde(rename = "fs_type", default)]
    pub fs_type: String,
    #[serde(rename = "size_total_byte", default)]
    pub size: String,
    #[serde(rename = "size_free_byte", default)]
    pub free: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Lun {
    pub name: String,
    pub uuid: String,
    /// Volume path the LUN lives on
    pub location: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "allocated_size", default)]
    pub used: u64,
    /// Numeric appliance type code, see [`crate::lun_type::is_thin`]
    #[serde(rename = "type", default)]
    pub lun_type: i64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MappedLun {
    pub lun_uuid: String,
    #[serde(default)]
    pub mapping_index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectedSession {
    #[serde(default)]
    pub iqn: String,
    #[serde(default)]
    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Target {
    pub name: String,
    pub target_id: i64,
    pub iqn: String,
    #[serde(default)]
    pub max_sessions: i64,
    #[serde(default)]
    pub mapped_luns: Vec<MappedLun>,
    #[serde(default)]
    pub connected_sessions: Vec<ConnectedSession>,
}

impl Target {
    pub fn has_active_sessions(&self) -> bool {
        !self.connected_sessions.is_empty()
    }

    pub fn maps_lun(&self, lun_uuid: &str) -> bool {
        self.mapped_luns.iter().any(|m| m.lun_uuid == lun_uuid)
    }
}

/// Device attribute toggled on a newly created LUN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DevAttrib {
    pub dev_attrib: &'static str,
    pub enable: u8,
}

pub const LUN_SPACE_RECLAMATION: DevAttrib = DevAttrib {
    dev_attrib: "emulate_tpu",
    enable: 1,
};

pub const LUN_FUA_WRITE: DevAttrib = DevAttrib {
    dev_attrib: "emulate_fua_write",
    enable: 1,
};

pub const LUN_SYNC_CACHE: DevAttrib = DevAttrib {
    dev_attrib: "emulate_sync_cache",
    enable: 1,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunCreateSpec {
    pub name: String,
    pub location: String,
    pub size: u64,
    /// `None` when the volume's filesystem has no known LUN type; sent as an
    /// empty type and left to the appliance to reject.
    pub lun_type: Option<LunType>,
    pub dev_attribs: Vec<DevAttrib>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunResizeSpec {
    pub uuid: String,
    pub new_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunCloneSpec {
    pub name: String,
    pub src_lun_uuid: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCreateSpec {
    pub name: String,
    pub iqn: String,
}

/// Operations the appliance exposes. Implemented by [`DsmClient`] for real
/// appliances and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait StorageClient {
    async fn login(&mut self) -> Result<()>;
    async fn logout(&mut self) -> Result<()>;

    async fn list_volumes(&self) -> Result<Vec<Volume>>;
    async fn list_luns(&self) -> Result<Vec<Lun>>;
    async fn list_targets(&self) -> Result<Vec<Target>>;

    /// Returns the uuid of the new LUN.
    async fn create_lun(&self, spec: LunCreateSpec) -> Result<String>;
    async fn resize_lun(&self, spec: LunResizeSpec) -> Result<()>;
    /// Returns the uuid of the cloned LUN.
    async fn clone_lun(&self, spec: LunCloneSpec) -> Result<String>;
    async fn delete_lun(&self, uuid: &str) -> Result<()>;
    async fn map_lun_to_targets(&self, target_ids: &[String], lun_uuid: &str) -> Result<()>;

    /// Returns the id of the new target.
    async fn create_target(&self, spec: TargetCreateSpec) -> Result<String>;
    async fn delete_target(&self, target_id: &str) -> Result<()>;
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_deserializes_from_dsm_json() {
        let json = r#"{
            "name": "target1",
            "iqn": "iqn.2000-01.com.synology:target1",
            "max_sessions": 2,
            "target_id": 1,
            "status": "online",
            "mapped_luns": [{"lun_uuid": "abc", "mapping_index": 0}],
            "connected_sessions": [{"iqn": "iqn.1993-08.org.debian:client", "ip": "192.168.1.10"}]
        }"#;

        let target: Target = serde_json::from_str(json).unwrap();
        assert_eq!(target.target_id, 1);
        assert!(target.has_active_sessions());
        assert!(target.maps_lun("abc"));
        assert!(!target.maps_lun("def"));
    }

    #[test]
    fn test_volume_keeps_string_capacities() {
        let json = r#"{
            "display_name": "Volume 1",
            "volume_path": "/volume1",
            "fs_type": "btrfs",
            "size_total_byte": "10737418240",
            "size_free_byte": "5368709120",
            "status": "normal"
        }"#;

        let volume: Volume = serde_json::from_str(json).unwrap();
        assert_eq!(volume.path, "/volume1");
        assert_eq!(volume.free, "5368709120");
    }
}
