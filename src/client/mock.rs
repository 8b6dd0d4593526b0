//! In-memory [`StorageClient`] used by the tests.

use super::{
    ConnectedSession, Lun, LunCloneSpec, LunCreateSpec, LunResizeSpec, MappedLun, StorageClient,
    Target, TargetCreateSpec, Volume,
};
use crate::error::{Result, SynoIscsiError};
use parking_lot::Mutex;

/// A recorded remote call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login,
    Logout,
    ListVolumes,
    ListLuns,
    ListTargets,
    CreateLun(LunCreateSpec),
    ResizeLun(LunResizeSpec),
    CloneLun(LunCloneSpec),
    DeleteLun(String),
    MapLun(Vec<String>, String),
    CreateTarget(TargetCreateSpec),
    DeleteTarget(String),
}

impl Call {
    fn name(&self) -> &'static str {
        match self {
            Call::Login => "login",
            Call::Logout => "logout",
            Call::ListVolumes => "list_volumes",
            Call::ListLuns => "list_luns",
            Call::ListTargets => "list_targets",
            Call::CreateLun(_) => "create_lun",
            Call::ResizeLun(_) => "resize_lun",
            Call::CloneLun(_) => "clone_lun",
            Call::DeleteLun(_) => "delete_lun",
            Call::MapLun(..) => "map_lun",
            Call::CreateTarget(_) => "create_target",
            Call::DeleteTarget(_) => "delete_target",
        }
    }
}

#[derive(Default)]
pub struct MockClient {
    pub volumes: Vec<Volume>,
    pub luns: Vec<Lun>,
    pub targets: Vec<Target>,
    /// Error code returned by `login`, if any.
    login_error: Option<i64>,
    /// Connection failure detail returned by `login`, if any.
    login_unreachable: Option<String>,
    logout_fails: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockClient {
    pub fn with_fixtures() -> Self {
        Self {
            volumes: vec![fixtures::vol1(), fixtures::vol2()],
            luns: vec![fixtures::lun1(), fixtures::lun2()],
            targets: vec![fixtures::target1(), fixtures::target2()],
            ..Self::default()
        }
    }

    pub fn login_error(mut self, code: i64) -> Self {
        self.login_error = Some(code);
        self
    }

    pub fn login_unreachable(mut self, detail: &str) -> Self {
        self.login_unreachable = Some(detail.to_string());
        self
    }

    pub fn logout_fails(mut self) -> Self {
        self.logout_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.name() == name).count()
    }

    /// Calls that change appliance state.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    Call::Login
                        | Call::Logout
                        | Call::ListVolumes
                        | Call::ListLuns
                        | Call::ListTargets
                )
            })
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

impl StorageClient for MockClient {
    async fn login(&mut self) -> Result<()> {
        self.record(Call::Login);
        if let Some(detail) = &self.login_unreachable {
            return Err(SynoIscsiError::connection(detail.clone()));
        }
        match self.login_error {
            Some(code) => Err(SynoIscsiError::Api { code }),
            None => Ok(()),
        }
    }

    async fn logout(&mut self) -> Result<()> {
        self.record(Call::Logout);
        if self.logout_fails {
            return Err(SynoIscsiError::http("session already expired"));
        }
        Ok(())
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>> {
        self.record(Call::ListVolumes);
        Ok(self.volumes.clone())
    }

    async fn list_luns(&self) -> Result<Vec<Lun>> {
        self.record(Call::ListLuns);
        Ok(self.luns.clone())
    }

    async fn list_targets(&self) -> Result<Vec<Target>> {
        self.record(Call::ListTargets);
        Ok(self.targets.clone())
    }

    async fn create_lun(&self, spec: LunCreateSpec) -> Result<String> {
        self.record(Call::CreateLun(spec));
        Ok("new-lun-uuid".to_string())
    }

    async fn resize_lun(&self, spec: LunResizeSpec) -> Result<()> {
        self.record(Call::ResizeLun(spec));
        Ok(())
    }

    async fn clone_lun(&self, spec: LunCloneSpec) -> Result<String> {
        self.record(Call::CloneLun(spec));
        Ok("cloned-lun-uuid".to_string())
    }

    async fn delete_lun(&self, uuid: &str) -> Result<()> {
        self.record(Call::DeleteLun(uuid.to_string()));
        Ok(())
    }

    async fn map_lun_to_targets(&self, target_ids: &[String], lun_uuid: &str) -> Result<()> {
        self.record(Call::MapLun(target_ids.to_vec(), lun_uuid.to_string()));
        Ok(())
    }

    async fn create_target(&self, spec: TargetCreateSpec) -> Result<String> {
        self.record(Call::CreateTarget(spec));
        Ok("3".to_string())
    }

    async fn delete_target(&self, target_id: &str) -> Result<()> {
        self.record(Call::DeleteTarget(target_id.to_string()));
        Ok(())
    }
}

pub mod fixtures {
    use super::*;
    use crate::validate::GIB;

    pub const LUN1_UUID: &str = "c0416d61-e668-4fd9-86d7-7139c4fabd1d";
    pub const LUN2_UUID: &str = "2391bb3d-82d9-4a64-b197-5faae2f8d95a";

    /// ext4, 10 GiB total, 5 GiB free
    pub fn vol1() -> Volume {
        Volume {
            path: "/vol1".to_string(),
            fs_type: "ext4".to_string(),
            size: (10 * GIB).to_string(),
            free: (5 * GIB).to_string(),
            status: "normal".to_string(),
        }
    }

    /// btrfs, 5 GiB total, all free
    pub fn vol2() -> Volume {
        Volume {
            path: "/vol2".to_string(),
            fs_type: "btrfs".to_string(),
            size: (5 * GIB).to_string(),
            free: (5 * GIB).to_string(),
            status: "degraded".to_string(),
        }
    }

    /// ext4 thick on /vol1
    pub fn lun1() -> Lun {
        Lun {
            name: "lun1".to_string(),
            uuid: LUN1_UUID.to_string(),
            location: "/vol1".to_string(),
            size: 5 * GIB,
            used: 3 * GIB,
            lun_type: 3,
            status: "normal".to_string(),
        }
    }

    /// btrfs thin on /vol2
    pub fn lun2() -> Lun {
        Lun {
            name: "lun2".to_string(),
            uuid: LUN2_UUID.to_string(),
            location: "/vol2".to_string(),
            size: 5 * GIB,
            used: 0,
            lun_type: 263,
            status: "degraded".to_string(),
        }
    }

    /// Maps both LUNs, one client connected.
    pub fn target1() -> Target {
        Target {
            name: "target1".to_string(),
            target_id: 1,
            iqn: "iqn.2000-01.com.synology:target1".to_string(),
            max_sessions: 2,
            mapped_luns: vec![
                MappedLun {
                    lun_uuid: LUN1_UUID.to_string(),
                    mapping_index: 0,
                },
                MappedLun {
                    lun_uuid: LUN2_UUID.to_string(),
                    mapping_index: 1,
                },
            ],
            connected_sessions: vec![ConnectedSession {
                iqn: "iqn.1993-08.org.debian:client".to_string(),
                ip: "192.168.1.10".to_string(),
            }],
        }
    }

    /// Maps lun1, no sessions.
    pub fn target2() -> Target {
        Target {
            name: "target2".to_string(),
            target_id: 2,
            iqn: "iqn.2000-01.com.synology:target2".to_string(),
            max_sessions: 1,
            mapped_luns: vec![MappedLun {
                lun_uuid: LUN1_UUID.to_string(),
                mapping_index: 0,
            }],
            connected_sessions: vec![],
        }
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_failures_are_configurable() {
        let mut client = MockClient::with_fixtures().login_error(400);
        assert!(matches!(
            client.login().await,
            Err(SynoIscsiError::Api { code: 400 })
        ));

        let mut client = MockClient::with_fixtures().login_unreachable("refused");
        assert_eq!(
            client.login().await.unwrap_err().to_string(),
            "problem connecting to host (refused)"
        );

        let mut client = MockClient::with_fixtures().logout_fails();
        assert!(client.login().await.is_ok());
        assert!(client.logout().await.is_err());
        assert_eq!(client.calls(), vec![Call::Login, Call::Logout]);
    }
}
