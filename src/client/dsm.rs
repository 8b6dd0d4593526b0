//! Synology DSM web API client
//!
//! Thin adapter from [`StorageClient`] onto the DSM `webapi` endpoints.
//! Every call is a form POST; responses share the `{success, data, error}`
//! envelope.

use super::{
    Lun, LunCloneSpec, LunCreateSpec, LunResizeSpec, StorageClient, Target, TargetCreateSpec,
    Volume,
};
use crate::config::ConnectionConfig;
use crate::error::{Result, SynoIscsiError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const AUTH_CGI: &str = "auth.cgi";
const ENTRY_CGI: &str = "entry.cgi";

const AUTH_API: &str = "SYNO.API.Auth";
const VOLUME_API: &str = "SYNO.Core.Storage.Volume";
const LUN_API: &str = "SYNO.Core.ISCSI.LUN";
const TARGET_API: &str = "SYNO.Core.ISCSI.Target";

const SESSION_NAME: &str = "syno-iscsi";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            let code = self.error.map(|e| e.code).unwrap_or_default();
            Err(SynoIscsiError::Api { code })
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginData {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct VolumeListData {
    volumes: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct LunListData {
    luns: Vec<Lun>,
}

#[derive(Debug, Deserialize)]
struct TargetListData {
    targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
struct LunCreateData {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct LunCloneData {
    dst_lun_uuid: String,
}

#[derive(Debug, Deserialize)]
struct TargetCreateData {
    target_id: i64,
}

pub struct DsmClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    pass: String,
    sid: Option<String>,
}

impl DsmClient {
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            user: config.user.clone(),
            pass: config.pass.clone(),
            sid: None,
        })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        cgi: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>> {
        let url = format!("{}/{}", self.base_url, cgi);
        let response = self
            .http
            .post(&url)
            .form(params)
            .send()
            .await
            .map_err(transport_error)?;

        let body: ApiResponse<T> = response.json().await.map_err(transport_error)?;
        body.into_result()
    }

    async fn call<T: DeserializeOwned>(
        &self,
        api: &str,
        version: u32,
        method: &str,
        extra: Vec<(&str, String)>,
    ) -> Result<Option<T>> {
        let sid = self
            .sid
            .as_deref()
            .ok_or_else(|| SynoIscsiError::http("not logged in to DSM"))?;

        debug!("DSM call {}::{} (v{})", api, method, version);

        let mut params = vec![
            ("api", api.to_string()),
            ("version", version.to_string()),
            ("method", method.to_string()),
            ("_sid", sid.to_string()),
        ];
        params.extend(extra);

        self.post(ENTRY_CGI, &params).await
    }

    async fn call_data<T: DeserializeOwned>(
        &self,
        api: &str,
        version: u32,
        method: &str,
        extra: Vec<(&str, String)>,
    ) -> Result<T> {
        self.call(api, version, method, extra)
            .await?
            .ok_or_else(|| SynoIscsiError::parse(format!("{} {} returned no data", api, method)))
    }

    async fn call_unit(
        &self,
        api: &str,
        version: u32,
        method: &str,
        extra: Vec<(&str, String)>,
    ) -> Result<()> {
        self.call::<serde_json::Value>(api, version, method, extra)
            .await
            .map(|_| ())
    }
}

impl StorageClient for DsmClient {
    async fn login(&mut self) -> Result<()> {
        let params = [
            ("api", AUTH_API.to_string()),
            ("version", "3".to_string()),
            ("method", "login".to_string()),
            ("account", self.user.clone()),
            ("passwd", self.pass.clone()),
            ("session", SESSION_NAME.to_string()),
            ("format", "sid".to_string()),
        ];

        let data: Option<LoginData> = self.post(AUTH_CGI, &params).await?;
        let data = data.ok_or_else(|| SynoIscsiError::parse("login returned no session id"))?;
        self.sid = Some(data.sid);

        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        let Some(sid) = self.sid.take() else {
            return Ok(());
        };

        let params = [
            ("api", AUTH_API.to_string()),
            ("version", "3".to_string()),
            ("method", "logout".to_string()),
            ("session", SESSION_NAME.to_string()),
            ("_sid", sid),
        ];

        self.post::<serde_json::Value>(AUTH_CGI, &params)
            .await
            .map(|_| ())
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>> {
        let data: VolumeListData = self
            .call_data(
                VOLUME_API,
                1,
                "list",
                vec![
                    ("offset", "0".to_string()),
                    ("limit", "-1".to_string()),
                    ("location", "internal".to_string()),
                ],
            )
            .await?;
        Ok(data.volumes)
    }

    async fn list_luns(&self) -> Result<Vec<Lun>> {
        let data: LunListData = self
            .call_data(
                LUN_API,
                1,
                "list",
                vec![(
                    "additional",
                    r#"["allocated_size","status","flashcache_status","is_action_locked"]"#
                        .to_string(),
                )],
            )
            .await?;
        Ok(data.luns)
    }

    async fn list_targets(&self) -> Result<Vec<Target>> {
        let data: TargetListData = self
            .call_data(
                TARGET_API,
                1,
                "list",
                vec![(
                    "additional",
                    r#"["mapped_lun","status","acls","connected_sessions"]"#.to_string(),
                )],
            )
            .await?;
        Ok(data.targets)
    }

    async fn create_lun(&self, spec: LunCreateSpec) -> Result<String> {
        let dev_attribs = serde_json::to_string(&spec.dev_attribs)
            .map_err(|e| SynoIscsiError::parse(e.to_string()))?;
        let lun_type = spec.lun_type.map(|t| t.as_str()).unwrap_or_default();

        let data: LunCreateData = self
            .call_data(
                LUN_API,
                1,
                "create",
                vec![
                    ("name", spec.name),
                    ("size", spec.size.to_string()),
                    ("type", lun_type.to_string()),
                    ("location", spec.location),
                    ("description", String::new()),
                    ("dev_attribs", dev_attribs),
                ],
            )
            .await?;
        Ok(data.uuid)
    }

    async fn resize_lun(&self, spec: LunResizeSpec) -> Result<()> {
        self.call_unit(
            LUN_API,
            1,
            "set",
            vec![
                ("uuid", quoted(&spec.uuid)),
                ("new_size", spec.new_size.to_string()),
            ],
        )
        .await
    }

    async fn clone_lun(&self, spec: LunCloneSpec) -> Result<String> {
        let data: LunCloneData = self
            .call_data(
                LUN_API,
                1,
                "clone",
                vec![
                    ("src_lun_uuid", quoted(&spec.src_lun_uuid)),
                    ("dst_lun_name", quoted(&spec.name)),
                    ("dst_location", quoted(&spec.location)),
                ],
            )
            .await?;
        Ok(data.dst_lun_uuid)
    }

    async fn delete_lun(&self, uuid: &str) -> Result<()> {
        self.call_unit(
            LUN_API,
            1,
            "delete",
            vec![("uuid", quoted(uuid)), ("uuids", "[]".to_string())],
        )
        .await
    }

    async fn map_lun_to_targets(&self, target_ids: &[String], lun_uuid: &str) -> Result<()> {
        let target_ids =
            serde_json::to_string(target_ids).map_err(|e| SynoIscsiError::parse(e.to_string()))?;

        self.call_unit(
            LUN_API,
            1,
            "map_target",
            vec![("uuid", quoted(lun_uuid)), ("target_ids", target_ids)],
        )
        .await
    }

    async fn create_target(&self, spec: TargetCreateSpec) -> Result<String> {
        let data: TargetCreateData = self
            .call_data(
                TARGET_API,
                1,
                "create",
                vec![
                    ("name", spec.name),
                    ("iqn", spec.iqn),
                    ("auth_type", "0".to_string()),
                    ("max_sessions", "0".to_string()),
                ],
            )
            .await?;
        Ok(data.target_id.to_string())
    }

    async fn delete_target(&self, target_id: &str) -> Result<()> {
        self.call_unit(
            TARGET_API,
            1,
            "delete",
            vec![("target_id", quoted(target_id))],
        )
        .await
    }
}

/// DSM expects identifiers as JSON string literals.
fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn transport_error(e: reqwest::Error) -> SynoIscsiError {
    if e.is_connect() {
        SynoIscsiError::connection(e.to_string())
    } else if e.is_decode() {
        SynoIscsiError::parse(e.to_string())
    } else {
        SynoIscsiError::http(e.to_string())
    }
}
