//! Connection Configuration
//!
//! Global connection flags are read once, from the command line or the
//! `SYNO_*` environment variables, and resolved into a [`ConnectionConfig`]
//! that is passed explicitly to the remote client.

use crate::error::{Result, SynoIscsiError};
use clap::Args;
use std::io::{self, IsTerminal};
use tracing::debug;

pub const DEFAULT_PORT: u16 = 5000;

pub const HOST_ENV_VAR: &str = "SYNO_HOST";
pub const PORT_ENV_VAR: &str = "SYNO_PORT";
pub const USER_ENV_VAR: &str = "SYNO_USER";
pub const PASS_ENV_VAR: &str = "SYNO_PASS";
pub const HTTPS_ENV_VAR: &str = "SYNO_HTTPS";
pub const INSECURE_ENV_VAR: &str = "SYNO_INSECURE";

/// Global flags. None of them is `required` at the clap level so that
/// `--help` and `--version` work without a configured appliance.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Synology host or IP
    #[arg(long, env = HOST_ENV_VAR)]
    pub host: Option<String>,

    /// Port on which Synology DSM is listening
    #[arg(long, env = PORT_ENV_VAR, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Synology user
    #[arg(long, env = USER_ENV_VAR)]
    pub user: Option<String>,

    /// Synology password (prompted for when omitted on a terminal)
    #[arg(long, env = PASS_ENV_VAR, hide_env_values = true)]
    pub pass: Option<String>,

    /// Use https for connection to Synology DSM
    #[arg(long, env = HTTPS_ENV_VAR)]
    pub https: bool,

    /// Skip TLS certificate verification (self-signed DSM certificates)
    #[arg(long, env = INSECURE_ENV_VAR)]
    pub insecure: bool,
}

/// Fully resolved connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub https: bool,
    pub insecure: bool,
}

impl ConnectionConfig {
    pub fn base_url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        format!("{}://{}:{}/webapi", scheme, self.host, self.port)
    }
}

impl ConnectionArgs {
    /// Names of the global flags that still need a value. The password only
    /// counts as missing when there is no terminal to prompt on.
    pub fn missing_flags(&self, can_prompt: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.host) {
            missing.push("host");
        }
        if is_blank(&self.user) {
            missing.push("user");
        }
        if is_blank(&self.pass) && !can_prompt {
            missing.push("pass");
        }
        missing
    }

    /// Resolve into a [`ConnectionConfig`], reading the password from the
    /// terminal with echo disabled when it was not supplied.
    pub fn resolve(self) -> Result<ConnectionConfig> {
        let can_prompt = io::stdin().is_terminal();
        self.resolve_with(can_prompt, || {
            rpassword::prompt_password("Enter Password: ").map_err(SynoIscsiError::from)
        })
    }

    pub fn resolve_with<F>(self, can_prompt: bool, read_password: F) -> Result<ConnectionConfig>
    where
        F: FnOnce() -> Result<String>,
    {
        let missing = self.missing_flags(can_prompt);
        if !missing.is_empty() {
            return Err(SynoIscsiError::MissingGlobalFlags(missing.join(", ")));
        }

        let pass = match self.pass.filter(|p| !p.is_empty()) {
            Some(pass) => pass,
            None => read_password()?,
        };

        let config = ConnectionConfig {
            host: self.host.unwrap_or_default(),
            port: self.port,
            user: self.user.unwrap_or_default(),
            pass,
            https: self.https,
            insecure: self.insecure,
        };
        debug!(
            "Resolved connection: {}@{}:{} (https: {})",
            config.user, config.host, config.port, config.https
        );

        Ok(config)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
