//! Command Handlers Module
//!
//! Each subcommand is first turned into a validated [`Request`] without
//! touching the network. [`execute`] then logs in, runs the request's
//! sequence of remote calls and logs out again, whatever the outcome.

pub mod lun;
pub mod target;
pub mod volume;

use crate::cli::{Commands, LunCommands, TargetCommands, VolumeCommands};
use crate::client::StorageClient;
use crate::error::{Result, SynoIscsiError};
use crate::validate::verify_args;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

pub const CANCELLED_MSG: &str = "Cancelled";

/// DSM answers a rejected login with this API error code.
const INVALID_CREDENTIALS_CODE: i64 = 400;

/// Everything a command needs: the remote client plus the operator's
/// terminal for prompts and output.
pub struct Context<C, R, W> {
    pub client: C,
    pub input: R,
    pub out: W,
}

impl<C, R, W> Context<C, R, W>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    pub fn new(client: C, input: R, out: W) -> Self {
        Self { client, input, out }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    VolumeList,
    LunList,
    LunCreate(lun::CreateLun),
    LunMap(lun::MapLun),
    LunResize(lun::ResizeLun),
    LunClone(lun::CloneLun),
    LunDelete(lun::DeleteLun),
    TargetList,
    TargetCreate(target::CreateTarget),
    TargetDelete(target::DeleteTarget),
}

impl Request {
    /// Validate arguments and flags. Nothing here talks to the appliance.
    pub fn from_command(command: Commands) -> Result<Self> {
        let request = match command {
            Commands::Volume(VolumeCommands::List { args }) => {
                verify_args(0, &args)?;
                Request::VolumeList
            }
            Commands::Lun(LunCommands::List { args }) => {
                verify_args(0, &args)?;
                Request::LunList
            }
            Commands::Lun(LunCommands::Create {
                args,
                thin,
                reclaim,
                sync_cache,
            }) => Request::LunCreate(lun::CreateLun::parse(&args, thin, reclaim, sync_cache)?),
            Commands::Lun(LunCommands::Map { args }) => Request::LunMap(lun::MapLun::parse(&args)?),
            Commands::Lun(LunCommands::Resize { args }) => {
                Request::LunResize(lun::ResizeLun::parse(&args)?)
            }
            Commands::Lun(LunCommands::Clone { args }) => {
                Request::LunClone(lun::CloneLun::parse(&args)?)
            }
            Commands::Lun(LunCommands::Delete { args, skip_verify }) => {
                Request::LunDelete(lun::DeleteLun::parse(&args, skip_verify)?)
            }
            Commands::Target(TargetCommands::List { args }) => {
                verify_args(0, &args)?;
                Request::TargetList
            }
            Commands::Target(TargetCommands::Create { args }) => {
                Request::TargetCreate(target::CreateTarget::parse(&args)?)
            }
            Commands::Target(TargetCommands::Delete {
                args,
                force,
                skip_verify,
            }) => Request::TargetDelete(target::DeleteTarget::parse(&args, force, skip_verify)?),
        };

        debug!("Validated request: {:?}", request);
        Ok(request)
    }
}

/// Run `request` inside a DSM session. A failed logout is reported but does
/// not change the result of the request itself.
pub async fn execute<C, R, W>(ctx: &mut Context<C, R, W>, request: Request) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    login(ctx).await?;

    let result = dispatch(ctx, request).await;

    logout(ctx).await;

    result
}

async fn dispatch<C, R, W>(ctx: &mut Context<C, R, W>, request: Request) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    match request {
        Request::VolumeList => volume::list(ctx).await,
        Request::LunList => lun::list(ctx).await,
        Request::LunCreate(req) => lun::create(ctx, req).await,
        Request::LunMap(req) => lun::map(ctx, req).await,
        Request::LunResize(req) => lun::resize(ctx, req).await,
        Request::LunClone(req) => lun::clone(ctx, req).await,
        Request::LunDelete(req) => lun::delete(ctx, req).await,
        Request::TargetList => target::list(ctx).await,
        Request::TargetCreate(req) => target::create(ctx, req).await,
        Request::TargetDelete(req) => target::delete(ctx, req).await,
    }
}

async fn login<C, R, W>(ctx: &mut Context<C, R, W>) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    debug!("Logging in to DSM");
    ctx.client.login().await.map_err(|e| match e {
        SynoIscsiError::Api {
            code: INVALID_CREDENTIALS_CODE,
        } => SynoIscsiError::InvalidCredentials,
        other => other,
    })
}

async fn logout<C, R, W>(ctx: &mut Context<C, R, W>)
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    debug!("Logging out of DSM");
    if let Err(e) = ctx.client.logout().await {
        warn!("Logout failed: {}", e);
        if let Err(write_err) = writeln!(ctx.out, "Error: failed to logout of DSM: {}", e) {
            warn!("Could not report logout failure: {}", write_err);
        }
    }
}
