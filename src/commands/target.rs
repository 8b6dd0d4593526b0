//! Target Command Handlers

use super::{Context, CANCELLED_MSG};
use crate::client::{StorageClient, TargetCreateSpec};
use crate::confirm;
use crate::display;
use crate::error::Result;
use crate::resolve;
use crate::validate::{validate_iqn, validate_target_name, verify_args};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

pub const TARGET_CREATED_MSG: &str = "Target created successfully";
pub const TARGET_DELETED_MSG: &str = "Target deleted successfully";
pub const TARGET_ACTIVE_SESSION_MSG: &str =
    "There are active sessions, please logout of all clients before continuing (force delete with -f)";
pub const TARGET_FORCE_DELETE_MSG: &str = "Force deleting even though there are active sessions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTarget {
    pub name: String,
    pub iqn: String,
}

impl CreateTarget {
    /// `<name> <iqn>`
    pub fn parse(args: &[String]) -> Result<Self> {
        verify_args(2, args)?;
        validate_target_name(&args[0])?;
        validate_iqn(&args[1])?;
        Ok(Self {
            name: args[0].clone(),
            iqn: args[1].clone(),
        })
    }
}

/// `force` and `skip_verify` are independent: force only lifts the
/// active-session refusal, the name prompt still applies unless skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub name: String,
    pub force: bool,
    pub skip_verify: bool,
}

impl DeleteTarget {
    /// `<name>`
    pub fn parse(args: &[String], force: bool, skip_verify: bool) -> Result<Self> {
        verify_args(1, args)?;
        Ok(Self {
            name: args[0].clone(),
            force,
            skip_verify,
        })
    }
}

pub async fn list<C, R, W>(ctx: &mut Context<C, R, W>) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let targets = ctx.client.list_targets().await?;
    let luns = ctx.client.list_luns().await?;
    debug!("Listing {} target(s)", targets.len());

    writeln!(ctx.out, "{}", display::target_table(&targets, &luns))?;
    Ok(())
}

pub async fn create<C, R, W>(ctx: &mut Context<C, R, W>, req: CreateTarget) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let id = ctx
        .client
        .create_target(TargetCreateSpec {
            name: req.name.clone(),
            iqn: req.iqn.clone(),
        })
        .await?;
    info!("Created target {} ({}) with IQN {}", req.name, id, req.iqn);

    writeln!(ctx.out, "{}", TARGET_CREATED_MSG)?;
    Ok(())
}

pub async fn delete<C, R, W>(ctx: &mut Context<C, R, W>, req: DeleteTarget) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let target = resolve::target_by_name(&ctx.client, &req.name).await?;

    if target.has_active_sessions() {
        if !req.force {
            writeln!(ctx.out, "{}", TARGET_ACTIVE_SESSION_MSG)?;
            return Ok(());
        }
        warn!(
            "Force deleting target {} with {} active session(s)",
            target.name,
            target.connected_sessions.len()
        );
        writeln!(ctx.out, "{}", TARGET_FORCE_DELETE_MSG)?;
    }

    if !req.skip_verify {
        writeln!(ctx.out, "Are you sure you want to delete this target?")?;
        if !confirm::confirm_by_name(&mut ctx.input, &mut ctx.out, "target", &req.name)? {
            writeln!(ctx.out, "{}", CANCELLED_MSG)?;
            return Ok(());
        }
    }

    ctx.client
        .delete_target(&target.target_id.to_string())
        .await?;
    info!("Deleted target {} ({})", target.name, target.target_id);

    writeln!(ctx.out, "{}", TARGET_DELETED_MSG)?;
    Ok(())
}
