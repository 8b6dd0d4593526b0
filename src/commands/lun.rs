//! LUN Command Handlers
//!
//! Handles `lun list|create|map|resize|clone|delete`. Operations that grow
//! allocation check the destination volume's free space first; delete asks
//! the operator to retype the LUN name unless `--skip-verify` is given.

use super::{Context, CANCELLED_MSG};
use crate::capacity;
use crate::client::{
    DevAttrib, LunCloneSpec, LunCreateSpec, LunResizeSpec, StorageClient, LUN_FUA_WRITE,
    LUN_SPACE_RECLAMATION, LUN_SYNC_CACHE,
};
use crate::confirm;
use crate::display;
use crate::error::Result;
use crate::lun_type::LunType;
use crate::resolve;
use crate::validate::{parse_size_gb, validate_lun_name, validate_provisioning, verify_args};
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub const LUN_CREATED_MSG: &str = "LUN created successfully";
pub const LUN_MAPPED_MSG: &str = "LUN mapped to the target successfully";
pub const LUN_RESIZED_MSG: &str = "LUN resized successfully";
pub const LUN_CLONED_MSG: &str = "LUN cloned successfully";
pub const LUN_DELETED_MSG: &str = "LUN deleted successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLun {
    pub name: String,
    pub volume: String,
    pub size: u64,
    pub thin: bool,
    pub reclaim: bool,
    pub sync_cache: bool,
}

impl CreateLun {
    /// `<name> <volume> <size-in-gb>`
    pub fn parse(args: &[String], thin: bool, reclaim: bool, sync_cache: bool) -> Result<Self> {
        verify_args(3, args)?;
        validate_provisioning(thin, reclaim)?;
        validate_lun_name(&args[0])?;
        let size = parse_size_gb(&args[2])?;

        Ok(Self {
            name: args[0].clone(),
            volume: args[1].clone(),
            size,
            thin,
            reclaim,
            sync_cache,
        })
    }

    fn dev_attribs(&self) -> Vec<DevAttrib> {
        let mut attribs = Vec::new();
        if self.reclaim {
            attribs.push(LUN_SPACE_RECLAMATION);
        }
        if self.sync_cache {
            attribs.extend([LUN_FUA_WRITE, LUN_SYNC_CACHE]);
        }
        attribs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLun {
    pub lun: String,
    pub target: String,
}

impl MapLun {
    /// `<lun-name> <target-name>`
    pub fn parse(args: &[String]) -> Result<Self> {
        verify_args(2, args)?;
        Ok(Self {
            lun: args[0].clone(),
            target: args[1].clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeLun {
    pub name: String,
    pub new_size: u64,
}

impl ResizeLun {
    /// `<name> <new-size-in-gb>`
    pub fn parse(args: &[String]) -> Result<Self> {
        verify_args(2, args)?;
        let new_size = parse_size_gb(&args[1])?;
        Ok(Self {
            name: args[0].clone(),
            new_size,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneLun {
    pub source: String,
    pub destination: String,
    pub volume: String,
}

impl CloneLun {
    /// `<source-lun> <destination-lun> <volume>`
    pub fn parse(args: &[String]) -> Result<Self> {
        verify_args(3, args)?;
        validate_lun_name(&args[1])?;
        Ok(Self {
            source: args[0].clone(),
            destination: args[1].clone(),
            volume: args[2].clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteLun {
    pub name: String,
    pub skip_verify: bool,
}

impl DeleteLun {
    /// `<name>`
    pub fn parse(args: &[String], skip_verify: bool) -> Result<Self> {
        verify_args(1, args)?;
        Ok(Self {
            name: args[0].clone(),
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
    let luns = ctx.client.list_luns().await?;
    debug!("Listing {} LUN(s)", luns.len());

    writeln!(ctx.out, "{}", display::lun_table(&luns))?;
    Ok(())
}

pub async fn create<C, R, W>(ctx: &mut Context<C, R, W>, req: CreateLun) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let volume = resolve::volume_by_path(&ctx.client, &req.volume).await?;
    capacity::ensure_free_space(&volume, req.size)?;

    let spec = LunCreateSpec {
        name: req.name.clone(),
        location: req.volume.clone(),
        size: req.size,
        lun_type: LunType::for_volume(&volume.fs_type, req.thin),
        dev_attribs: req.dev_attribs(),
    };
    debug!("Creating LUN: {:?}", spec);

    let uuid = ctx.client.create_lun(spec).await?;
    info!("Created LUN {} ({}) on {}", req.name, uuid, req.volume);

    writeln!(ctx.out, "{}", LUN_CREATED_MSG)?;
    Ok(())
}

pub async fn map<C, R, W>(ctx: &mut Context<C, R, W>, req: MapLun) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let lun = resolve::lun_by_name(&ctx.client, &req.lun).await?;
    let target = resolve::target_by_name(&ctx.client, &req.target).await?;

    let target_ids = vec![target.target_id.to_string()];
    ctx.client.map_lun_to_targets(&target_ids, &lun.uuid).await?;
    info!("Mapped LUN {} to target {}", lun.name, target.name);

    writeln!(ctx.out, "{}", LUN_MAPPED_MSG)?;
    Ok(())
}

pub async fn resize<C, R, W>(ctx: &mut Context<C, R, W>, req: ResizeLun) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let lun = resolve::lun_by_name(&ctx.client, &req.name).await?;
    let delta = capacity::resize_delta(&lun, req.new_size)?;

    let volume = resolve::volume_by_path(&ctx.client, &lun.location).await?;
    capacity::ensure_free_space(&volume, delta)?;

    ctx.client
        .resize_lun(LunResizeSpec {
            uuid: lun.uuid.clone(),
            new_size: req.new_size,
        })
        .await?;
    info!("Resized LUN {} to {} bytes", lun.name, req.new_size);

    writeln!(ctx.out, "{}", LUN_RESIZED_MSG)?;
    Ok(())
}

pub async fn clone<C, R, W>(ctx: &mut Context<C, R, W>, req: CloneLun) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let source = resolve::lun_by_name(&ctx.client, &req.source).await?;
    let volume = resolve::volume_by_path(&ctx.client, &req.volume).await?;
    capacity::ensure_free_space(&volume, source.size)?;

    let uuid = ctx
        .client
        .clone_lun(LunCloneSpec {
            name: req.destination.clone(),
            src_lun_uuid: source.uuid.clone(),
            location: req.volume.clone(),
        })
        .await?;
    info!("Cloned LUN {} to {} ({})", source.name, req.destination, uuid);

    writeln!(ctx.out, "{}", LUN_CLONED_MSG)?;
    Ok(())
}

pub async fn delete<C, R, W>(ctx: &mut Context<C, R, W>, req: DeleteLun) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let lun = resolve::lun_by_name(&ctx.client, &req.name).await?;

    if !req.skip_verify {
        let mapped_targets: Vec<String> = ctx
            .client
            .list_targets()
            .await?
            .into_iter()
            .filter(|target| target.maps_lun(&lun.uuid))
            .map(|target| {
                if target.has_active_sessions() {
                    format!("{} (connected)", target.name)
                } else {
                    target.name
                }
            })
            .collect();

        writeln!(ctx.out, "Are you sure you want to delete this lun?")?;
        if !mapped_targets.is_empty() {
            writeln!(
                ctx.out,
                "It is mapped to the targets: {}",
                mapped_targets.join(", ")
            )?;
        }

        if !confirm::confirm_by_name(&mut ctx.input, &mut ctx.out, "lun", &req.name)? {
            writeln!(ctx.out, "{}", CANCELLED_MSG)?;
            return Ok(());
        }
    }

    ctx.client.delete_lun(&lun.uuid).await?;
    info!("Deleted LUN {} ({})", lun.name, lun.uuid);

    writeln!(ctx.out, "{}", LUN_DELETED_MSG)?;
    Ok(())
}
