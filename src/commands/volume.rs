//! Volume Command Handlers

use super::Context;
use crate::client::StorageClient;
use crate::display;
use crate::error::Result;
use std::io::{BufRead, Write};
use tracing::debug;

pub async fn list<C, R, W>(ctx: &mut Context<C, R, W>) -> Result<()>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    let volumes = ctx.client.list_volumes().await?;
    debug!("Listing {} volume(s)", volumes.len());

    writeln!(ctx.out, "{}", display::volume_table(&volumes))?;
    Ok(())
}
