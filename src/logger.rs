//! Diagnostic logging.
//!
//! Tables, prompts and result lines are written to stdout, and scripts parse
//! them. Diagnostics therefore go to stderr, and without `--verbose` only
//! warnings (forced deletes, failed logouts) get through.

use crate::error::Result;
use std::io;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for the chosen verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) -> Result<()> {
    let filter = EnvFilter::new(default_directive(verbose));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
