//! Input validation that runs before any network call.

use crate::error::{Result, SynoIscsiError};

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Longest IQN the iSCSI naming rules allow.
pub const MAX_IQN_LEN: usize = 128;

/// Each subcommand takes an exact number of positional arguments.
pub fn verify_args(expected: usize, args: &[String]) -> Result<()> {
    if args.len() != expected {
        return Err(SynoIscsiError::ArgumentCount {
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

/// Names may only contain ASCII letters, digits and hyphens.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub fn validate_lun_name(name: &str) -> Result<()> {
    if !is_valid_name(name) {
        return Err(SynoIscsiError::InvalidLunName);
    }
    Ok(())
}

pub fn validate_target_name(name: &str) -> Result<()> {
    if !is_valid_name(name) {
        return Err(SynoIscsiError::InvalidTargetName);
    }
    Ok(())
}

pub fn validate_iqn(iqn: &str) -> Result<()> {
    if iqn.is_empty() || iqn.len() > MAX_IQN_LEN {
        return Err(SynoIscsiError::InvalidIqn { max: MAX_IQN_LEN });
    }
    Ok(())
}

/// Parse a size given in whole gigabytes and return it in bytes.
pub fn parse_size_gb(size: &str) -> Result<u64> {
    let gigabytes: i64 = size.parse().map_err(|_| SynoIscsiError::InvalidLunSize)?;
    if gigabytes <= 0 {
        return Err(SynoIscsiError::InvalidLunSize);
    }

    (gigabytes as u64)
        .checked_mul(GIB)
        .ok_or(SynoIscsiError::InvalidLunSize)
}

/// Space reclamation only makes sense on thin LUNs.
pub fn validate_provisioning(thin: bool, reclaim: bool) -> Result<()> {
    if reclaim && !thin {
        return Err(SynoIscsiError::ReclaimRequiresThin);
    }
    Ok(())
}
