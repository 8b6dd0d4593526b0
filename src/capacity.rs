//! Free-space checks for operations that grow on-disk allocation.

use crate::client::{Lun, Volume};
use crate::error::{Result, SynoIscsiError};
use crate::utils::parse_bytes;
use crate::validate::GIB;

/// Parse the volume's string-encoded free capacity.
pub fn free_bytes(volume: &Volume) -> Result<u64> {
    parse_bytes(&volume.free).ok_or_else(|| {
        SynoIscsiError::parse(format!(
            "invalid free capacity {:?} for volume {}",
            volume.free, volume.path
        ))
    })
}

/// Fail unless `volume` has at least `required` bytes free.
pub fn ensure_free_space(volume: &Volume, required: u64) -> Result<()> {
    let free = free_bytes(volume)?;
    if required > free {
        return Err(SynoIscsiError::NotEnoughSpace {
            path: volume.path.clone(),
            free_gib: free / GIB,
        });
    }
    Ok(())
}

/// Bytes a resize to `new_size` will allocate. Shrinking is rejected before
/// any space is considered.
pub fn resize_delta(lun: &Lun, new_size: u64) -> Result<u64> {
    if new_size <= lun.size {
        return Err(SynoIscsiError::CannotDecreaseSize);
    }
    Ok(new_size - lun.size)
}
