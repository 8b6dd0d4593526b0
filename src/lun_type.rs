//! LUN type tables.
//!
//! The appliance accepts a named type when creating a LUN and reports a
//! numeric code when listing them. Both directions are fixed lookup tables:
//!
//! | code | filesystem | provisioning | name         |
//! |------|------------|--------------|--------------|
//! | 3    | ext4       | thick        | `FILE`       |
//! | 15   | ext4       | thin         | `ADV`        |
//! | 259  | btrfs      | thick        | `BLUN_THICK` |
//! | 263  | btrfs      | thin         | `BLUN`       |

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunType {
    File,
    Adv,
    BlunThick,
    Blun,
}

impl LunType {
    /// Type to request for a LUN on a volume with the given filesystem.
    /// Unknown filesystems have no type.
    pub fn for_volume(fs_type: &str, thin: bool) -> Option<Self> {
        match (fs_type, thin) {
            ("ext4", false) => Some(Self::File),
            ("ext4", true) => Some(Self::Adv),
            ("btrfs", false) => Some(Self::BlunThick),
            ("btrfs", true) => Some(Self::Blun),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Adv => "ADV",
            Self::BlunThick => "BLUN_THICK",
            Self::Blun => "BLUN",
        }
    }
}

impl fmt::Display for LunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an appliance type code denotes thin provisioning. Codes outside
/// the table are reported as thick.
pub fn is_thin(code: i64) -> bool {
    match code {
        3 => false,
        15 => true,
        259 => false,
        263 => true,
        _ => false,
    }
}
