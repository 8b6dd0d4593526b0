use crate::config::ConnectionArgs;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "syno-iscsi")]
#[command(about = "CLI for interacting with Synology iSCSI storage")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Volume management (list)
    #[command(subcommand)]
    Volume(VolumeCommands),

    /// LUN management (list, create, map, resize, clone, delete)
    #[command(subcommand)]
    Lun(LunCommands),

    /// Target management (list, create, delete)
    #[command(subcommand)]
    Target(TargetCommands),
}

// Positionals are collected raw so that a wrong count is reported as
// "expected N but got M" rather than as a clap usage error.

#[derive(Subcommand, Debug)]
pub enum VolumeCommands {
    /// List volumes
    List {
        #[arg(value_name = "ARGS", hide = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LunCommands {
    /// List LUNs
    List {
        #[arg(value_name = "ARGS", hide = true)]
        args: Vec<String>,
    },

    /// Create a LUN
    Create {
        /// <name> <volume> <size-in-gb>
        #[arg(value_name = "ARGS", allow_negative_numbers = true)]
        args: Vec<String>,

        /// Use thin provisioning
        #[arg(short, long)]
        thin: bool,

        /// Enable space reclamation (thin provisioning only)
        #[arg(short, long)]
        reclaim: bool,

        /// Enable FUA and Sync Cache commands, recommended for SSDs
        #[arg(short, long)]
        sync_cache: bool,
    },

    /// Map a LUN to a target
    Map {
        /// <lun-name> <target-name>
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Resize LUN by name (can only be increased)
    Resize {
        /// <name> <new-size-in-gb>
        #[arg(value_name = "ARGS", allow_negative_numbers = true)]
        args: Vec<String>,
    },

    /// Clone a LUN
    Clone {
        /// <source-lun> <destination-lun> <volume>
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Delete LUN by name
    Delete {
        /// <name>
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        /// Skip verification
        #[arg(short, long)]
        skip_verify: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TargetCommands {
    /// List targets
    List {
        #[arg(value_name = "ARGS", hide = true)]
        args: Vec<String>,
    },

    /// Create a target
    Create {
        /// <name> <iqn>
        #[arg(value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Delete target by name
    Delete {
        /// <name>
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        /// Force deletion
        #[arg(short, long)]
        force: bool,

        /// Skip verification
        #[arg(short, long)]
        skip_verify: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
