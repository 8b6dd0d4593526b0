use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynoIscsiError>;

#[derive(Error, Debug)]
pub enum SynoIscsiError {
    #[error("invalid number of arguments, expected {expected} but got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    #[error("the following global flag(s) are missing: {0}")]
    MissingGlobalFlags(String),

    #[error("--reclaim can only be used with --thin")]
    ReclaimRequiresThin,

    #[error("invalid LUN name, must consist of a-z, A-Z, 0-9, and hyphens (-)")]
    InvalidLunName,

    #[error("invalid target name, must consist of a-z, A-Z, 0-9, and hyphens (-)")]
    InvalidTargetName,

    #[error("invalid IQN, must be between 1 and {max} characters")]
    InvalidIqn { max: usize },

    #[error("invalid LUN size, must be a positive integer")]
    InvalidLunSize,

    #[error("not enough space, {path} has {free_gib} GiB free")]
    NotEnoughSpace { path: String, free_gib: u64 },

    #[error("LUN cannot decrease in size")]
    CannotDecreaseSize,

    #[error("could not find volume with path: {0}")]
    VolumeNotFound(String),

    #[error("could not find LUN with name: {0}")]
    LunNotFound(String),

    #[error("could not find target with name: {0}")]
    TargetNotFound(String),

    #[error("Invalid user and/or pass")]
    InvalidCredentials,

    #[error("problem connecting to host ({0})")]
    Connection(String),

    #[error("DSM API error. Error code: {code}")]
    Api { code: i64 },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl SynoIscsiError {
    pub fn parse<T: Into<String>>(msg: T) -> Self {
        Self::Parse(msg.into())
    }

    pub fn http<T: Into<String>>(msg: T) -> Self {
        Self::Http(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        Self::Connection(msg.into())
    }

    /// Errors carrying a precise message for the operator, printed as `Error: ...`.
    /// Everything else is passed through from the transport and printed as `Unknown error: ...`.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::Api { .. } | Self::Http(_) | Self::Parse(_) | Self::Io(_) | Self::Generic(_)
        )
    }
}
