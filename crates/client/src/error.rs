use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Usage(String),

    #[error("unrecognized date '{0}', expected something like 2018-12-01, 20181201 or 'yesterday'")]
    InvalidDate(String),

    #[error("failed to reach the API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}, turn on verbose output (--verbose or $SL_VERBOSE) for more detail")]
    Server { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid --grep pattern: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration(_) => 3,
            Error::Usage(_) | Error::InvalidDate(_) | Error::Pattern(_) => 2,
            Error::Transport(_) | Error::Server { .. } | Error::Decode(_) | Error::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
