use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no convergence after {iterations} passes (max delta {max_delta:e})")]
    NonConvergence { iterations: usize, max_delta: f64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!("damping={damping}, expected in (0, 1)")))
    }
}
