use std::io;
use std::process::ExitStatus;

use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("{_0}")]
    Diff(#[from] diffexfat::error::Error),
    #[display("open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[display("{command}: {source}")]
    Spawn { command: String, source: io::Error },
    #[display("{command} exited with {status}")]
    Status { command: String, status: ExitStatus },
    #[display("{_0}")]
    IO(#[from] io::Error),
    #[display("{_0}")]
    String(&'static str),
}

impl From<diffexfat::error::LayoutError> for Error {
    fn from(error: diffexfat::error::LayoutError) -> Self {
        Self::Diff(error.into())
    }
}
