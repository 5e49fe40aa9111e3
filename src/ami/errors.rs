/// Errors from the AMI retrieval layer.
use std::path::PathBuf;

use thiserror::Error;

use crate::ec2::Ec2Error;

/// Everything that can abort `retrieve`. No variant is recoverable.
#[derive(Debug, Error)]
pub enum AmiError {
    /// Either lookup failed.
    #[error(transparent)]
    Lookup(#[from] Ec2Error),

    /// The record could not be serialized.
    #[error("Could not render AMI info as YAML")]
    Yaml(#[from] serde_yaml::Error),

    /// The output file could not be written.
    #[error("Could not write AMI info to '{}'", path.display())]
    Write {
        /// Target passed via `--out_file`.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard output was closed or otherwise unwritable.
    #[error("Could not write AMI info to stdout")]
    Stdout(#[source] std::io::Error),
}

impl AmiError {
    /// Return the CLI exit code for this error. Every failure is fatal and
    /// reported the same way.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Lookup(_) | Self::Yaml(_) | Self::Write { .. } | Self::Stdout(_) => 1,
        }
    }
}
