/// CLI argument definitions via clap derive.
use std::path::Path;

use clap::Parser;

use crate::types::Edp;

/// retrieve-base-ami — find the active base AMI for an environment/deployment/play.
#[derive(Debug, Parser)]
#[command(
    name = "retrieve-base-ami",
    about = "Retrieve the last base AMI ID used for an environment/deployment/play",
    version
)]
pub struct Cli {
    /// Environment for AMI, e.g. prod, stage.
    #[arg(long, short = 'e')]
    pub environment: String,

    /// Deployment for AMI, e.g. edx, edge.
    #[arg(long, short = 'd')]
    pub deployment: String,

    /// Play for AMI, e.g. edxapp, insights, discovery.
    #[arg(long, short = 'p')]
    pub play: String,

    /// Override AMI id to use.
    #[arg(long = "override", value_name = "AMI_ID")]
    pub override_ami: Option<String>,

    /// Output file for the AMI information YAML (default: stdout).
    // String, not PathBuf: clap's path parser rejects "", which means stdout.
    #[arg(long = "out_file", value_name = "PATH")]
    pub out_file: Option<String>,

    /// AWS region to query instead of the one from the environment/profile.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,
}

impl Cli {
    /// The lookup key built from the three required flags.
    #[must_use]
    pub fn edp(&self) -> Edp {
        Edp {
            environment: self.environment.clone(),
            deployment: self.deployment.clone(),
            play: self.play.clone(),
        }
    }

    /// The output path, treating an empty `--out_file` as "use stdout".
    #[must_use]
    pub fn out_path(&self) -> Option<&Path> {
        self.out_file
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
    }
}
