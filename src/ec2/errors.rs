/// Errors from the EC2 lookup layer.
use thiserror::Error;

/// Typed errors from the EC2 layer.
#[derive(Debug, Error)]
pub enum Ec2Error {
    /// No image could be found for the query (no running instances, unknown AMI id).
    #[error("No AMI found: {reason}")]
    ImageNotFound {
        /// What was searched and why it came back empty.
        reason: String,
    },

    /// Running instances for one EDP disagree on their image.
    #[error("Multiple AMIs found for {edp}: {}", images.join(", "))]
    MultipleImagesFound {
        /// The `env-dep-play` triple that was searched.
        edp: String,
        /// Every distinct image id seen, sorted.
        images: Vec<String>,
    },

    /// Any other failure reported by the SDK (auth, throttling, network).
    #[error("EC2 API request failed")]
    Api(#[source] Box<aws_sdk_ec2::Error>),

    /// The async runtime that drives the SDK could not be started.
    #[error("Could not start the AWS client runtime")]
    Runtime(#[source] std::io::Error),
}

impl From<aws_sdk_ec2::Error> for Ec2Error {
    fn from(err: aws_sdk_ec2::Error) -> Self {
        Self::Api(Box::new(err))
    }
}
