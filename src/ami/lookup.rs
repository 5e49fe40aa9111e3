/// The two queries the `retrieve` command needs from the cloud provider.
use std::collections::BTreeMap;

use crate::ec2::Ec2Error;
use crate::types::Edp;

/// Source of AMI facts. Implemented by the EC2 client and by test stubs.
pub trait AmiLookup {
    /// Return the image id currently running for `edp`.
    ///
    /// # Errors
    ///
    /// Returns `Ec2Error::ImageNotFound` when nothing is running,
    /// `Ec2Error::MultipleImagesFound` when the running instances disagree,
    /// or any transport error.
    fn active_ami_for_edp(&self, edp: &Edp) -> Result<String, Ec2Error>;

    /// Return every tag on `ami_id` as a key/value map.
    ///
    /// # Errors
    ///
    /// Returns `Ec2Error::ImageNotFound` for an unknown id, or any transport error.
    fn tags_for_ami(&self, ami_id: &str) -> Result<BTreeMap<String, String>, Ec2Error>;
}
