/// Shared types: the EDP lookup key and the serializable AMI record.
///
/// `AmiInfo` is what gets written out as YAML. It is a sorted string map so
/// that the document is identical from run to run.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key consumed by the ansible play that builds from the base image.
pub const BASE_AMI_ID_KEY: &str = "base_ami_id";
/// Key matching the one the AMI-creation play emits, for release pages.
pub const AMI_ID_KEY: &str = "ami_id";

/// Environment/Deployment/Play triple identifying a service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edp {
    pub environment: String,
    pub deployment: String,
    pub play: String,
}

impl fmt::Display for Edp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.environment, self.deployment, self.play)
    }
}

/// Flat AMI information record: the resolved id plus the image's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmiInfo(BTreeMap<String, String>);

impl AmiInfo {
    /// Start a record with both id keys set to `ami_id`.
    #[must_use]
    pub fn new(ami_id: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(BASE_AMI_ID_KEY.to_owned(), ami_id.to_owned());
        map.insert(AMI_ID_KEY.to_owned(), ami_id.to_owned());
        Self(map)
    }

    /// Merge tags into the record. Tags win over keys already present,
    /// including the two id keys.
    pub fn merge_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.0.extend(tags);
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
impl AmiInfo {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}
