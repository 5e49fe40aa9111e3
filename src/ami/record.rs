/// Building and rendering the AMI info record.
use crate::types::AmiInfo;

use super::AmiError;

/// YAML document-start marker; the consumers expect an explicit one.
const DOCUMENT_START: &str = "---\n";

/// Pick the id that ends up in the record: a non-empty override wins.
#[must_use]
pub fn resolve_override<'a>(edp_ami_id: &'a str, override_ami: Option<&'a str>) -> &'a str {
    match override_ami {
        Some(id) if !id.is_empty() => id,
        _ => edp_ami_id,
    }
}

/// Render `info` as a block-style YAML document with a leading `---`.
///
/// # Errors
///
/// Returns `AmiError::Yaml` if serialization fails.
pub fn render_yaml(info: &AmiInfo) -> Result<String, AmiError> {
    let body = serde_yaml::to_string(info)?;
    Ok(format!("{DOCUMENT_START}{body}"))
}
