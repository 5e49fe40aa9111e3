/// `retrieve` command: resolve the active AMI for an EDP and emit it as YAML.
use tracing::{debug, info};

use crate::ami::{AmiError, AmiLookup, render_yaml, resolve_override};
use crate::cli::{Cli, emit};
use crate::types::AmiInfo;

/// Run the lookup and write the YAML record.
///
/// The tag lookup always uses the EDP's own image, even when `--override`
/// replaces the id in the record. Output is only written once both lookups
/// have succeeded.
///
/// # Errors
///
/// Returns `AmiError` on lookup failure, serialization failure, or I/O failure.
pub fn run(args: &Cli, lookup: &impl AmiLookup) -> Result<(), AmiError> {
    let edp = args.edp();

    let edp_ami_id = lookup.active_ami_for_edp(&edp)?;
    let ami_id = resolve_override(&edp_ami_id, args.override_ami.as_deref());

    let mut ami_info = AmiInfo::new(ami_id);
    ami_info.merge_tags(lookup.tags_for_ami(&edp_ami_id)?);
    debug!(keys = ami_info.len(), "merged AMI tags");
    info!("Found active AMI ID for {edp}: {ami_id}");

    let document = render_yaml(&ami_info)?;
    emit(&document, args.out_path())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use clap::Parser;

    use super::*;
    use crate::ec2::Ec2Error;
    use crate::types::{AMI_ID_KEY, BASE_AMI_ID_KEY, Edp};

    /// Which lookup the stub should fail.
    #[derive(Clone, Copy, PartialEq)]
    enum FailAt {
        Nothing,
        ActiveAmi,
        Tags,
    }

    struct StubLookup {
        ami_id: &'static str,
        tags: Vec<(&'static str, &'static str)>,
        fail_at: FailAt,
        edp_calls: RefCell<Vec<Edp>>,
        tag_calls: RefCell<Vec<String>>,
    }

    impl StubLookup {
        fn new(ami_id: &'static str, tags: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                ami_id,
                tags,
                fail_at: FailAt::Nothing,
                edp_calls: RefCell::new(Vec::new()),
                tag_calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(fail_at: FailAt) -> Self {
            Self {
                fail_at,
                ..Self::new("ami-123", vec![])
            }
        }
    }

    impl AmiLookup for StubLookup {
        fn active_ami_for_edp(&self, edp: &Edp) -> Result<String, Ec2Error> {
            self.edp_calls.borrow_mut().push(edp.clone());
            if self.fail_at == FailAt::ActiveAmi {
                return Err(Ec2Error::MultipleImagesFound {
                    edp: edp.to_string(),
                    images: vec!["ami-1".to_owned(), "ami-2".to_owned()],
                });
            }
            Ok(self.ami_id.to_owned())
        }

        fn tags_for_ami(&self, ami_id: &str) -> Result<BTreeMap<String, String>, Ec2Error> {
            self.tag_calls.borrow_mut().push(ami_id.to_owned());
            if self.fail_at == FailAt::Tags {
                return Err(Ec2Error::ImageNotFound {
                    reason: format!("{ami_id}: no such image"),
                });
            }
            Ok(self
                .tags
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect())
        }
    }

    fn cli(out_file: &std::path::Path, extra: &[&str]) -> Cli {
        let mut argv = vec![
            "retrieve-base-ami",
            "-e",
            "prod",
            "-d",
            "edx",
            "-p",
            "edxapp",
            "--out_file",
            out_file.to_str().unwrap(),
        ];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap()
    }

    fn read_info(path: &std::path::Path) -> AmiInfo {
        serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_record_without_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::new("ami-123", vec![("Name", "x")]);

        run(&cli(&path, &[]), &lookup).unwrap();

        let mut expected = AmiInfo::new("ami-123");
        expected.merge_tags([("Name".to_owned(), "x".to_owned())]);
        assert_eq!(read_info(&path), expected);
        assert_eq!(lookup.edp_calls.borrow()[0].to_string(), "prod-edx-edxapp");
    }

    #[test]
    fn test_override_replaces_id_but_not_tag_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::new("ami-123", vec![("Name", "x")]);

        run(&cli(&path, &["--override", "ami-999"]), &lookup).unwrap();

        let info = read_info(&path);
        assert_eq!(info.get(BASE_AMI_ID_KEY), Some("ami-999"));
        assert_eq!(info.get(AMI_ID_KEY), Some("ami-999"));
        assert_eq!(info.get("Name"), Some("x"));
        assert_eq!(*lookup.tag_calls.borrow(), vec!["ami-123".to_owned()]);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::new("ami-123", vec![]);

        run(&cli(&path, &["--override", ""]), &lookup).unwrap();

        assert_eq!(read_info(&path), AmiInfo::new("ami-123"));
    }

    #[test]
    fn test_tags_overwrite_id_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::new("ami-123", vec![("base_ami_id", "ami-parent")]);

        run(&cli(&path, &["--override", "ami-999"]), &lookup).unwrap();

        let info = read_info(&path);
        assert_eq!(info.get(BASE_AMI_ID_KEY), Some("ami-parent"));
        assert_eq!(info.get(AMI_ID_KEY), Some("ami-999"));
    }

    #[test]
    fn test_file_matches_rendered_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::new("ami-123", vec![("Name", "x"), ("play", "edxapp")]);

        run(&cli(&path, &[]), &lookup).unwrap();

        let mut expected = AmiInfo::new("ami-123");
        expected.merge_tags([
            ("Name".to_owned(), "x".to_owned()),
            ("play".to_owned(), "edxapp".to_owned()),
        ]);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            render_yaml(&expected).unwrap()
        );
    }

    #[test]
    fn test_active_lookup_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::failing(FailAt::ActiveAmi);

        let err = run(&cli(&path, &[]), &lookup).unwrap_err();

        assert!(matches!(
            err,
            AmiError::Lookup(Ec2Error::MultipleImagesFound { .. })
        ));
        assert_eq!(err.exit_code(), 1);
        assert!(lookup.tag_calls.borrow().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_tag_lookup_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ami.yml");
        let lookup = StubLookup::failing(FailAt::Tags);

        let err = run(&cli(&path, &[]), &lookup).unwrap_err();

        assert!(matches!(err, AmiError::Lookup(Ec2Error::ImageNotFound { .. })));
        assert_eq!(err.exit_code(), 1);
        assert!(!path.exists());
    }
}
