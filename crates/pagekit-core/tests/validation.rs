//! Integration tests for the validation tasks, using recording doubles for
//! the XML validator and the status capability.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use regex::Regex;
use tempfile::TempDir;

use pagekit_core::application::ports::{
    ArtifactCompiler, CompileError, XmlError, XmlValidator,
};
use pagekit_core::application::{
    StatusProbe, UidValidationTask, ValidationError, ValidationTask, XmlValidationTask,
};
use pagekit_core::domain::{ArtifactDescriptor, ArtifactStatusReport};

/// XML validator double that records visit order and rejects listed names.
#[derive(Debug, Default)]
struct RecordingValidator {
    invalid: Vec<String>,
    seen: Mutex<Vec<String>>,
}

impl RecordingValidator {
    fn rejecting(names: &[&str]) -> Self {
        Self {
            invalid: names.iter().map(|n| (*n).to_owned()).collect(),
            ..Self::default()
        }
    }
}

impl XmlValidator for RecordingValidator {
    fn validate(&self, document: &Path) -> Result<(), XmlError> {
        let name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.seen.lock().unwrap().push(name.clone());
        if self.invalid.contains(&name) {
            return Err(XmlError::Invalid(format!("{name} violates the schema")));
        }
        Ok(())
    }
}

/// Shared handle so the test can inspect visit order after the task takes
/// ownership of the validator box.
#[derive(Debug)]
struct SharedValidator(std::sync::Arc<RecordingValidator>);

impl XmlValidator for SharedValidator {
    fn validate(&self, document: &Path) -> Result<(), XmlError> {
        self.0.validate(document)
    }
}

fn shared(validator: RecordingValidator) -> (std::sync::Arc<RecordingValidator>, Box<dyn XmlValidator>) {
    let inner = std::sync::Arc::new(validator);
    (inner.clone(), Box::new(SharedValidator(inner)))
}

#[test]
fn xml_files_are_validated_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("b.xml"), "<b/>").unwrap();
    fs::write(tmp.path().join("a.xml"), "<a/>").unwrap();

    let (inner, validator) = shared(RecordingValidator::default());
    let task = XmlValidationTask::new("Applications", validator, tmp.path());
    task.validate().unwrap();

    assert_eq!(*inner.seen.lock().unwrap(), vec!["a.xml", "b.xml"]);
}

#[test]
fn first_schema_violation_stops_the_task() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("b.xml"), "<b/>").unwrap();
    fs::write(tmp.path().join("a.xml"), "<a/>").unwrap();

    let (inner, validator) = shared(RecordingValidator::rejecting(&["a.xml"]));
    let task = XmlValidationTask::new("Applications", validator, tmp.path());
    let err = task.validate().unwrap_err();

    match err {
        ValidationError::InvalidFile { file, .. } => assert_eq!(file, "a.xml"),
        other => panic!("unexpected error: {other:?}"),
    }
    // b.xml sorts after the failing file and must never be checked.
    assert_eq!(*inner.seen.lock().unwrap(), vec!["a.xml"]);
}

#[test]
fn source_file_pattern_restricts_selection() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bom.xml"), "<bom/>").unwrap();
    fs::write(tmp.path().join("other.xml"), "<other/>").unwrap();

    let (inner, validator) = shared(RecordingValidator::default());
    let task = XmlValidationTask::with_pattern(
        "Business data model",
        validator,
        tmp.path(),
        Regex::new(r"^bom\.xml$").unwrap(),
    );
    task.validate().unwrap();

    assert_eq!(*inner.seen.lock().unwrap(), vec!["bom.xml"]);
}

#[test]
fn non_xml_files_are_ignored_by_default() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("readme.txt"), "hello").unwrap();
    fs::write(tmp.path().join("app.xml"), "<app/>").unwrap();

    let (inner, validator) = shared(RecordingValidator::default());
    XmlValidationTask::new("Applications", validator, tmp.path())
        .validate()
        .unwrap();

    assert_eq!(*inner.seen.lock().unwrap(), vec!["app.xml"]);
}

#[test]
fn missing_source_directory_means_nothing_to_validate() {
    let tmp = TempDir::new().unwrap();
    let (inner, validator) = shared(RecordingValidator::default());
    XmlValidationTask::new("Applications", validator, tmp.path().join("absent"))
        .validate()
        .unwrap();
    assert!(inner.seen.lock().unwrap().is_empty());
}

// ── UID compatibility ─────────────────────────────────────────────────────

/// Status capability double; build paths are unused by these tests.
#[derive(Default)]
struct StatusCompiler {
    statuses: HashMap<String, ArtifactStatusReport>,
    queried: Mutex<Vec<String>>,
}

impl StatusCompiler {
    fn with_status(mut self, id: &str, report: ArtifactStatusReport) -> Self {
        self.statuses.insert(id.to_owned(), report);
        self
    }
}

impl ArtifactCompiler for StatusCompiler {
    fn build(
        &self,
        _descriptor: &ArtifactDescriptor,
        _artifact_dir: &Path,
    ) -> Result<Vec<u8>, CompileError> {
        Err(CompileError::Model("not under test".into()))
    }

    fn build_page(&self, _id: &str) -> Result<Vec<u8>, CompileError> {
        Err(CompileError::Model("not under test".into()))
    }

    fn page_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        self.queried.lock().unwrap().push(id.to_owned());
        Ok(self
            .statuses
            .get(id)
            .cloned()
            .unwrap_or_else(ArtifactStatusReport::ok))
    }

    fn fragment_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        self.page_status(id)
    }

    fn widget_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        self.page_status(id)
    }
}

fn add_artifact(root: &Path, name: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{name}.json")),
        format!(r#"{{"type": "page", "name": "{name}"}}"#),
    )
    .unwrap();
}

#[test]
fn compatible_artifacts_pass_uid_validation() {
    let tmp = TempDir::new().unwrap();
    add_artifact(tmp.path(), "home");
    add_artifact(tmp.path(), "checkout");

    let compiler = StatusCompiler::default();
    UidValidationTask::new(StatusProbe::Page, &compiler, tmp.path())
        .validate()
        .unwrap();

    // Sorted enumeration, both queried.
    assert_eq!(*compiler.queried.lock().unwrap(), vec!["checkout", "home"]);
}

#[test]
fn first_incompatible_artifact_stops_the_task() {
    let tmp = TempDir::new().unwrap();
    add_artifact(tmp.path(), "beta");
    add_artifact(tmp.path(), "alpha");

    let compiler = StatusCompiler::default()
        .with_status("alpha", ArtifactStatusReport::incompatible("migration required"));
    let err = UidValidationTask::new(StatusProbe::Page, &compiler, tmp.path())
        .validate()
        .unwrap_err();

    match err {
        ValidationError::IncompatibleArtifact {
            artifact, detail, ..
        } => {
            assert_eq!(artifact, "alpha");
            assert_eq!(detail, "migration required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // beta sorts after the failing artifact and must never be queried.
    assert_eq!(*compiler.queried.lock().unwrap(), vec!["alpha"]);
}

#[test]
fn excluded_directories_are_not_status_checked() {
    let tmp = TempDir::new().unwrap();
    add_artifact(tmp.path(), ".metadata");
    add_artifact(tmp.path(), "pbProvided");
    add_artifact(tmp.path(), "home");

    let compiler = StatusCompiler::default();
    UidValidationTask::new(StatusProbe::Page, &compiler, tmp.path())
        .validate()
        .unwrap();

    assert_eq!(*compiler.queried.lock().unwrap(), vec!["home"]);
}

#[test]
fn missing_artifact_root_means_nothing_to_validate() {
    let tmp = TempDir::new().unwrap();
    let compiler = StatusCompiler::default();
    UidValidationTask::new(StatusProbe::Widget, &compiler, tmp.path().join("absent"))
        .validate()
        .unwrap();
    assert!(compiler.queried.lock().unwrap().is_empty());
}

#[test]
fn probe_names_identify_the_artifact_kind() {
    assert_eq!(StatusProbe::Page.task_name(), "UID pages validation");
    assert_eq!(StatusProbe::Fragment.task_name(), "UID fragments validation");
    assert_eq!(StatusProbe::Widget.task_name(), "UID widgets validation");
}
