//! Zip-packaging implementation of the artifact-compilation port.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use pagekit_core::application::ports::{ArtifactCompiler, CompileError};
use pagekit_core::domain::{
    ArtifactDescriptor, ArtifactStatusReport, PathFilter, WorkspaceLayout,
};

/// Highest descriptor model major version this toolchain can package.
pub const SUPPORTED_MODEL_MAJOR: &str = "2";

/// Packages artifact directories into zip archives.
///
/// Archives are deterministic: entries are added in sorted path order with a
/// fixed timestamp, so compiling the same directory twice yields identical
/// bytes. That keeps targeted builds and tree builds byte-for-byte equal.
pub struct ZipArtifactCompiler {
    workspace: WorkspaceLayout,
    filter: PathFilter,
}

impl ZipArtifactCompiler {
    pub fn new(workspace: WorkspaceLayout) -> Self {
        Self {
            workspace,
            filter: PathFilter::default(),
        }
    }

    fn pack_directory(&self, dir: &Path) -> Result<Vec<u8>, CompileError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| CompileError::Io(e.into()))?;
            let relative = entry
                .path()
                .strip_prefix(dir)
                .map_err(|e| CompileError::Model(e.to_string()))?;
            let entry_name = relative.to_string_lossy().replace('\\', "/");

            if entry.file_type().is_dir() {
                writer
                    .add_directory(format!("{entry_name}/"), options)
                    .map_err(export_error)?;
            } else {
                writer
                    .start_file(entry_name, options)
                    .map_err(export_error)?;
                let bytes = fs::read(entry.path())?;
                writer.write_all(&bytes)?;
            }
        }
        let cursor = writer.finish().map_err(export_error)?;
        debug!(dir = %dir.display(), bytes = cursor.get_ref().len(), "artifact packaged");
        Ok(cursor.into_inner())
    }

    /// Status of the artifact `id` under `root`: it must be a well-shaped
    /// artifact directory with a parseable descriptor whose model version
    /// this toolchain supports.
    fn status_in(&self, root: &Path, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        let artifact_dir = root.join(id);
        let is_artifact = self
            .filter
            .is_artifact_dir(&artifact_dir)
            .map_err(|e| CompileError::Io(std::io::Error::other(e.to_string())))?;
        if !is_artifact {
            return Ok(ArtifactStatusReport::incompatible(format!(
                "no artifact named '{id}' under {}",
                root.display()
            )));
        }

        let descriptor_path = artifact_dir.join(format!("{id}.json"));
        let descriptor = match ArtifactDescriptor::from_file(&descriptor_path) {
            Ok(descriptor) => descriptor,
            Err(e) => return Ok(ArtifactStatusReport::incompatible(e.to_string())),
        };

        match descriptor.model_version.as_deref() {
            None => Ok(ArtifactStatusReport::ok()),
            Some(version) if version.split('.').next() == Some(SUPPORTED_MODEL_MAJOR) => {
                Ok(ArtifactStatusReport::ok())
            }
            Some(version) => Ok(ArtifactStatusReport::incompatible(format!(
                "model version {version} is not supported (expected major version \
                 {SUPPORTED_MODEL_MAJOR})"
            ))),
        }
    }
}

impl ArtifactCompiler for ZipArtifactCompiler {
    fn build(
        &self,
        descriptor: &ArtifactDescriptor,
        artifact_dir: &Path,
    ) -> Result<Vec<u8>, CompileError> {
        info!(kind = %descriptor.kind, name = %descriptor.name, "packaging artifact");
        self.pack_directory(artifact_dir)
    }

    fn build_page(&self, id: &str) -> Result<Vec<u8>, CompileError> {
        let artifact_dir = self.workspace.pages().join(id);
        let is_artifact = self
            .filter
            .is_artifact_dir(&artifact_dir)
            .map_err(|e| CompileError::Io(std::io::Error::other(e.to_string())))?;
        if !is_artifact {
            return Err(CompileError::Model(format!(
                "'{id}' is not an artifact directory under {}",
                self.workspace.pages().display()
            )));
        }
        let descriptor = ArtifactDescriptor::from_file(&artifact_dir.join(format!("{id}.json")))
            .map_err(|e| CompileError::Model(e.to_string()))?;
        self.build(&descriptor, &artifact_dir)
    }

    fn page_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        self.status_in(&self.workspace.pages(), id)
    }

    fn fragment_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        self.status_in(&self.workspace.fragments(), id)
    }

    fn widget_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError> {
        self.status_in(&self.workspace.widgets(), id)
    }
}

fn export_error(e: zip::result::ZipError) -> CompileError {
    CompileError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Read;

    use tempfile::TempDir;

    fn page_artifact(pages: &Path, name: &str, model_version: Option<&str>) {
        let dir = pages.join(name);
        fs::create_dir_all(dir.join("assets")).unwrap();
        let version = model_version
            .map(|v| format!(r#", "modelVersion": "{v}""#))
            .unwrap_or_default();
        fs::write(
            dir.join(format!("{name}.json")),
            format!(r#"{{"type": "page", "name": "{name}"{version}}}"#),
        )
        .unwrap();
        fs::write(dir.join("assets/app.css"), "body {}").unwrap();
    }

    fn compiler(tmp: &TempDir) -> ZipArtifactCompiler {
        let layout = WorkspaceLayout::new(tmp.path());
        fs::create_dir_all(layout.pages()).unwrap();
        ZipArtifactCompiler::new(layout)
    }

    #[test]
    fn packaging_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        page_artifact(&compiler.workspace.pages(), "home", None);

        let first = compiler.build_page("home").unwrap();
        let second = compiler.build_page("home").unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn archive_contains_the_artifact_files() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        page_artifact(&compiler.workspace.pages(), "home", None);

        let bytes = compiler.build_page("home").unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut css = String::new();
        archive
            .by_name("assets/app.css")
            .unwrap()
            .read_to_string(&mut css)
            .unwrap();
        assert_eq!(css, "body {}");
        assert!(archive.by_name("home.json").is_ok());
    }

    #[test]
    fn targeted_build_equals_direct_build() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        let pages = compiler.workspace.pages();
        page_artifact(&pages, "home", None);

        let descriptor =
            ArtifactDescriptor::from_file(&pages.join("home/home.json")).unwrap();
        let direct = compiler.build(&descriptor, &pages.join("home")).unwrap();
        let targeted = compiler.build_page("home").unwrap();
        assert_eq!(direct, targeted);
    }

    #[test]
    fn building_an_unknown_page_is_a_model_error() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        let err = compiler.build_page("ghost").unwrap_err();
        assert!(matches!(err, CompileError::Model(_)));
    }

    #[test]
    fn status_is_compatible_for_supported_model_versions() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        let pages = compiler.workspace.pages();
        page_artifact(&pages, "plain", None);
        page_artifact(&pages, "versioned", Some("2.6"));

        assert!(compiler.page_status("plain").unwrap().compatible);
        assert!(compiler.page_status("versioned").unwrap().compatible);
    }

    #[test]
    fn status_rejects_unsupported_model_versions() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        page_artifact(&compiler.workspace.pages(), "future", Some("3.0"));

        let report = compiler.page_status("future").unwrap();
        assert!(!report.compatible);
        assert!(report.detail.unwrap().contains("3.0"));
    }

    #[test]
    fn status_rejects_missing_artifacts() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        let report = compiler.page_status("ghost").unwrap();
        assert!(!report.compatible);
    }

    #[test]
    fn status_rejects_malformed_descriptors() {
        let tmp = TempDir::new().unwrap();
        let compiler = compiler(&tmp);
        let dir = compiler.workspace.pages().join("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.json"), "{not json").unwrap();

        let report = compiler.page_status("broken").unwrap();
        assert!(!report.compatible);
    }
}
