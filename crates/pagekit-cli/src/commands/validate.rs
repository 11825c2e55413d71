//! `pagekit validate` command handler.
//!
//! Runs the XML schema tasks over the workspace configuration folders,
//! then the UID compatibility tasks over the artifact roots. Tasks run in
//! a fixed order and the command stops at the first failure.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, instrument, warn};

use pagekit_adapters::{SchemaValidatorFactory, ZipArtifactCompiler};
use pagekit_core::application::ports::XmlValidatorFactory;
use pagekit_core::application::{
    ApplicationError, StatusProbe, UidValidationTask, ValidationTask, XmlValidationTask,
};
use pagekit_core::error::CoreError;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::build::{resolve_workspace, workspace_layout};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// BDM folders hold exactly one `bom.xml`; everything else is ignored.
static BOM_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^bom\.xml$").expect("bom pattern must compile"));

/// The access control definition sits next to `bom.xml` under its own name.
static ACCESS_CONTROL_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^bdm_access_control\.xml$").expect("access control pattern must compile")
});

/// Organization exports use their own extension instead of `.xml`.
static ORGANIZATION_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*\.organization$").expect("organization pattern must compile"));

/// One XML validation to set up: task name, source folder relative to the
/// workspace, schema file name, and an optional file-name restriction.
struct XmlTaskSpec {
    name: &'static str,
    source_dir: &'static str,
    schema_file: &'static str,
    file_pattern: Option<&'static LazyLock<Regex>>,
}

static XML_TASKS: &[XmlTaskSpec] = &[
    XmlTaskSpec {
        name: "applications validation",
        source_dir: "app/applications",
        schema_file: "application.xsd",
        file_pattern: None,
    },
    XmlTaskSpec {
        name: "profiles validation",
        source_dir: "app/profiles",
        schema_file: "profiles.xsd",
        file_pattern: None,
    },
    XmlTaskSpec {
        name: "business data model validation",
        source_dir: "bdm",
        schema_file: "bom.xsd",
        file_pattern: Some(&BOM_FILE),
    },
    XmlTaskSpec {
        name: "BDM access control validation",
        source_dir: "bdm",
        schema_file: "bdm-access-control.xsd",
        file_pattern: Some(&ACCESS_CONTROL_FILE),
    },
    XmlTaskSpec {
        name: "organizations validation",
        source_dir: "app/organizations",
        schema_file: "organization.xsd",
        file_pattern: Some(&ORGANIZATION_FILE),
    },
];

#[instrument(skip_all)]
pub fn execute(
    args: ValidateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = resolve_workspace(args.workspace.as_deref(), &config)?;
    let layout = workspace_layout(&root, None, &config);

    let schema_dir = args
        .schema_dir
        .clone()
        .unwrap_or_else(|| config.validation.schema_dir.clone());
    let schema_dir = if schema_dir.is_absolute() {
        schema_dir
    } else {
        root.join(schema_dir)
    };

    output.header(&format!("Validating workspace {}", root.display()))?;

    let factory = SchemaValidatorFactory::new();
    for spec in XML_TASKS {
        let schema = schema_dir.join(spec.schema_file);
        if !schema.is_file() {
            warn!(task = spec.name, schema = %schema.display(), "schema missing, task skipped");
            output.warning(&format!(
                "{}: schema {} not found, skipping",
                spec.name,
                schema.display()
            ))?;
            continue;
        }
        let validator = factory
            .compile(&schema)
            .map_err(|e| CliError::ConfigError {
                message: format!("failed to compile schema {}", schema.display()),
                source: Some(Box::new(e)),
            })?;
        let source_dir = root.join(spec.source_dir);
        let task = match spec.file_pattern {
            Some(pattern) => XmlValidationTask::with_pattern(
                spec.name,
                validator,
                source_dir,
                (*pattern).clone(),
            ),
            None => XmlValidationTask::new(spec.name, validator, source_dir),
        };
        run_task(&task, &output)?;
    }

    if args.skip_uid {
        info!("UID compatibility checks skipped");
        output.info("UID compatibility checks skipped")?;
    } else {
        let compiler = ZipArtifactCompiler::new(layout.clone());
        let probes = [
            (StatusProbe::Page, layout.pages()),
            (StatusProbe::Fragment, layout.fragments()),
            (StatusProbe::Widget, layout.widgets()),
        ];
        for (probe, source_dir) in probes {
            let task = UidValidationTask::new(probe, &compiler, source_dir);
            run_task(&task, &output)?;
        }
    }

    output.success("Workspace is valid")?;
    Ok(())
}

fn run_task(task: &dyn ValidationTask, output: &OutputManager) -> CliResult<()> {
    info!(task = task.name(), "running validation task");
    match task.validate() {
        Ok(()) => {
            output.print(&format!("  {} passed", task.name()))?;
            Ok(())
        }
        Err(e) => {
            output.error(&format!("  {} failed", task.name()))?;
            Err(CliError::Core(CoreError::from(ApplicationError::from(e))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_pattern_matches_only_the_bom_file() {
        assert!(BOM_FILE.is_match("bom.xml"));
        assert!(!BOM_FILE.is_match("bom.xml.bak"));
        assert!(!BOM_FILE.is_match("other.xml"));
    }

    #[test]
    fn organization_pattern_matches_the_extension() {
        assert!(ORGANIZATION_FILE.is_match("acme.organization"));
        assert!(!ORGANIZATION_FILE.is_match("acme.xml"));
    }

    #[test]
    fn access_control_pattern_matches_only_the_definition_file() {
        assert!(ACCESS_CONTROL_FILE.is_match("bdm_access_control.xml"));
        assert!(!ACCESS_CONTROL_FILE.is_match("bom.xml"));
        assert!(!ACCESS_CONTROL_FILE.is_match("bdm_access_control.xml.bak"));
    }

    #[test]
    fn both_bdm_tasks_are_registered() {
        let names: Vec<_> = XML_TASKS.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "applications validation",
                "profiles validation",
                "business data model validation",
                "BDM access control validation",
                "organizations validation",
            ]
        );
        let bdm: Vec<_> = XML_TASKS.iter().filter(|s| s.source_dir == "bdm").collect();
        assert_eq!(bdm.len(), 2);
    }

    #[test]
    fn every_xml_task_has_a_distinct_schema() {
        let mut schemas: Vec<_> = XML_TASKS.iter().map(|s| s.schema_file).collect();
        schemas.sort_unstable();
        schemas.dedup();
        assert_eq!(schemas.len(), XML_TASKS.len());
    }
}
