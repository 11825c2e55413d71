//! `pagekit build` command handler.
//!
//! Resolves the workspace layout from flags and config, then drives the
//! core build pipeline with the zip compiler adapter. `--page <ID>` builds
//! one page directly instead of walking the whole tree.

use std::fs;
use std::path::PathBuf;

use tracing::{info, instrument};

use pagekit_adapters::ZipArtifactCompiler;
use pagekit_core::application::BuildPipeline;
use pagekit_core::domain::WorkspaceLayout;

use crate::cli::{BuildArgs, GlobalArgs};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all)]
pub fn execute(
    args: BuildArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = resolve_workspace(args.workspace.as_deref(), &config)?;
    let layout = workspace_layout(&root, args.pages_dir.as_deref(), &config);

    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| config.build.output_dir.clone());
    let output_root = if output_root.is_absolute() {
        output_root
    } else {
        root.join(output_root)
    };
    // Page archives go into their own subfolder so the output root can be
    // shared with other build products.
    let archive_dir = output_root.join("pages");

    info!(
        workspace = %root.display(),
        output = %archive_dir.display(),
        "starting artifact build"
    );
    output.header(&format!("Building artifacts in {}", root.display()))?;

    let compiler = ZipArtifactCompiler::new(layout.clone());

    // CLI selectors win over config selectors; empty lists keep the
    // pipeline defaults.
    let includes = if args.includes.is_empty() {
        config.build.includes.clone()
    } else {
        args.includes.clone()
    };
    let excludes = if args.excludes.is_empty() {
        config.build.excludes.clone()
    } else {
        args.excludes.clone()
    };

    let pipeline = BuildPipeline::new(&compiler, layout, &archive_dir)
        .with_selectors(includes, excludes);

    match &args.page {
        Some(id) => {
            let bytes = pipeline.build_one(id).map_err(pagekit_core::error::CoreError::from)?;
            fs::create_dir_all(&archive_dir)?;
            let target = archive_dir.join(format!("page_{id}.zip"));
            fs::write(&target, bytes)?;
            output.success(&format!("Built page '{id}' into {}", target.display()))?;
        }
        None => {
            pipeline
                .build_all()
                .map_err(pagekit_core::error::CoreError::from)?;
            output.success(&format!("Archives written to {}", archive_dir.display()))?;
        }
    }

    Ok(())
}

/// Workspace root: flag, then config, then the current directory.
/// Whatever wins must exist on disk.
pub(crate) fn resolve_workspace(
    flag: Option<&std::path::Path>,
    config: &AppConfig,
) -> CliResult<PathBuf> {
    let root = match flag {
        Some(path) => path.to_path_buf(),
        None => match &config.workspace.root {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        },
    };
    if !root.is_dir() {
        return Err(CliError::WorkspaceNotFound { path: root });
    }
    Ok(root)
}

/// Layout for `root`, honouring the configured folder names with the
/// `--pages-dir` flag on top.
pub(crate) fn workspace_layout(
    root: &std::path::Path,
    pages_dir_flag: Option<&str>,
    config: &AppConfig,
) -> WorkspaceLayout {
    let pages_dir = pages_dir_flag.unwrap_or(&config.workspace.pages_dir);
    WorkspaceLayout::new(root)
        .with_pages_dir(pages_dir)
        .with_fragments_dir(&config.workspace.fragments_dir)
        .with_widgets_dir(&config.workspace.widgets_dir)
}
