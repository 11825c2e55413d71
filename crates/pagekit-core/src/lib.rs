//! Pagekit Core - artifact discovery, validation, and build pipeline.
//!
//! This crate provides the domain and application layers for the Pagekit
//! build tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pagekit-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Layer               │
//! │  (BuildPipeline, ValidationTasks,       │
//! │   ArtifactScanner, tree walker)         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (ArtifactCompiler, XmlValidator)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    pagekit-adapters (Infrastructure)    │
//! │  (ZipArtifactCompiler, XSD validator)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (PathFilter, ArtifactDescriptor,       │
//! │   WorkspaceLayout, status reports)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pagekit_core::{
//!     application::BuildPipeline,
//!     domain::WorkspaceLayout,
//! };
//!
//! # fn demo(compiler: &dyn pagekit_core::application::ports::ArtifactCompiler) {
//! let workspace = WorkspaceLayout::new("/path/to/project");
//! let pipeline = BuildPipeline::new(compiler, workspace, "/path/to/target/pages");
//! pipeline.build_all().unwrap();
//! # }
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Unified error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactScanner, BuildPipeline, StatusProbe, UidValidationTask, ValidationTask,
        XmlValidationTask,
        ports::{ArtifactCompiler, XmlValidator, XmlValidatorFactory},
    };
    pub use crate::domain::{
        ArtifactDescriptor, ArtifactKind, ArtifactStatusReport, PathFilter, WorkspaceLayout,
    };
    pub use crate::error::{CoreError, CoreResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
