//! Domain layer: pure artifact concepts with no orchestration logic.
//!
//! Everything here is either a value type or a predicate over a filesystem
//! snapshot. Orchestration (scanning roots, walking trees, running tasks)
//! lives in [`crate::application`].

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod status;
pub mod workspace;

pub use descriptor::{ArtifactDescriptor, ArtifactKind};
pub use error::DomainError;
pub use filter::PathFilter;
pub use status::ArtifactStatusReport;
pub use workspace::WorkspaceLayout;
