//! Workspace layout: where artifact roots live inside a project.

use std::path::{Path, PathBuf};

/// Default folder names, matching what the studio writes out.
pub const DEFAULT_PAGES_DIR: &str = "web_page";
pub const DEFAULT_FRAGMENTS_DIR: &str = "web_fragments";
pub const DEFAULT_WIDGETS_DIR: &str = "web_widgets";

/// Resolves artifact roots relative to a project base directory.
///
/// Folder names are configurable because older projects renamed them; the
/// defaults match a freshly scaffolded workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
    pages_dir: String,
    fragments_dir: String,
    widgets_dir: String,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pages_dir: DEFAULT_PAGES_DIR.to_owned(),
            fragments_dir: DEFAULT_FRAGMENTS_DIR.to_owned(),
            widgets_dir: DEFAULT_WIDGETS_DIR.to_owned(),
        }
    }

    pub fn with_pages_dir(mut self, name: impl Into<String>) -> Self {
        self.pages_dir = name.into();
        self
    }

    pub fn with_fragments_dir(mut self, name: impl Into<String>) -> Self {
        self.fragments_dir = name.into();
        self
    }

    pub fn with_widgets_dir(mut self, name: impl Into<String>) -> Self {
        self.widgets_dir = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The pages artifact root.
    pub fn pages(&self) -> PathBuf {
        self.root.join(&self.pages_dir)
    }

    /// The fragments artifact root.
    pub fn fragments(&self) -> PathBuf {
        self.root.join(&self.fragments_dir)
    }

    /// The widgets artifact root.
    pub fn widgets(&self) -> PathBuf {
        self.root.join(&self.widgets_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_uses_studio_folder_names() {
        let layout = WorkspaceLayout::new("/project");
        assert_eq!(layout.pages(), PathBuf::from("/project/web_page"));
        assert_eq!(layout.fragments(), PathBuf::from("/project/web_fragments"));
        assert_eq!(layout.widgets(), PathBuf::from("/project/web_widgets"));
    }

    #[test]
    fn folder_names_are_overridable() {
        let layout = WorkspaceLayout::new("/project").with_pages_dir("pages");
        assert_eq!(layout.pages(), PathBuf::from("/project/pages"));
        assert_eq!(layout.widgets(), PathBuf::from("/project/web_widgets"));
    }
}
