//! Project discovery and data-directory layout

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::RecordKind;

/// Represents a gcPanel project directory
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .gcpanel/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let marker = current.join(".gcpanel");
            if marker.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let marker = root.join(".gcpanel");
        if marker.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        Self::create_structure(&root)?;
        Ok(Self { root })
    }

    /// Force initialization even if .gcpanel/ exists
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::create_structure(&root)?;
        Ok(Self { root })
    }

    fn create_structure(root: &Path) -> Result<(), ProjectError> {
        let marker = root.join(".gcpanel");
        std::fs::create_dir_all(&marker).map_err(|e| ProjectError::IoError(e.to_string()))?;

        let config_path = marker.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        for dir in ["data/contracts", "data/settings"] {
            std::fs::create_dir_all(root.join(dir))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# gcPanel Project Configuration

# Project name stamped onto new records
# project_name: "Highland Tower Development"

# Default author for new records (can be overridden by global config)
# author: ""

# Default output format (auto, json, tsv, csv, md, id)
# default_format: auto
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .gcpanel configuration directory
    pub fn gcpanel_dir(&self) -> PathBuf {
        self.root.join(".gcpanel")
    }

    /// Get the JSON data file for a record kind.
    ///
    /// One file per entity type, each holding a JSON array of flat objects.
    /// The settings kinds are session-scoped in the running application, but
    /// their paths are still defined so exports land in a known place.
    pub fn data_file(&self, kind: RecordKind) -> PathBuf {
        self.root.join(Self::data_file_relative(kind))
    }

    /// Relative path of the data file for a record kind
    pub fn data_file_relative(kind: RecordKind) -> &'static str {
        match kind {
            RecordKind::Contract => "data/contracts/contracts.json",
            RecordKind::ChangeOrder => "data/contracts/change_orders.json",
            RecordKind::Subcontract => "data/contracts/subcontracts.json",
            RecordKind::Invoice => "data/contracts/invoices.json",
            RecordKind::Preference => "data/settings/user_preferences.json",
            RecordKind::Configuration => "data/settings/system_configurations.json",
            RecordKind::Integration => "data/settings/integration_settings.json",
        }
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a gcPanel project (searched from {searched_from:?}). Run 'gcpanel init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("gcPanel project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.gcpanel_dir().exists());
        assert!(project.gcpanel_dir().join("config.yaml").exists());
        assert!(project.root().join("data/contracts").is_dir());
        assert!(project.root().join("data/settings").is_dir());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_discover_finds_marker_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_marker() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_data_file_layout() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        assert_eq!(
            project.data_file(RecordKind::ChangeOrder),
            project.root().join("data/contracts/change_orders.json")
        );
    }
}
