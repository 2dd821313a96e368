//! Stored UI preferences (active group tab and status filter) in a small
//! `preferences.yaml` file.
//!
//! ```yaml
//! group: kanwil
//! filter: all
//! ```

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::StaffGroup;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::view_state::{StatusFilter, ViewState};

const PREFERENCES_FILE: &str = "preferences.yaml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub group: StaffGroup,
    pub filter: StatusFilter,
}

impl Preferences {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            group: view.group(),
            filter: view.filter(),
        }
    }

    pub fn apply_to(&self, view: &mut ViewState) {
        view.set_group(self.group);
        view.set_filter(self.filter);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode preferences: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// File-backed preference storage rooted at a directory
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved preferences; a missing or unreadable file gives the defaults
    pub fn load(&self) -> Preferences {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No preferences at {:?}: {}", self.path, e);
                return Preferences::default();
            }
        };

        match serde_yaml::from_str(&content) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("Ignoring unreadable preferences at {:?}: {}", self.path, e);
                Preferences::default()
            }
        }
    }

    /// Write via a temp file and rename so a crash never leaves half a file
    pub fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(preferences)?;
        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)?;
        fs::rename(&temp_path, &self.path)?;

        info!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}
