use std::path::Path;

use crate::config::ConfigFile;
use crate::error::{CodeforgeError, Result};
use crate::hooks::command_line;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorProfile {
    pub id: String,
    pub display_name: String,
    /// Contains a `%PATH%` placeholder.
    pub open_command: Option<String>,
}

impl EditorProfile {
    /// Build the arguments that open `path`, or fail if the editor has none.
    pub fn open_command_for(&self, path: &Path) -> Result<Vec<String>> {
        let template = self
            .open_command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| CodeforgeError::EditorOpenCommandMissing {
                id: self.id.clone(),
            })?;
        command_line(template, "", path)
    }
}

#[derive(Debug, Default)]
pub struct EditorRegistry {
    profiles: Vec<EditorProfile>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editors are keyed by display name in the config; the first entry for an id wins.
    pub fn from_config(config: &ConfigFile) -> Self {
        let mut registry = Self::new();
        for (display_name, entry) in &config.ides {
            let profile = EditorProfile {
                id: entry.name.to_lowercase(),
                display_name: display_name.clone(),
                open_command: entry.open_command.clone(),
            };
            if registry.get(&profile.id).is_none() {
                registry.profiles.push(profile);
            }
        }
        registry
    }

    pub fn register(&mut self, profile: EditorProfile) -> Result<()> {
        if self.get(&profile.id).is_some() {
            return Err(CodeforgeError::DuplicateId { id: profile.id });
        }
        self.profiles.push(profile);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EditorProfile> {
        self.profiles
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn resolve(&self, id: &str) -> Result<&EditorProfile> {
        self.get(id).ok_or_else(|| CodeforgeError::UnknownEditor { id: id.to_string() })
    }

    pub fn list(&self) -> &[EditorProfile] {
        &self.profiles
    }
}
