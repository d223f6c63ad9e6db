//! Supported languages and the metadata needed to materialize a file for each.

use std::path::Path;

use crate::config::{ConfigFile, GeneratorEntry, LanguageEntry};
use crate::error::{CodeforgeError, Result};
use crate::hooks::command_line;

/// How to write a project for one language variant.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageProfile {
    /// Stable key, e.g. `cs_project`.
    pub id: String,
    /// Human-readable name, shared between variants (e.g. `c#`).
    pub display_name: String,
    /// File suffix without the dot.
    pub extension: String,
    /// Always begins with `#!` when present.
    pub shebang: Option<String>,
    /// Contents of the ignore file; empty means none is written.
    pub ignore_body: String,
    pub generator: Option<GeneratorSpec>,
    pub supports_nullable_toggle: bool,
}

/// External scaffolding command run before the template is written.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSpec {
    pub command: String,
    pub stub: Option<String>,
    pub metadata: Option<String>,
}

impl GeneratorSpec {
    /// Arguments to run, with `%NAME%` and `%PATH%` filled in.
    pub fn command_for(&self, project_name: &str, project_path: &Path) -> Result<Vec<String>> {
        command_line(&self.command, project_name, project_path)
    }

    /// Name of the project metadata file for `project_name`, if the generator produces one.
    pub fn metadata_file(&self, project_name: &str) -> Option<String> {
        self.metadata
            .as_ref()
            .map(|m| m.replace(crate::hooks::NAME_PLACEHOLDER, project_name))
    }
}

impl From<&GeneratorEntry> for GeneratorSpec {
    fn from(entry: &GeneratorEntry) -> Self {
        Self {
            command: entry.command.clone(),
            stub: entry.stub.clone(),
            metadata: entry.metadata.clone(),
        }
    }
}

impl LanguageProfile {
    pub fn from_entry(id: &str, entry: &LanguageEntry) -> Self {
        Self {
            id: id.to_lowercase(),
            display_name: entry.language.to_lowercase(),
            extension: entry.extension.trim_start_matches('.').to_lowercase(),
            shebang: entry.shebang.as_deref().and_then(normalize_shebang),
            ignore_body: entry.gitignore.clone(),
            generator: entry.generator.as_ref().map(GeneratorSpec::from),
            supports_nullable_toggle: entry.nullable,
        }
    }

    pub fn uses_external_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// `<project>.<extension>`
    pub fn primary_file_name(&self, project_name: &str) -> String {
        format!("{project_name}.{}", self.extension)
    }
}

/// Prefix `#!` if missing. Blank shebangs are treated as absent.
pub fn normalize_shebang(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("#!") {
        Some(trimmed.to_string())
    } else {
        Some(format!("#!{trimmed}"))
    }
}

/// The set of known languages, in registration order.
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    profiles: Vec<LanguageProfile>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigFile) -> Result<Self> {
        let mut registry = Self::new();
        for (id, entry) in &config.languages {
            registry.register(LanguageProfile::from_entry(id, entry))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, profile: LanguageProfile) -> Result<()> {
        if self.profiles.iter().any(|p| p.id == profile.id) {
            return Err(CodeforgeError::DuplicateId { id: profile.id });
        }
        self.profiles.push(profile);
        Ok(())
    }

    /// Look up a profile by its id.
    pub fn get(&self, id: &str) -> Result<&LanguageProfile> {
        let id = id.to_lowercase();
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or(CodeforgeError::LanguageNotFound { name: id })
    }

    /// Resolve a user-supplied language name.
    ///
    /// Display names are matched first. When several variants share a display
    /// name, `wants_project_variant` picks the one backed by an external
    /// generator (or the one without, when false). Ids are accepted as a
    /// fallback so `cs_project` can be named directly.
    pub fn resolve(&self, name: &str, wants_project_variant: bool) -> Result<&LanguageProfile> {
        let wanted = name.to_lowercase();
        let matches: Vec<&LanguageProfile> = self
            .profiles
            .iter()
            .filter(|p| p.display_name == wanted)
            .collect();

        if matches.is_empty() {
            let profile = self
                .profiles
                .iter()
                .find(|p| p.id == wanted)
                .ok_or_else(|| CodeforgeError::LanguageNotFound {
                    name: name.to_string(),
                })?;
            if wants_project_variant && !profile.uses_external_generator() {
                return Err(CodeforgeError::UnsupportedVariant {
                    name: name.to_string(),
                });
            }
            return Ok(profile);
        }

        if wants_project_variant {
            return matches
                .into_iter()
                .find(|p| p.uses_external_generator())
                .ok_or_else(|| CodeforgeError::UnsupportedVariant {
                    name: name.to_string(),
                });
        }

        let first = matches[0];
        Ok(matches
            .into_iter()
            .find(|p| !p.uses_external_generator())
            .unwrap_or(first))
    }

    pub fn list(&self) -> &[LanguageProfile] {
        &self.profiles
    }
}
