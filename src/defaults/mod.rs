//! Per-language defaults persisted in the `defaults` section of config.json.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::{self, fallback_defaults, resolve_output_path, DefaultsEntry};
use crate::editor::EditorRegistry;
use crate::error::{CodeforgeError, Result};
use crate::language::LanguageRegistry;

/// A configurable default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultField {
    OutputPath,
    Editor,
}

impl DefaultField {
    pub const ALL: [DefaultField; 2] = [DefaultField::OutputPath, DefaultField::Editor];

    /// Key used in config.json.
    pub fn key(self) -> &'static str {
        match self {
            DefaultField::OutputPath => "output_path",
            DefaultField::Editor => "ide",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            DefaultField::OutputPath => "directory new projects are created in",
            DefaultField::Editor => "editor id used by `create --open`",
        }
    }
}

impl FromStr for DefaultField {
    type Err = CodeforgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "output_path" | "outputpath" | "output" => Ok(DefaultField::OutputPath),
            "ide" | "editor" | "editorid" | "editor_id" => Ok(DefaultField::Editor),
            _ => Err(CodeforgeError::UnknownField {
                field: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefaults {
    pub output_path: String,
    pub editor_id: String,
}

impl From<DefaultsEntry> for LanguageDefaults {
    fn from(entry: DefaultsEntry) -> Self {
        Self {
            output_path: entry.output_path,
            editor_id: entry.ide,
        }
    }
}

/// Reads and writes language defaults. Every mutation is a full
/// read-modify-write of config.json.
pub struct DefaultsStore<'a> {
    home: PathBuf,
    languages: &'a LanguageRegistry,
    editors: &'a EditorRegistry,
}

impl<'a> DefaultsStore<'a> {
    pub fn new(
        home: impl Into<PathBuf>,
        languages: &'a LanguageRegistry,
        editors: &'a EditorRegistry,
    ) -> Self {
        Self {
            home: home.into(),
            languages,
            editors,
        }
    }

    fn config_path(&self) -> PathBuf {
        config::config_path(&self.home)
    }

    /// Make sure the language has a stored entry, writing the fallback if not.
    pub fn ensure_initialized(&self, language_id: &str) -> Result<LanguageDefaults> {
        let id = self.languages.get(language_id)?.id.clone();
        let path = self.config_path();
        let mut document = config::load_config(&path)?;

        if let Some(entry) = document.defaults.get(&id) {
            return Ok(entry.clone().into());
        }

        let entry = fallback_defaults(&id);
        document.defaults.insert(id.clone(), entry.clone());
        config::save_config(&path, &document)?;
        tracing::info!(language = %id, output_path = %entry.output_path, "created default config");
        Ok(entry.into())
    }

    pub fn get(&self, language_id: &str) -> Result<LanguageDefaults> {
        self.ensure_initialized(language_id)
    }

    /// The stored entry, or the fallback that [`get`](Self::get) would store.
    /// Never writes.
    pub fn lookup(&self, language_id: &str) -> Result<LanguageDefaults> {
        let id = self.languages.get(language_id)?.id.clone();
        let document = config::load_config(&self.config_path())?;
        Ok(document
            .defaults
            .get(&id)
            .cloned()
            .unwrap_or_else(|| fallback_defaults(&id))
            .into())
    }

    /// The language's default output directory, resolved against the home.
    /// Read-only; a missing entry is not persisted.
    pub fn output_dir(&self, language_id: &str) -> Result<PathBuf> {
        let defaults = self.lookup(language_id)?;
        Ok(resolve_output_path(&self.home, &defaults.output_path))
    }

    pub fn update(&self, language_id: &str, field: &str, value: &str) -> Result<()> {
        let field: DefaultField = field.parse()?;
        let id = self.languages.get(language_id)?.id.clone();

        let value = match field {
            DefaultField::OutputPath => {
                let resolved = resolve_output_path(&self.home, value);
                if !resolved.is_dir() {
                    return Err(CodeforgeError::InvalidOutputPath { path: resolved });
                }
                value.to_string()
            }
            DefaultField::Editor => self.editors.resolve(value)?.id.clone(),
        };

        let path = self.config_path();
        let mut document = config::load_config(&path)?;
        let entry = document
            .defaults
            .entry(id.clone())
            .or_insert_with(|| fallback_defaults(&id));
        match field {
            DefaultField::OutputPath => entry.output_path = value,
            DefaultField::Editor => entry.ide = value,
        }
        config::save_config(&path, &document)?;

        tracing::info!(language = %id, field = field.key(), "updated default");
        Ok(())
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}
