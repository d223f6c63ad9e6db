use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CodeforgeError, Result};
use crate::template::record::{single_line, TemplateRecord};
use crate::template::seed::{builtin_templates, SeedTemplate};

const TEMPLATE_SUFFIX: &str = "txt";

/// The template library: one directory per language id, one `<name>.txt` per template.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language_dir(&self, language_id: &str) -> PathBuf {
        self.root.join(language_id)
    }

    fn template_path(&self, language_id: &str, name: &str) -> PathBuf {
        self.language_dir(language_id)
            .join(format!("{}.{TEMPLATE_SUFFIX}", name.to_lowercase()))
    }

    /// Seed built-in templates if the language has no templates yet.
    ///
    /// Returns the number of templates created.
    pub fn ensure_initialized(&self, language_id: &str) -> Result<usize> {
        if self.has_templates(language_id)? {
            return Ok(0);
        }
        self.seed_defaults(language_id)
    }

    fn has_templates(&self, language_id: &str) -> Result<bool> {
        let dir = self.language_dir(language_id);
        if !dir.exists() {
            return Ok(false);
        }
        Ok(!self.template_files(&dir)?.is_empty())
    }

    fn template_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| CodeforgeError::Io {
                context: format!("reading template directory {}", dir.display()),
                source: e.into(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == TEMPLATE_SUFFIX)
            {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    /// All templates for a language, keyed by lowercased name.
    pub fn list(&self, language_id: &str) -> Result<BTreeMap<String, TemplateRecord>> {
        self.ensure_initialized(language_id)?;
        self.read_all(language_id)
    }

    fn read_all(&self, language_id: &str) -> Result<BTreeMap<String, TemplateRecord>> {
        let mut templates = BTreeMap::new();
        for path in self.template_files(&self.language_dir(language_id))? {
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let record = read_record(&path, &stem, language_id)?;
            templates.entry(record.name.clone()).or_insert(record);
        }
        Ok(templates)
    }

    /// Fetch one template, matching the name case-insensitively.
    pub fn get(&self, language_id: &str, name: &str) -> Result<TemplateRecord> {
        self.list(language_id)?
            .remove(&name.to_lowercase())
            .ok_or_else(|| not_found(language_id, name))
    }

    /// Like [`get`](Self::get), but never writes. A language without templates
    /// on disk answers from the built-in set it would be seeded with.
    pub fn peek(&self, language_id: &str, name: &str) -> Result<TemplateRecord> {
        let wanted = name.to_lowercase();
        if self.has_templates(language_id)? {
            return self
                .read_all(language_id)?
                .remove(&wanted)
                .ok_or_else(|| not_found(language_id, name));
        }
        builtin_templates(language_id)
            .into_iter()
            .find(|seed| seed.name == wanted)
            .map(|seed| seed_record(seed, language_id))
            .ok_or_else(|| not_found(language_id, name))
    }

    /// Create an empty template with a description header.
    pub fn create(
        &self,
        language_id: &str,
        name: &str,
        description: &str,
    ) -> Result<TemplateRecord> {
        validate_template_name(name)?;

        if self.list(language_id)?.contains_key(&name.to_lowercase()) {
            return Err(CodeforgeError::TemplateAlreadyExists {
                language: language_id.to_string(),
                name: name.to_string(),
            });
        }

        let record = TemplateRecord {
            name: name.to_lowercase(),
            language_id: language_id.to_string(),
            description: single_line(description),
            body: Vec::new(),
        };
        let path = self.template_path(language_id, name);
        if !write_new(&path, &record.to_stored())? {
            return Err(CodeforgeError::TemplateAlreadyExists {
                language: language_id.to_string(),
                name: name.to_string(),
            });
        }

        tracing::info!(language = language_id, name = %record.name, "created template");
        Ok(record)
    }

    /// Create any missing built-in templates. Existing files are left untouched.
    ///
    /// Returns the number of templates created.
    pub fn seed_defaults(&self, language_id: &str) -> Result<usize> {
        let dir = self.language_dir(language_id);
        std::fs::create_dir_all(&dir).map_err(|e| CodeforgeError::Io {
            context: format!("creating template directory {}", dir.display()),
            source: e,
        })?;

        let existing: Vec<String> = self
            .template_files(&dir)?
            .iter()
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_lowercase()))
            .collect();

        let mut created = 0;
        for seed in builtin_templates(language_id) {
            if existing.iter().any(|name| name == seed.name) {
                continue;
            }
            let record = seed_record(seed, language_id);
            if write_new(&self.template_path(language_id, seed.name), &record.to_stored())? {
                created += 1;
            }
        }

        tracing::debug!(language = language_id, created, "seeded templates");
        Ok(created)
    }
}

fn seed_record(seed: &SeedTemplate, language_id: &str) -> TemplateRecord {
    TemplateRecord {
        name: seed.name.to_string(),
        language_id: language_id.to_string(),
        description: seed.description.to_string(),
        body: seed.body.split_inclusive('\n').map(str::to_string).collect(),
    }
}

fn not_found(language_id: &str, name: &str) -> CodeforgeError {
    CodeforgeError::TemplateNotFound {
        language: language_id.to_string(),
        name: name.to_string(),
    }
}

/// Template names become file names, so they must be a single path component.
pub fn validate_template_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed != name
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(CodeforgeError::InvalidTemplateName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn read_record(path: &Path, name: &str, language_id: &str) -> Result<TemplateRecord> {
    let content = std::fs::read_to_string(path).map_err(|e| CodeforgeError::Io {
        context: format!("reading template {}", path.display()),
        source: e,
    })?;
    Ok(TemplateRecord::parse(name, language_id, &content))
}

/// Write `content` to `path` only if it does not exist yet. Returns false if it did.
fn write_new(path: &Path, content: &str) -> Result<bool> {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path);

    let mut file = match file {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(CodeforgeError::Io {
                context: format!("creating template {}", path.display()),
                source: e,
            })
        }
    };

    file.write_all(content.as_bytes())
        .map_err(|e| CodeforgeError::Io {
            context: format!("writing template {}", path.display()),
            source: e,
        })?;
    Ok(true)
}
