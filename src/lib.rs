pub mod config;
pub mod defaults;
pub mod editor;
pub mod error;
pub mod hooks;
pub mod language;
pub mod materialize;
pub mod template;

use std::path::{Path, PathBuf};

use crate::config::{builtin_config, config_path, load_config, save_config, TEMPLATES_DIR};
use crate::defaults::DefaultsStore;
use crate::editor::EditorRegistry;
use crate::error::Result;
use crate::hooks::{ConfirmOverwrite, ExternalCommands};
use crate::language::LanguageRegistry;
use crate::materialize::{GenerationRequest, MaterializedProject, ProjectMaterializer};
use crate::template::TemplateStore;

/// Everything loaded from one codeforge home: registries built from
/// config.json plus the stores that persist under it.
pub struct Workspace {
    home: PathBuf,
    languages: LanguageRegistry,
    editors: EditorRegistry,
    templates: TemplateStore,
}

impl Workspace {
    /// Load the workspace at `home`. Fails if config.json is missing.
    pub fn open(home: impl Into<PathBuf>) -> Result<Self> {
        let home: PathBuf = home.into();
        let home = config::absolute(&home)?;
        let config = load_config(&config_path(&home))?;
        let languages = LanguageRegistry::from_config(&config)?;
        let editors = EditorRegistry::from_config(&config);
        tracing::debug!(
            home = %home.display(),
            languages = languages.list().len(),
            editors = editors.list().len(),
            "loaded workspace"
        );
        Ok(Self {
            templates: TemplateStore::new(home.join(TEMPLATES_DIR)),
            home,
            languages,
            editors,
        })
    }

    /// Load the workspace at `home`, writing the built-in config first if there is none.
    pub fn open_or_init(home: impl Into<PathBuf>) -> Result<Self> {
        let home = home.into();
        if !config_path(&home).exists() {
            init_config(&home)?;
        }
        Self::open(home)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    pub fn editors(&self) -> &EditorRegistry {
        &self.editors
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn defaults(&self) -> DefaultsStore<'_> {
        DefaultsStore::new(&self.home, &self.languages, &self.editors)
    }

    pub fn materializer<'a>(&'a self, commands: &'a dyn ExternalCommands) -> ProjectMaterializer<'a> {
        ProjectMaterializer::new(
            &self.languages,
            &self.editors,
            &self.templates,
            self.defaults(),
            commands,
        )
    }

    /// Create a project.
    pub fn create_project(
        &self,
        request: GenerationRequest,
        commands: &dyn ExternalCommands,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> Result<MaterializedProject> {
        self.materializer(commands).materialize(request, confirm)
    }
}

/// Write the built-in config.json to `home`, replacing any existing one.
pub fn init_config(home: &Path) -> Result<PathBuf> {
    let path = config_path(home);
    save_config(&path, &builtin_config())?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(path)
}
