//! Turning a generation request into a populated project directory.
//!
//! Work is split in two phases. [`ProjectMaterializer::plan`] resolves and
//! validates everything and asks for overwrite confirmation without touching
//! the project directory. [`ProjectMaterializer::execute`] then performs the
//! side effects in order. A failure during execution leaves whatever was
//! already written in place; nothing is rolled back.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::defaults::DefaultsStore;
use crate::editor::EditorRegistry;
use crate::error::{CodeforgeError, Result};
use crate::config::absolute;
use crate::hooks::{display_command, ConfirmOverwrite, ExternalCommands};
use crate::language::{LanguageProfile, LanguageRegistry};
use crate::template::{TemplateRecord, TemplateStore};

const NULLABLE_ENABLED: &str = "<Nullable>enable</Nullable>";
const NULLABLE_DISABLED: &str = "<Nullable>disable</Nullable>";
const IGNORE_FILE: &str = ".gitignore";

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub project_name: String,
    /// Display name or id.
    pub language: String,
    /// Select the generator-backed variant of the language.
    pub project_variant: bool,
    pub template: String,
    pub output_dir: Option<PathBuf>,
    pub enable_repository: bool,
    pub open_after_create: bool,
    /// `Some(true)` enables nullable checking, `Some(false)` disables it,
    /// `None` keeps what the generator wrote.
    pub nullable: Option<bool>,
}

impl GenerationRequest {
    pub fn new(
        project_name: impl Into<String>,
        language: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            language: language.into(),
            project_variant: false,
            template: template.into(),
            output_dir: None,
            enable_repository: false,
            open_after_create: false,
            nullable: None,
        }
    }
}

/// A validated request, ready to be written.
#[derive(Debug, Clone)]
pub struct MaterializePlan {
    pub request: GenerationRequest,
    pub language: LanguageProfile,
    pub template: TemplateRecord,
    pub output_dir: PathBuf,
    pub project_path: PathBuf,
    /// The project directory exists and the user agreed to replace it.
    pub replace_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnsupportedPlatform { platform: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedPlatform { platform } => write!(
                f,
                "cannot mark files executable on unsupported platform '{platform}'"
            ),
        }
    }
}

#[derive(Debug)]
pub struct MaterializedProject {
    pub project_path: PathBuf,
    pub primary_file: PathBuf,
    pub repository_initialized: bool,
    pub opened: bool,
    pub warnings: Vec<Warning>,
}

pub struct ProjectMaterializer<'a> {
    languages: &'a LanguageRegistry,
    editors: &'a EditorRegistry,
    templates: &'a TemplateStore,
    defaults: DefaultsStore<'a>,
    commands: &'a dyn ExternalCommands,
}

impl<'a> ProjectMaterializer<'a> {
    pub fn new(
        languages: &'a LanguageRegistry,
        editors: &'a EditorRegistry,
        templates: &'a TemplateStore,
        defaults: DefaultsStore<'a>,
        commands: &'a dyn ExternalCommands,
    ) -> Self {
        Self {
            languages,
            editors,
            templates,
            defaults,
            commands,
        }
    }

    /// Plan and execute in one go.
    pub fn materialize(
        &self,
        request: GenerationRequest,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> Result<MaterializedProject> {
        let plan = self.plan(request, confirm)?;
        self.execute(plan)
    }

    /// Resolve the request without modifying the project directory.
    ///
    /// `confirm` is only consulted when the project directory already exists.
    pub fn plan(
        &self,
        request: GenerationRequest,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> Result<MaterializePlan> {
        validate_project_name(&request.project_name)?;

        let language = self
            .languages
            .resolve(&request.language, request.project_variant)?
            .clone();

        if request.nullable.is_some() && !language.supports_nullable_toggle {
            return Err(CodeforgeError::UnsupportedToggle {
                language: language.id.clone(),
            });
        }

        let output_dir = match &request.output_dir {
            Some(dir) => {
                let dir = absolute(dir)?;
                if !dir.is_dir() {
                    return Err(CodeforgeError::OutputPathNotFound { path: dir });
                }
                dir
            }
            None => absolute(&self.defaults.output_dir(&language.id)?)?,
        };

        // Read-only: nothing is seeded before the overwrite prompt.
        let template = self.templates.peek(&language.id, &request.template)?;

        let project_path = output_dir.join(&request.project_name);
        let mut replace_existing = false;
        if project_path.symlink_metadata().is_ok() {
            if !confirm.confirm_overwrite(&project_path)? {
                info!(path = %project_path.display(), "overwrite declined");
                return Err(CodeforgeError::UserAborted);
            }
            replace_existing = true;
        }

        debug!(
            language = %language.id,
            template = %template.name,
            path = %project_path.display(),
            "planned project"
        );

        Ok(MaterializePlan {
            request,
            language,
            template,
            output_dir,
            project_path,
            replace_existing,
        })
    }

    /// Write the project to disk.
    pub fn execute(&self, plan: MaterializePlan) -> Result<MaterializedProject> {
        let MaterializePlan {
            request,
            language,
            project_path,
            replace_existing,
            ..
        } = plan;
        let name = request.project_name.as_str();

        if request.output_dir.is_none() {
            self.defaults.ensure_initialized(&language.id)?;
        }

        if replace_existing {
            remove_existing(&project_path)?;
        }

        std::fs::create_dir_all(&project_path).map_err(|e| CodeforgeError::Io {
            context: format!("creating project directory {}", project_path.display()),
            source: e,
        })?;

        if let Some(generator) = &language.generator {
            let argv = generator.command_for(name, &project_path)?;
            info!(command = %display_command(&argv), "running project generator");
            self.commands.run_generator(&argv, &project_path)?;

            if let Some(stub) = &generator.stub {
                remove_stub(&project_path.join(stub))?;
            }
        }

        // Templates can disappear between planning and writing.
        let template = self.templates.get(&language.id, &request.template)?;

        let primary_file = project_path.join(language.primary_file_name(name));
        let content = primary_content(&language, &template);
        std::fs::write(&primary_file, content).map_err(|e| CodeforgeError::Io {
            context: format!("writing {}", primary_file.display()),
            source: e,
        })?;
        info!(path = %primary_file.display(), "wrote primary file");

        if let Some(enable) = request.nullable {
            let metadata = project_path.join(metadata_file_name(&language, name));
            toggle_nullable(&metadata, enable)?;
        }

        let mut warnings = Vec::new();
        if !language.uses_external_generator() {
            if let Some(warning) = make_executable(&primary_file)? {
                tracing::warn!(%warning);
                warnings.push(warning);
            }
        }

        if request.enable_repository {
            self.commands.init_repository(&project_path)?;
            if !language.ignore_body.is_empty() {
                let ignore = project_path.join(IGNORE_FILE);
                std::fs::write(&ignore, &language.ignore_body).map_err(|e| {
                    CodeforgeError::Io {
                        context: format!("writing {}", ignore.display()),
                        source: e,
                    }
                })?;
            }
            info!("initialized repository");
        }

        if request.open_after_create {
            let editor_id = self.defaults.get(&language.id)?.editor_id;
            let editor = self.editors.resolve(&editor_id)?;
            let argv = editor.open_command_for(&project_path)?;
            info!(editor = %editor.id, "opening project");
            self.commands.open_editor(&argv)?;
        }

        Ok(MaterializedProject {
            project_path,
            primary_file,
            repository_initialized: request.enable_repository,
            opened: request.open_after_create,
            warnings,
        })
    }
}

/// Project names become directory and file names, and are passed to
/// generators as a single argument.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.starts_with('-')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(CodeforgeError::InvalidProjectName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Shebang line (if any) followed by the template body.
pub fn primary_content(language: &LanguageProfile, template: &TemplateRecord) -> String {
    let mut content = String::new();
    if let Some(shebang) = &language.shebang {
        content.push_str(shebang);
        content.push('\n');
    }
    content.push_str(&template.body_text());
    content
}

fn metadata_file_name(language: &LanguageProfile, project_name: &str) -> String {
    language
        .generator
        .as_ref()
        .and_then(|g| g.metadata_file(project_name))
        .unwrap_or_else(|| format!("{project_name}.{}proj", language.extension))
}

/// Flip the `<Nullable>` marker in a project file. A file without the marker is left as is.
pub fn toggle_nullable(metadata: &Path, enable: bool) -> Result<()> {
    if !metadata.is_file() {
        return Err(CodeforgeError::ProjectMetadataNotFound {
            path: metadata.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(metadata).map_err(|e| CodeforgeError::Io {
        context: format!("reading {}", metadata.display()),
        source: e,
    })?;

    let (from, to) = if enable {
        (NULLABLE_DISABLED, NULLABLE_ENABLED)
    } else {
        (NULLABLE_ENABLED, NULLABLE_DISABLED)
    };
    if !content.contains(from) {
        debug!(path = %metadata.display(), "no nullable marker to toggle");
        return Ok(());
    }

    std::fs::write(metadata, content.replace(from, to)).map_err(|e| CodeforgeError::Io {
        context: format!("writing {}", metadata.display()),
        source: e,
    })
}

fn remove_existing(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| CodeforgeError::Io {
        context: format!("removing existing project {}", path.display()),
        source: e,
    })
}

fn remove_stub(stub: &Path) -> Result<()> {
    match std::fs::remove_file(stub) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CodeforgeError::Io {
            context: format!("removing generator stub {}", stub.display()),
            source: e,
        }),
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<Option<Warning>> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .map_err(|e| CodeforgeError::Io {
            context: format!("reading permissions of {}", path.display()),
            source: e,
        })?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions).map_err(|e| CodeforgeError::Io {
        context: format!("setting permissions of {}", path.display()),
        source: e,
    })?;
    Ok(None)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<Option<Warning>> {
    Ok(Some(Warning::UnsupportedPlatform {
        platform: std::env::consts::OS.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn language(shebang: Option<&str>) -> LanguageProfile {
        LanguageProfile {
            id: "python".into(),
            display_name: "python".into(),
            extension: "py".into(),
            shebang: shebang.map(String::from),
            ignore_body: String::new(),
            generator: None,
            supports_nullable_toggle: false,
        }
    }

    fn template(body: &[&str]) -> TemplateRecord {
        TemplateRecord {
            name: "t".into(),
            language_id: "python".into(),
            description: String::new(),
            body: body.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn shebang_is_prepended_on_its_own_line() {
        let content = primary_content(
            &language(Some("#!/usr/bin/env python3")),
            &template(&["print(1)\n"]),
        );
        assert_eq!(content, "#!/usr/bin/env python3\nprint(1)\n");
    }

    #[test]
    fn no_shebang_keeps_body_verbatim() {
        let content = primary_content(&language(None), &template(&["print(1)\n"]));
        assert_eq!(content, "print(1)\n");
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case(".")]
    #[case("..")]
    #[case("a/b")]
    #[case("a\\b")]
    #[case("-rf")]
    #[case("line\nbreak")]
    #[case("nul\0")]
    fn bad_project_names(#[case] name: &str) {
        assert!(matches!(
            validate_project_name(name),
            Err(CodeforgeError::InvalidProjectName { .. })
        ));
    }

    #[rstest]
    #[case(false, "<Nullable>enable</Nullable>", "<Nullable>disable</Nullable>")]
    #[case(true, "<Nullable>disable</Nullable>", "<Nullable>enable</Nullable>")]
    #[case(false, "<Project />", "<Project />")]
    fn toggle_nullable_rewrites_marker(
        #[case] enable: bool,
        #[case] before: &str,
        #[case] after: &str,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.csproj");
        std::fs::write(&path, before).unwrap();

        toggle_nullable(&path, enable).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after);
    }

    #[test]
    fn toggle_nullable_without_metadata_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = toggle_nullable(&dir.path().join("demo.csproj"), false).unwrap_err();
        assert!(matches!(err, CodeforgeError::ProjectMetadataNotFound { .. }));
    }

    #[test]
    fn metadata_name_falls_back_to_extension() {
        let mut profile = language(None);
        profile.extension = "fs".into();
        assert_eq!(metadata_file_name(&profile, "demo"), "demo.fsproj");
    }

    #[cfg(unix)]
    #[test]
    fn make_executable_sets_exec_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("demo.py");
        std::fs::write(&file, "").unwrap();

        assert!(make_executable(&file).unwrap().is_none());
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn warning_names_platform() {
        let warning = Warning::UnsupportedPlatform {
            platform: "plan9".into(),
        };
        assert!(warning.to_string().contains("plan9"));
    }
}
