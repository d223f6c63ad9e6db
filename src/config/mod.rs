pub mod schema;

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::error::{CodeforgeError, Result};

pub use schema::{ConfigFile, DefaultsEntry, GeneratorEntry, IdeEntry, LanguageEntry};

pub const CONFIG_FILE: &str = "config.json";
pub const TEMPLATES_DIR: &str = "templates";

/// Editor id assigned to languages that have no stored default.
pub const FALLBACK_EDITOR: &str = "vscode";

/// Get the directory holding config.json and the template library.
///
/// Checks `CODEFORGE_HOME` first, then falls back to the current directory.
/// A relative `CODEFORGE_HOME` is taken relative to the current directory.
pub fn home_dir() -> Result<PathBuf> {
    match std::env::var_os("CODEFORGE_HOME") {
        Some(dir) if !dir.is_empty() => absolute(Path::new(&dir)),
        _ => current_dir(),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| CodeforgeError::Io {
        context: "getting current directory".into(),
        source: e,
    })
}

/// Anchor a relative path at the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(current_dir()?.join(path))
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

/// Load the config document from `path`.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Err(CodeforgeError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CodeforgeError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| CodeforgeError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the whole document to `path`.
///
/// The new content is staged in a temp file next to the target and renamed
/// into place, so a crash never leaves a half-written config behind.
pub fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| CodeforgeError::ConfigSerialize { source: e })?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| CodeforgeError::Io {
        context: format!("creating directory {}", parent.display()),
        source: e,
    })?;

    let mut staged = tempfile::NamedTempFile::new_in(&parent).map_err(|e| CodeforgeError::Io {
        context: format!("staging {}", path.display()),
        source: e,
    })?;
    staged
        .write_all(json.as_bytes())
        .and_then(|()| staged.write_all(b"\n"))
        .map_err(|e| CodeforgeError::Io {
            context: format!("writing {}", path.display()),
            source: e,
        })?;
    staged.persist(path).map_err(|e| CodeforgeError::Io {
        context: format!("replacing {}", path.display()),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), "saved config");
    Ok(())
}

/// Output path and editor assigned to a language the first time it is used.
pub fn fallback_defaults(language_id: &str) -> DefaultsEntry {
    DefaultsEntry {
        output_path: format!("./projects/{language_id}"),
        ide: FALLBACK_EDITOR.to_string(),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured output path against the codeforge home.
pub fn resolve_output_path(home: &Path, path: &str) -> PathBuf {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        return expanded;
    }
    let relative: PathBuf = expanded
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    home.join(relative)
}

/// The document written by `codeforge init`.
pub fn builtin_config() -> ConfigFile {
    let mut config = ConfigFile::default();

    config.languages.insert(
        "python".into(),
        LanguageEntry {
            language: "python".into(),
            extension: "py".into(),
            shebang: Some("#!/usr/bin/env python3".into()),
            gitignore: "# Ignore __pycache__\n__pycache__/\n".into(),
            generator: None,
            nullable: false,
        },
    );
    config.languages.insert(
        "cs_script".into(),
        LanguageEntry {
            language: "c#".into(),
            extension: "csx".into(),
            shebang: Some("/usr/bin/env dotnet-script".into()),
            gitignore: String::new(),
            generator: None,
            nullable: false,
        },
    );
    config.languages.insert(
        "cs_project".into(),
        LanguageEntry {
            language: "c#".into(),
            extension: "cs".into(),
            shebang: None,
            gitignore: "bin/\nobj/\n".into(),
            generator: Some(GeneratorEntry {
                command: "dotnet new console -n \"%NAME%\" -o %PATH%".into(),
                stub: Some("Program.cs".into()),
                metadata: Some("%NAME%.csproj".into()),
            }),
            nullable: true,
        },
    );

    config.ides.insert(
        "VS Code".into(),
        IdeEntry {
            name: FALLBACK_EDITOR.into(),
            open_command: Some("code %PATH%".into()),
        },
    );

    let ids: Vec<String> = config.languages.keys().cloned().collect();
    for id in ids {
        let defaults = fallback_defaults(&id);
        config.defaults.insert(id, defaults);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_anchored_at_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let home = absolute(Path::new("codeforge-home")).unwrap();
        assert!(home.is_absolute());
        assert_eq!(home, cwd.join("codeforge-home"));
        assert_eq!(absolute(&home).unwrap(), home);
    }

    #[test]
    fn builtin_config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(dir.path());
        let config = builtin_config();

        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn builtin_config_keeps_language_order() {
        let config = builtin_config();
        let ids: Vec<&str> = config.languages.keys().map(String::as_str).collect();
        assert_eq!(ids, ["python", "cs_script", "cs_project"]);
    }

    #[test]
    fn builtin_defaults_cover_every_language() {
        let config = builtin_config();
        for id in config.languages.keys() {
            let entry = &config.defaults[id];
            assert_eq!(entry.output_path, format!("./projects/{id}"));
            assert_eq!(entry.ide, FALLBACK_EDITOR);
        }
    }

    #[test]
    fn load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("config.json"));
        assert!(matches!(result, Err(CodeforgeError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(CodeforgeError::ConfigParse { .. })
        ));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config: ConfigFile = serde_json::from_str("{}").unwrap();
        assert!(config.languages.is_empty());
        assert!(config.ides.is_empty());
        assert!(config.defaults.is_empty());
    }

    #[test]
    fn parses_hand_written_config() {
        let json = r##"{
            "languages": {
                "python": {"language": "python", "extension": "py",
                           "shebang": "#!/usr/bin/env python3",
                           "gitignore": "__pycache__/"}
            },
            "ides": {"VS Code": {"name": "vscode", "open_command": "code %PATH%"}},
            "defaults": {"python": {"output_path": "./projects/python", "ide": "vscode"}}
        }"##;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        let python = &config.languages["python"];
        assert_eq!(python.extension, "py");
        assert!(python.generator.is_none());
        assert!(!python.nullable);
        assert_eq!(config.ides["VS Code"].name, "vscode");
    }

    #[test]
    fn relative_output_paths_resolve_against_home() {
        let home = Path::new("/srv/forge");
        assert_eq!(
            resolve_output_path(home, "./projects/python"),
            PathBuf::from("/srv/forge/projects/python")
        );
        assert_eq!(
            resolve_output_path(home, "/abs/out"),
            PathBuf::from("/abs/out")
        );
    }

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        assert_eq!(expand_home("projects/x"), PathBuf::from("projects/x"));
    }
}
