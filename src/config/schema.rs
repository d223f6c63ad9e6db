use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root document deserialized from config.json.
///
/// Sections keep their on-disk order, which is the order languages and
/// editors are listed in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub languages: IndexMap<String, LanguageEntry>,

    /// Keyed by editor display name.
    #[serde(default)]
    pub ides: IndexMap<String, IdeEntry>,

    /// Keyed by language id.
    #[serde(default)]
    pub defaults: IndexMap<String, DefaultsEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LanguageEntry {
    /// Display name shared by every variant of a language (e.g. "c#").
    pub language: String,
    pub extension: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shebang: Option<String>,

    /// Contents of the `.gitignore` written when a repository is created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gitignore: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorEntry>,

    /// Whether the generated project metadata carries a `<Nullable>` marker.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
}

/// An external command that scaffolds the project before the template is written.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratorEntry {
    /// Program and arguments, split like a shell would but run without one. `%NAME%` and `%PATH%` are substituted inside each argument.
    pub command: String,

    /// Entry file the generator produces that the template replaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stub: Option<String>,

    /// Project metadata file, relative to the project root. `%NAME%` is substituted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IdeEntry {
    /// Stable id referenced from `defaults.<language>.ide`.
    pub name: String,

    /// Command to open a directory, with `%PATH%` as the path placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DefaultsEntry {
    pub output_path: String,
    pub ide: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}
