#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CodeforgeError {
    #[error("Config file not found at {path}")]
    #[diagnostic(help("Run `codeforge init` to generate the default config.json"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the JSON syntax, or regenerate it with `codeforge init --force`"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config")]
    ConfigSerialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Language '{id}' is registered twice")]
    DuplicateId { id: String },

    #[error("Language '{name}' not supported")]
    #[diagnostic(help("For a list of supported languages, use `codeforge languages`"))]
    LanguageNotFound { name: String },

    #[error("Language '{name}' has no project variant")]
    #[diagnostic(help("Drop --project; only languages with an external generator support it"))]
    UnsupportedVariant { name: String },

    #[error("Language '{language}' does not support the nullable toggle")]
    UnsupportedToggle { language: String },

    #[error("Template '{name}' not found for {language}")]
    #[diagnostic(help("For a list of templates, use `codeforge templates {language}`"))]
    TemplateNotFound { language: String, name: String },

    #[error("Template '{name}' already exists for {language}")]
    #[diagnostic(help("For a list of templates, use `codeforge templates {language}`"))]
    TemplateAlreadyExists { language: String, name: String },

    #[error("Invalid template name '{name}'")]
    #[diagnostic(help("Template names must be a single file name without path separators"))]
    InvalidTemplateName { name: String },

    #[error("Invalid project name '{name}'")]
    #[diagnostic(help("Project names must be a single directory name without path separators"))]
    InvalidProjectName { name: String },

    #[error("Output path does not exist: {path}")]
    OutputPathNotFound { path: PathBuf },

    #[error("Aborted by user")]
    UserAborted,

    #[error("Unknown default field '{field}'")]
    #[diagnostic(help("For a list of fields, use `codeforge fields`"))]
    UnknownField { field: String },

    #[error("Output path does not exist: {path}")]
    #[diagnostic(help("Create the directory first, then set it as the default"))]
    InvalidOutputPath { path: PathBuf },

    #[error("Editor '{id}' not supported")]
    #[diagnostic(help("For a list of supported editors, use `codeforge editors`"))]
    UnknownEditor { id: String },

    #[error("Editor '{id}' does not have an open directory command")]
    #[diagnostic(help("Add an open_command with a %PATH% placeholder to config.json"))]
    EditorOpenCommandMissing { id: String },

    #[error("Project metadata file not found: {path}")]
    #[diagnostic(help("Partial project created; the generator did not produce the expected file"))]
    ProjectMetadataNotFound { path: PathBuf },

    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("Cannot ask for confirmation: {message}")]
    #[diagnostic(help("Pass --yes to replace an existing project without asking"))]
    PromptUnavailable { message: String },
}

impl CodeforgeError {
    /// Declining the overwrite prompt is an expected outcome, not a failure.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Self::UserAborted | Self::PromptCancelled)
    }
}

pub type Result<T> = std::result::Result<T, CodeforgeError>;
