use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "codeforge",
    about = "Scaffold single-file projects from per-language templates",
    version
)]
pub struct Cli {
    /// Log what codeforge is doing to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a project
    Create {
        /// Name of the project
        name: String,

        /// Programming language of the project
        language: String,

        /// Template to fill the project with
        #[arg(short, long, default_value = "hello world")]
        template: String,

        /// Create the project here instead of the language's default output path
        #[arg(short, long)]
        output: Option<String>,

        /// Use the language's project variant (e.g. a full C# project instead of a script)
        #[arg(short, long)]
        project: bool,

        /// Disable nullable error checking (C# projects)
        #[arg(short = 'n', long, conflicts_with = "enable_nullable")]
        disable_nullable: bool,

        /// Enable nullable error checking (C# projects)
        #[arg(long)]
        enable_nullable: bool,

        /// Initialize a git repository in the project folder
        #[arg(short, long)]
        repository: bool,

        /// Open the project in the language's default editor
        #[arg(short = 'e', long)]
        open: bool,

        /// Replace an existing project directory without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Create an empty template
    Template {
        /// Name of the template
        name: String,

        /// Programming language of the template
        language: String,

        /// One-line description
        #[arg(default_value = "A custom template")]
        description: String,

        /// Create the template for the language's project variant
        #[arg(short, long)]
        project: bool,
    },

    /// Change a default for a language
    Default {
        /// Language id (see `codeforge languages`)
        language: String,

        /// Field to change (see `codeforge fields`)
        field: String,

        /// New value
        value: String,
    },

    /// List supported languages
    Languages,

    /// List supported editors
    Editors,

    /// List templates for a language
    Templates {
        language: String,

        #[arg(short, long)]
        project: bool,
    },

    /// Show the defaults for a language
    Defaults {
        /// Language id (see `codeforge languages`)
        language: String,
    },

    /// List the configurable default fields
    Fields,

    /// Create any missing built-in templates for a language
    Seed {
        language: String,

        #[arg(short, long)]
        project: bool,
    },

    /// Write the default config.json
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },
}
