mod cli;
mod commands;
mod prompt;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CODEFORGE_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("codeforge=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Create {
            name,
            language,
            template,
            output,
            project,
            disable_nullable,
            enable_nullable,
            repository,
            open,
            yes,
        } => {
            let nullable = match (enable_nullable, disable_nullable) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::create::run(commands::create::CreateArgs {
                name,
                language,
                template,
                output,
                project,
                nullable,
                repository,
                open,
                yes,
            })
        }
        Commands::Template {
            name,
            language,
            description,
            project,
        } => commands::template::run(name, language, description, project),
        Commands::Default {
            language,
            field,
            value,
        } => commands::default::run(language, field, value),
        Commands::Languages => commands::list::languages(),
        Commands::Editors => commands::list::editors(),
        Commands::Templates { language, project } => commands::list::templates(language, project),
        Commands::Defaults { language } => commands::list::defaults(language),
        Commands::Fields => commands::list::fields(),
        Commands::Seed { language, project } => commands::seed::run(language, project),
        Commands::Init { force } => commands::init::run(force),
    }
}
