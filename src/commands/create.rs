use std::path::PathBuf;

use console::style;
use miette::Result;

use codeforge::hooks::SystemCommands;
use codeforge::materialize::GenerationRequest;

use crate::prompt::TerminalConfirm;

pub struct CreateArgs {
    pub name: String,
    pub language: String,
    pub template: String,
    pub output: Option<String>,
    pub project: bool,
    pub nullable: Option<bool>,
    pub repository: bool,
    pub open: bool,
    pub yes: bool,
}

pub fn run(args: CreateArgs) -> Result<()> {
    let workspace = super::workspace()?;

    let request = GenerationRequest {
        project_name: args.name,
        language: args.language,
        project_variant: args.project,
        template: args.template,
        output_dir: args.output.map(PathBuf::from),
        enable_repository: args.repository,
        open_after_create: args.open,
        nullable: args.nullable,
    };

    let commands = SystemCommands;
    let materializer = workspace.materializer(&commands);
    let mut confirm = TerminalConfirm {
        assume_yes: args.yes,
    };

    let plan = match materializer.plan(request, &mut confirm) {
        Ok(plan) => plan,
        Err(e) if e.is_user_abort() => {
            println!("Exiting without changes");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let project_path = plan.project_path.clone();
    let project = match materializer.execute(plan) {
        Ok(project) => project,
        Err(e) => {
            eprintln!(
                "{} partial project created at {}",
                style("error:").red().bold(),
                style(project_path.display()).cyan()
            );
            return Err(e.into());
        }
    };

    for warning in &project.warnings {
        eprintln!(
            "{} {}",
            style("warning:").yellow().bold(),
            style(warning).yellow()
        );
    }

    println!(
        "{} Successfully created project at {}",
        style("✓").green().bold(),
        style(project.project_path.display()).cyan()
    );
    if project.repository_initialized {
        println!("  initialized git repository");
    }

    Ok(())
}
