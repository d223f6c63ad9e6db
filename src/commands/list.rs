use console::style;
use miette::Result;

use codeforge::defaults::DefaultField;

pub fn languages() -> Result<()> {
    let workspace = super::workspace()?;

    println!("{}", style("Supported languages:").bold());
    for profile in workspace.languages().list() {
        let variant = if profile.uses_external_generator() {
            " [--project]"
        } else {
            ""
        };
        println!(
            "  {} ({}) .{}{}",
            profile.display_name,
            style(&profile.id).cyan(),
            profile.extension,
            style(variant).dim()
        );
    }

    Ok(())
}

pub fn editors() -> Result<()> {
    let workspace = super::workspace()?;

    println!("{}", style("Supported editors:").bold());
    for editor in workspace.editors().list() {
        let command = editor.open_command.as_deref().unwrap_or("no open command");
        println!(
            "  {} ({}) {}",
            editor.display_name,
            style(&editor.id).cyan(),
            style(command).dim()
        );
    }

    Ok(())
}

pub fn templates(language: String, project: bool) -> Result<()> {
    let workspace = super::workspace()?;
    let profile = workspace.languages().resolve(&language, project)?;
    let templates = workspace.templates().list(&profile.id)?;

    if templates.is_empty() {
        println!("No templates found for {}", profile.id);
        return Ok(());
    }

    println!("{}", style(format!("{} templates:", profile.id)).bold());
    for record in templates.values() {
        println!("  {}: {}", style(&record.name).cyan(), record.description);
    }

    Ok(())
}

pub fn defaults(language: String) -> Result<()> {
    let workspace = super::workspace()?;
    let defaults = workspace.defaults().get(&language)?;

    println!("{}", style(format!("Default {language} fields:")).bold());
    println!(
        "  {}: '{}'",
        style(DefaultField::OutputPath.key()).cyan(),
        defaults.output_path
    );
    println!(
        "  {}: '{}'",
        style(DefaultField::Editor.key()).cyan(),
        defaults.editor_id
    );

    Ok(())
}

pub fn fields() -> Result<()> {
    println!("{}", style("Configurable default fields:").bold());
    for field in DefaultField::ALL {
        println!("  {}: {}", style(field.key()).cyan(), field.describe());
    }

    Ok(())
}
