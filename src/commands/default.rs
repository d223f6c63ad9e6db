use console::style;
use miette::Result;

pub fn run(language: String, field: String, value: String) -> Result<()> {
    let workspace = super::workspace()?;
    workspace.defaults().update(&language, &field, &value)?;

    println!(
        "{} Successfully updated field '{}' for {}",
        style("✓").green().bold(),
        field,
        style(&language).cyan()
    );

    Ok(())
}
