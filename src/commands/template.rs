use console::style;
use miette::Result;

pub fn run(name: String, language: String, description: String, project: bool) -> Result<()> {
    let workspace = super::workspace()?;
    let profile = workspace.languages().resolve(&language, project)?;

    let record = workspace
        .templates()
        .create(&profile.id, &name, &description)?;

    let path = workspace
        .templates()
        .language_dir(&profile.id)
        .join(format!("{}.txt", record.name));
    println!(
        "{} Successfully created '{}' at {}",
        style("✓").green().bold(),
        record.name,
        style(path.display()).cyan()
    );

    Ok(())
}
