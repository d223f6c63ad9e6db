use console::style;
use miette::Result;

pub fn run(language: String, project: bool) -> Result<()> {
    let workspace = super::workspace()?;
    let profile = workspace.languages().resolve(&language, project)?;

    let created = workspace.templates().seed_defaults(&profile.id)?;

    if created > 0 {
        println!(
            "{} Created {} missing default template{} for {}",
            style("✓").green().bold(),
            created,
            if created == 1 { "" } else { "s" },
            style(&profile.id).cyan()
        );
    } else {
        println!("All default templates already exist for {}", style(&profile.id).cyan());
    }

    Ok(())
}
