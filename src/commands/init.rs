use console::style;
use miette::Result;

use codeforge::config::{config_path, home_dir};

pub fn run(force: bool) -> Result<()> {
    let home = home_dir()?;
    let path = config_path(&home);

    if path.exists() && !force {
        eprintln!(
            "{} config already exists at {} (use --force to overwrite)",
            style("warning:").yellow().bold(),
            style(path.display()).cyan()
        );
        return Ok(());
    }

    let path = codeforge::init_config(&home)?;
    println!(
        "{} Successfully created config file at {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );

    Ok(())
}
