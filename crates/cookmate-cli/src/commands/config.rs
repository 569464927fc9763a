use anyhow::{Context, Result};
use colored::Colorize;
use cookmate_infrastructure::{ConfigStorage, CookmateConfig, CookmatePaths};

/// Prints the effective configuration. The token is masked.
pub fn show(config: &CookmateConfig) -> Result<()> {
    let mut printable = config.clone();
    if printable.auth.token.is_some() {
        printable.auth.token = Some("********".to_string());
    }
    let text = toml::to_string_pretty(&printable).context("Failed to render configuration")?;
    println!("{text}");
    Ok(())
}

/// Writes the default configuration unless a file already exists.
pub fn init(paths: &CookmatePaths) -> Result<()> {
    let storage = ConfigStorage::new(paths.config_file());
    if storage.path().exists() {
        println!(
            "{}",
            format!("Config already exists at {}", storage.path().display()).yellow()
        );
        return Ok(());
    }

    storage.save(&CookmateConfig::default())?;
    println!(
        "{}",
        format!("Wrote {}", storage.path().display()).bright_green()
    );
    Ok(())
}
