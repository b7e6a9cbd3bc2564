use release_index::config::Config;
use release_index::core::path::config_file;
use release_index::core::{IndexError, IndexResult};
use std::path::Path;

/// Print the effective configuration as YAML
pub fn show(explicit: Option<&Path>) -> IndexResult<()> {
    let config = Config::load(explicit)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

/// Print where the config file is looked up
pub fn path() -> IndexResult<()> {
    let path = config_file()?;
    println!("{}", path.display());
    if !path.exists() {
        println!("  (not created yet, defaults are used)");
    }
    Ok(())
}

/// Write a default config file
pub fn init(force: bool) -> IndexResult<()> {
    let path = config_file()?;
    if path.exists() && !force {
        return Err(IndexError::Config(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
