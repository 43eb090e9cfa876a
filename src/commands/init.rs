use crate::config::DEFAULT_CONFIG_FILE;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Fraclus configuration

# Number of nearest-neighbor supporters for the fractal dimension
# estimate. Must be at least 2.
supporters = 5

# Linkage metric: "fractal-dimension" or "centroid".
metric = "fractal-dimension"
"#;

    fs::write(&config_path, default_config)?;
    println!("Created {DEFAULT_CONFIG_FILE} configuration file");

    Ok(())
}
