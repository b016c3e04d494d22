use std::path::Path;

use anyhow::Context;
use figment::providers::{Format, Toml};
use hinge_config::HingeConfig;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<HingeConfig> {
    load_dotenv()?;

    let mut figment = HingeConfig::figment();
    if let Some(path) = &flags.config {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: HingeConfig = figment.extract().context("failed to load hinge configuration")?;
    config.validate()?;
    tracing::debug!(style = ?config.formatting.brace_style, "configuration loaded");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
