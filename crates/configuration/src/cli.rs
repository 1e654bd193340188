use crate::error::ConfigError;
use crate::settings::Config;
use core_types::StrategyId;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments shared by every binary that loads a `Config`.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Overrides the `symbol_method` hyperparameter of the selected strategy.
    #[arg(long)]
    pub symbol_method: Option<i64>,

    /// Overrides any hyperparameter of the selected strategy, e.g. `--param risk=3`.
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, Decimal)>,
}

impl ConfigArgs {
    /// Loads the file (a missing default file falls back to defaults) and applies the
    /// overrides to the section of `strategy`.
    pub fn load(&self, strategy: StrategyId) -> Result<Config, ConfigError> {
        let mut config = if self.config.as_os_str() == "config.toml" {
            crate::load_config()?
        } else {
            crate::load_config_from(&self.config)?
        };

        let params = config.strategies.params_mut(strategy);
        if let Some(code) = self.symbol_method {
            params.set("symbol_method", Decimal::from(code))?;
        }
        for (name, value) in &self.params {
            params.set(name, *value)?;
        }
        tracing::debug!(%strategy, overrides = self.params.len(), "Applied command-line overrides");
        Ok(config)
    }
}

fn parse_param(raw: &str) -> Result<(String, Decimal), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let value = Decimal::from_str(value.trim()).map_err(|e| format!("invalid value for {}: {}", name, e))?;
    Ok((name.trim().to_string(), value))
}
