use crate::error::ConfigError;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Alignment, ColumnMapping, Config, InputSource, Inputs, PortfolioParams, ReportSettings,
};

/// Prefix of environment variables overriding file values,
/// e.g. `PARITY_PORTFOLIO__WEIGHT_STOCK=0.5`.
pub const ENV_PREFIX: &str = "PARITY";

/// Command-line selection of the configuration file.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigArgs {
    /// Path to the TOML configuration file. Built-in defaults apply when it is absent.
    #[cfg_attr(feature = "clap", arg(long, default_value = "config.toml"))]
    pub config: PathBuf,
}

/// Loads the application configuration.
///
/// Built-in defaults are layered under the TOML file at `path` (optional) and
/// `PARITY_*` environment variables. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.portfolio.volatility_window, 36);
        assert_eq!(config.report.end.to_string(), "2019-12");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[portfolio]
weight_stock = 0.5
weight_bond = 0.5

[report]
start = "1950-01"
end = "1999-12"
output_dir = "out"
"#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.portfolio.weight_stock, 0.5);
        assert_eq!(config.portfolio.volatility_window, 36);
        assert_eq!(config.report.start.to_string(), "1950-01");
        assert_eq!(config.report.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn invalid_file_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\nstart = \"2020-01\"\nend = \"1930-01\"\n").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::ValidationError { setting, .. }) if setting == "report.start"
        ));
    }
}
