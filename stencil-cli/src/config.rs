use anyhow::Result;
use clap::ArgMatches;
use clap::parser::ValueSource;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StencilConfig {
    /// Build configuration
    pub build: BuildConfig,
    /// Site configuration (from stencil-core)
    #[serde(flatten)]
    pub site: stencil_core::config::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Site folder containing templates, partials, assets and blogposts
    pub root: String,
    /// Output directory for the generated site
    pub output: String,
    /// Configuration file path
    pub config: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: "./site".to_string(),
            output: "./build".to_string(),
            config: "./stencil.toml".to_string(),
        }
    }
}

impl StencilConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (STENCIL_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .cloned()
            .unwrap_or_else(|| BuildConfig::default().config);

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(ConfigBuilder::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::from(Path::new(&config_file)));
        }

        // 3. Add environment variables with STENCIL_ prefix
        builder = builder.add_source(
            Environment::with_prefix("STENCIL")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with arguments the user actually passed
        for key in ["root", "output", "config"] {
            if let Some(value) = explicit_arg(args, key) {
                builder = builder.set_override(format!("build.{key}"), value)?;
            }
        }

        // Build and deserialize
        let config = builder.build()?;
        let stencil_config: StencilConfig = config.try_deserialize()?;

        Ok(stencil_config)
    }

    /// Get just the site configuration for passing to stencil-core
    pub fn site_config(&self) -> &stencil_core::config::Config {
        &self.site
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

/// Value of `key` only when it came from the command line, so clap defaults
/// never shadow the config file or environment.
fn explicit_arg(args: &ArgMatches, key: &str) -> Option<String> {
    match args.value_source(key) {
        Some(ValueSource::CommandLine) => args.get_one::<String>(key).cloned(),
        _ => None,
    }
}

/// Load configuration specifically for build commands
pub fn load_build_config(args: &ArgMatches) -> Result<StencilConfig> {
    StencilConfig::load(args)
}
