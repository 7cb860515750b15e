//! CLI command implementations.

pub(crate) mod css;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_server::{server_config_from_config, site_from_config};
use folio_site::Site;

pub(crate) use css::CssArgs;
pub(crate) use layout::LayoutArgs;
pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

use crate::error::CliError;

/// Options shared by commands that read from the content origin.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content origin URL (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,
}

impl SourceArgs {
    /// Load configuration with these overrides applied.
    pub(crate) fn load_config(
        &self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            base_url: self.base_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Build a site loader from configuration.
    pub(crate) fn site(&self, version: &str) -> Result<Site, CliError> {
        let config = self.load_config(None, None)?;
        Ok(site_from_config(&server_config_from_config(
            &config,
            version.to_owned(),
        )))
    }
}
