//! `folio render` command implementation.

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Route slug to render (default: site root).
    #[arg(default_value = "")]
    slug: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl RenderArgs {
    /// Fetch and render one document, printing `{text, matter}` JSON.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let site = self.source.site(version)?;
        let document = site.load_page(&self.slug).await?;

        let json = serde_json::to_string_pretty(&document)?;
        Output::new().data(&format!("{json}\n"))?;
        Ok(())
    }
}
