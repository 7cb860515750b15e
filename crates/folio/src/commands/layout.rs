//! `folio layout` command implementation.

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the layout command.
#[derive(Args)]
pub(crate) struct LayoutArgs {
    /// Route slug to compute breadcrumbs for (default: site root).
    #[arg(default_value = "")]
    slug: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl LayoutArgs {
    /// Fetch settings and print layout JSON with breadcrumbs.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let site = self.source.site(version)?;
        let layout = site.load_layout(&self.slug).await?;

        let json = serde_json::to_string_pretty(&layout)?;
        Output::new().data(&format!("{json}\n"))?;
        Ok(())
    }
}
