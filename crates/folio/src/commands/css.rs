//! `folio css` command implementation.

use clap::Args;
use folio_renderer::{DEFAULT_THEME, theme_css};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the css command.
#[derive(Args)]
pub(crate) struct CssArgs {
    /// Bundled highlight theme.
    #[arg(short, long, default_value = DEFAULT_THEME)]
    theme: String,
}

impl CssArgs {
    /// Print the stylesheet for highlighted code blocks.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let css = theme_css(&self.theme)?;
        Output::new().data(&css)?;
        Ok(())
    }
}
