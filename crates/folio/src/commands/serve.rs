//! `folio serve` command implementation.

use clap::Args;
use folio_server::{run_server, server_config_from_config};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and fetch logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.source.load_config(self.host, self.port)?;

        output.highlight(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Content origin: {}", config.source.base_url));
        if let Some(dir) = &config.highlight_resolved.syntaxes_dir {
            output.info(&format!("Extra grammars: {}", dir.display()));
        }
        match config.source.timeout_secs {
            Some(secs) => output.info(&format!("Fetch timeout: {secs}s")),
            None => output.info("Fetch timeout: disabled"),
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config).await?;

        Ok(())
    }
}
