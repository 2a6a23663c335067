use anyhow::Context;
use json_ts_types::cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // logs go to stderr; stdout is reserved for generated output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface
        .run()
        .context("json-ts-types failed")?;
    Ok(())
}
