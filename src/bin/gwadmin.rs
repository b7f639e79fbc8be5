use clap::Parser;
use gateway_admin_api::cli::utils::output_error;
use gateway_admin_api::cli::{Cli, OutputFormat};
use gateway_admin_api::error::ApiError;
use gateway_admin_api::filter::FilterError;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present so FILTER_TABLES_PATH, APP_ENV, etc. are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = gateway_admin_api::cli::run(cli) {
        match output_format {
            OutputFormat::Json => {
                let message = e.to_string();
                let code = match e.downcast::<FilterError>() {
                    Ok(filter_error) => ApiError::from(filter_error).error_code(),
                    Err(_) => "CLI_ERROR",
                };
                output_error(&output_format, &message, Some(code))?;
            }
            OutputFormat::Text => match std::env::var("CLI_VERBOSE").as_deref() {
                Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
                _ => eprintln!("Error: {e}"),
            },
        }
        std::process::exit(1);
    }

    Ok(())
}
