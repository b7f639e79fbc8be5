use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_otp, generate_random_code};
use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum CodeCommands {
    #[command(about = "Generate a numeric one-time password")]
    Otp {
        #[arg(long, help = "Number of digits (defaults to SECURITY_OTP_LENGTH)")]
        length: Option<usize>,
    },

    #[command(about = "Generate an alphanumeric code")]
    Random {
        #[arg(long, help = "Number of characters (defaults to SECURITY_CODE_LENGTH)")]
        length: Option<usize>,
    },
}

pub fn handle(cmd: CodeCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;

    let code = match cmd {
        CodeCommands::Otp { length } => generate_otp(positive(length.unwrap_or(security.otp_length))?),
        CodeCommands::Random { length } => generate_random_code(positive(length.unwrap_or(security.code_length))?),
    };

    output_data(&output_format, json!({ "code": code }), |_| println!("{}", code))
}

fn positive(length: usize) -> anyhow::Result<usize> {
    if length == 0 {
        anyhow::bail!("Length must be at least 1");
    }
    Ok(length)
}
