use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum PasswordCommands {
    #[command(about = "Check a password against the configured policy")]
    Check {
        #[arg(help = "Password to check")]
        password: String,
    },
}

pub fn handle(cmd: PasswordCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PasswordCommands::Check { password } => {
            let policy = config::config().security.password_policy();
            let violations = policy.validate(&password).err().unwrap_or_default();

            let data = json!({
                "valid": violations.is_empty(),
                "violations": violations,
            });
            output_data(&output_format, data, |_| {
                if violations.is_empty() {
                    println!("✓ Password meets policy");
                }
                for violation in &violations {
                    println!("✗ {}", violation);
                }
            })
        }
    }
}
