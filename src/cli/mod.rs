pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "gwadmin")]
#[command(about = "Gateway admin CLI - filter tables, pagination and one-time codes")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Inspect filter tables and resolve list queries")]
    Filter {
        #[command(subcommand)]
        cmd: commands::filter::FilterCommands,
    },

    #[command(about = "Normalize page and limit parameters")]
    Page(commands::page::PageArgs),

    #[command(about = "Generate one-time passwords and random codes")]
    Code {
        #[command(subcommand)]
        cmd: commands::code::CodeCommands,
    },

    #[command(about = "Password policy checks")]
    Password {
        #[command(subcommand)]
        cmd: commands::password::PasswordCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Filter { cmd } => commands::filter::handle(cmd, output_format),
        Commands::Page(args) => commands::page::handle(args, output_format),
        Commands::Code { cmd } => commands::code::handle(cmd, output_format),
        Commands::Password { cmd } => commands::password::handle(cmd, output_format),
    }
}
