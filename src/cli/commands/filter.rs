use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::utils::{output_data, parse_pairs};
use crate::cli::OutputFormat;
use crate::config;
use crate::filter::{FilterRegistry, FilterResolver, FilterTable, FilterWhere};

#[derive(Subcommand)]
pub enum FilterCommands {
    #[command(about = "List filter tables and their field rules")]
    Tables {
        #[arg(long, help = "Only show this table")]
        table: Option<String>,
    },

    #[command(about = "Resolve query parameters against a filter table")]
    Resolve {
        #[arg(help = "Filter table name, e.g. listUsers")]
        table: String,
        #[arg(help = "Query parameters as key=value")]
        params: Vec<String>,
        #[arg(long, help = "Render the SQL WHERE clause instead of the filter object")]
        sql: bool,
    },
}

pub fn handle(cmd: FilterCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = FilterRegistry::from_config(&config::config().filter)?;

    match cmd {
        FilterCommands::Tables { table } => {
            let tables: Vec<&FilterTable> = match table {
                Some(name) => vec![registry.get(&name)?],
                None => registry.names().into_iter().map(|n| registry.get(n)).collect::<Result<_, _>>()?,
            };
            let data = Value::Array(tables.iter().map(|t| table_json(t)).collect());
            output_data(&output_format, data, |_| {
                for table in &tables {
                    println!("{}", table.name());
                    for rule in table.rules() {
                        let targets = rule.targets().join(" | ");
                        println!("  {:<20} {:<12} -> {}", rule.key, rule.value_type, targets);
                    }
                }
            })
        }
        FilterCommands::Resolve { table, params, sql } => {
            let pairs = parse_pairs(&params)?;
            let resolver = FilterResolver::new(registry);
            let filter = resolver.resolve(&table, pairs)?;

            if sql {
                let result = FilterWhere::generate(&filter, 0);
                let data = json!({ "where": result.query, "params": result.params });
                output_data(&output_format, data, |_| {
                    println!("WHERE {}", result.query);
                    for (i, param) in result.params.iter().enumerate() {
                        println!("  ${} = {}", i + 1, param);
                    }
                })
            } else {
                let data = filter.to_json();
                output_data(&output_format, data, |data| {
                    println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
                })
            }
        }
    }
}

fn table_json(table: &FilterTable) -> Value {
    json!({
        "name": table.name(),
        "rules": table.rules(),
    })
}
