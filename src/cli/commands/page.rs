use clap::Args;
use serde_json::json;

use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::config;
use crate::pagination::{PageQuery, Pagination};

#[derive(Args)]
pub struct PageArgs {
    #[arg(long, help = "Requested page (1-based)")]
    pub page: Option<String>,

    #[arg(long, help = "Requested page size")]
    pub limit: Option<String>,
}

pub fn handle(args: PageArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let query = PageQuery { page: args.page, limit: args.limit };
    let pagination = Pagination::normalize(&query).capped(config::config().filter.max_limit);

    let data = json!({
        "page": pagination.page,
        "limit": pagination.limit,
        "offset": pagination.offset(),
    });
    output_data(&output_format, data, |_| {
        println!("page {} limit {} offset {}", pagination.page, pagination.limit, pagination.offset());
    })
}
