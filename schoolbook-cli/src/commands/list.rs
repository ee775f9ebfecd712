//! List-schools command

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;

use schoolbook_core::School;

use super::{handle_response, schools_url, DEFAULT_ENDPOINT};

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// API endpoint
    #[arg(long, env = "SCHOOLBOOK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Print the raw JSON array (for piping to jq)
    #[arg(long)]
    pub json: bool,
}

/// Fetch and print every school, newest first
pub async fn run_list(args: ListArgs) -> Result<()> {
    let schools: Vec<School> = handle_response(
        Client::new()
            .get(schools_url(&args.endpoint))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", args.endpoint))?,
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schools)?);
    } else {
        print!("{}", render_human(&schools, &args.endpoint));
    }

    Ok(())
}

fn render_human(schools: &[School], endpoint: &str) -> String {
    if schools.is_empty() {
        return "No schools yet.\n".to_string();
    }

    let base = endpoint.trim_end_matches('/');
    let mut out = String::new();
    for school in schools {
        out.push_str(&format!("#{} {}\n", school.id, school.name));
        out.push_str(&format!(
            "    {}, {}, {}\n",
            school.address, school.city, school.state
        ));
        out.push_str(&format!(
            "    contact: {}  email: {}\n",
            school.contact, school.email_id
        ));
        out.push_str(&format!("    image: {}{}\n", base, school.image));
    }
    out
}
