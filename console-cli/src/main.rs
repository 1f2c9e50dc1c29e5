//! Command-line admin console.
//!
//! ```bash
//! console list users --sort email:asc --query ali
//! console show markets BIST
//! console delete users 64f1c0 --yes
//! console browse reports
//! ```

mod browse;
mod commands;
mod logging;
mod paths;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use console_lib::api::Resource;
use console_lib::api::query::PageSize;
use console_lib::api::query::SortSpec;
use log::error;

use crate::settings::Settings;

/// Admin console for the platform REST API.
#[derive(Parser, Debug)]
#[command(name = "console", version, about)]
struct Cli {
    /// API root URL, without the `/v1` prefix
    #[arg(long, global = true, env = "CONSOLE_API_URL")]
    url: Option<String>,

    /// Bearer token of a signed-in operator
    #[arg(long, global = true, env = "CONSOLE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to the log file
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of a listing
    List {
        resource: Resource,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page (10, 20, 30, 40 or 50)
        #[arg(long, value_parser = parse_page_size)]
        limit: Option<PageSize>,
        /// Ordering as `field:asc` or `field:desc`
        #[arg(long)]
        sort: Option<SortSpec>,
        /// Search term, for listings that support it
        #[arg(long)]
        query: Option<String>,
        /// Print the raw JSON page
        #[arg(long)]
        json: bool,
    },
    /// Print a single record
    Show { resource: Resource, id: String },
    /// Delete a record
    Delete {
        resource: Resource,
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Sign in and print (or save) the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Store the token in the settings file
        #[arg(long)]
        save: bool,
    },
    /// Print dashboard statistics
    Stats,
    /// Browse a listing interactively
    Browse { resource: Resource },
}

fn parse_page_size(value: &str) -> Result<PageSize, String> {
    let rows: u32 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
    PageSize::try_from(rows).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let settings_path = match cli.config.clone() {
        Some(path) => path,
        None => paths::settings_file().context("no configuration directory on this platform")?,
    };
    let settings = Settings::load(&settings_path)?.with_overrides(cli.url.clone(), cli.token.clone());

    let result = run(cli.command, settings, &settings_path).await;
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

async fn run(command: Command, settings: Settings, settings_path: &std::path::Path) -> Result<()> {
    let client = settings.client()?;
    match command {
        Command::List {
            resource,
            page,
            limit,
            sort,
            query,
            json,
        } => {
            let limit = match limit {
                Some(limit) => limit,
                None => settings.page_size()?,
            };
            let options = commands::ListOptions {
                page,
                limit,
                sort,
                query,
                json,
            };
            commands::list(&client, resource, options).await
        }
        Command::Show { resource, id } => commands::show(&client, resource, &id).await,
        Command::Delete { resource, id, yes } => commands::delete(&client, resource, &id, yes).await,
        Command::Login {
            email,
            password,
            save,
        } => {
            let save_to = save.then(|| (settings.clone(), settings_path));
            commands::login(&client, &email, password, save_to).await
        }
        Command::Stats => commands::stats(&client).await,
        Command::Browse { resource } => browse::run(client, resource, &settings).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_arguments() {
        let cli = Cli::try_parse_from([
            "console", "list", "vip-channels", "--limit", "20", "--sort", "name:asc", "--url",
            "https://api.example.com",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://api.example.com"));
        match cli.command {
            Command::List {
                resource,
                limit,
                sort,
                page,
                ..
            } => {
                assert_eq!(resource, Resource::VipChannels);
                assert_eq!(limit, Some(PageSize::Twenty));
                assert_eq!(sort, Some(SortSpec::asc("name")));
                assert_eq!(page, 1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_resource_and_size() {
        assert!(Cli::try_parse_from(["console", "list", "planets"]).is_err());
        assert!(Cli::try_parse_from(["console", "list", "users", "--limit", "15"]).is_err());
    }
}
