//! One-shot subcommands.

use std::path::Path;

use anyhow::Result;
use anyhow::bail;
use console_lib::ConsoleClient;
use console_lib::api::Resource;
use console_lib::api::query::ListParams;
use console_lib::api::query::PageResult;
use console_lib::api::query::PageSize;
use console_lib::api::query::SortSpec;
use console_lib::model::Record;
use console_lib::model::Row;
use console_lib::table::presets;
use log::info;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;

use crate::render;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page: u32,
    pub limit: PageSize,
    pub sort: Option<SortSpec>,
    pub query: Option<String>,
    pub json: bool,
}

impl ListOptions {
    fn params(&self, resource: Resource) -> ListParams {
        let mut params = ListParams::new()
            .page(self.page.max(1))
            .limit(self.limit)
            .sort_by(self.sort.clone().unwrap_or_else(|| resource.default_sort()));
        if let Some(query) = &self.query {
            params = params.query(query.as_str());
        }
        params
    }
}

pub async fn list(client: &ConsoleClient, resource: Resource, options: ListOptions) -> Result<()> {
    if options.query.is_some() && !resource.search_enabled() {
        bail!("{} cannot be searched", resource.title());
    }
    let page = client.list_records(resource, &options.params(resource)).await?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }
    println!("{}", page_text(resource, options.page.max(1), &page));
    Ok(())
}

fn page_text(resource: Resource, page_number: u32, page: &PageResult<Record>) -> String {
    if page.is_empty() {
        return "No records.".to_string();
    }
    let columns = presets::columns_for(resource);
    let mut headers = vec!["ID".to_string()];
    headers.extend(columns.iter().map(|c| c.header().to_string()));
    let rows: Vec<Vec<String>> = page
        .results()
        .iter()
        .map(|record| {
            let mut cells = vec![record.row_id().to_string()];
            cells.extend(columns.iter().map(|c| c.render(record)));
            cells
        })
        .collect();

    let mut lines = render::grid(&headers, &rows);
    let pages = page
        .total_pages()
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    lines.push(format!(
        "Page {page_number} / {pages} · {} results",
        page.total_results()
    ));
    lines.join("\n")
}

pub async fn show(client: &ConsoleClient, resource: Resource, id: &str) -> Result<()> {
    let record = client.get(resource, id).await?;
    println!("{}", render::record(record.as_value()));
    Ok(())
}

pub async fn delete(client: &ConsoleClient, resource: Resource, id: &str, yes: bool) -> Result<()> {
    if !resource.supports_delete() {
        bail!("{} cannot be deleted", resource.title());
    }
    if !yes {
        let answer = prompt(&format!("Delete {} '{id}'? [y/N] ", resource.name())).await?;
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }
    client.delete(resource, id).await?;
    println!("Deleted.");
    Ok(())
}

/// Signs in. With `save_to`, the access token is written to the settings file.
pub async fn login(
    client: &ConsoleClient,
    email: &str,
    password: Option<String>,
    save_to: Option<(Settings, &Path)>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ").await?,
    };
    let response = client.login(email, &password).await?;
    let token = response.tokens.access.token.clone();
    info!("signed in as {}", response.user.email);
    println!(
        "Signed in as {} ({}), token expires {}",
        response.user.email,
        response.user.role,
        response.tokens.access.expires.format("%Y-%m-%d %H:%M UTC")
    );

    match save_to {
        Some((settings, path)) => {
            let settings = settings.with_overrides(None, Some(token));
            settings.save(path)?;
            println!("Token saved to {}", path.display());
        }
        None => println!("{token}"),
    }
    Ok(())
}

pub async fn stats(client: &ConsoleClient) -> Result<()> {
    let stats = client.statistics().await?;
    println!("{}", render::record(&stats));
    Ok(())
}

async fn prompt(message: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim().to_string())
}
