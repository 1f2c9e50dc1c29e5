//! Interactive listing session (`console browse <resource>`).
//!
//! Reads one command per line from stdin while the table keeps fetching in
//! the background of the same task. The screen is redrawn after every
//! command and whenever the current page arrives or fails.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use console_lib::ConsoleClient;
use console_lib::api::Resource;
use console_lib::api::ResourceLoader;
use console_lib::api::query::PageSize;
use console_lib::error::Error;
use console_lib::model::Record;
use console_lib::model::Row;
use console_lib::table::DeletePhase;
use console_lib::table::RemoteTable;
use console_lib::table::RowActions;
use console_lib::table::TableEvent;
use console_lib::table::presets;
use log::info;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::render;
use crate::settings::Settings;

const HELP: &str = "\
commands:
  n | next          p | prev          first          last
  goto N            size N (10,20,30,40,50)
  sort COLUMN       sort by a column (name or number), again to flip
  /TEXT             search, / alone clears
  open N            show row N          edit N    show row N for editing
  del N             delete row N, then yes | no
  r | refresh       h | help            q | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Next,
    Previous,
    First,
    Last,
    Goto(String),
    Size(u32),
    Sort(String),
    Search(String),
    Open(usize),
    Edit(usize),
    Delete(usize),
    Confirm,
    Cancel,
    Refresh,
    Help,
    Quit,
    Empty,
}

impl Input {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(text) = line.strip_prefix('/') {
            return Ok(Self::Search(text.trim().to_string()));
        }
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };
        let row = |arg: &str| -> Result<usize, String> {
            match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n - 1),
                _ => Err(format!("expected a row number, got '{arg}'")),
            }
        };

        Ok(match word.to_lowercase().as_str() {
            "" => Self::Empty,
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "first" => Self::First,
            "last" => Self::Last,
            "goto" | "g" => Self::Goto(arg.to_string()),
            "size" => Self::Size(
                arg.parse()
                    .map_err(|_| format!("expected a page size, got '{arg}'"))?,
            ),
            "sort" | "s" if !arg.is_empty() => Self::Sort(arg.to_string()),
            "open" | "o" => Self::Open(row(arg)?),
            "edit" | "e" => Self::Edit(row(arg)?),
            "del" | "delete" | "d" => Self::Delete(row(arg)?),
            "yes" | "y" => Self::Confirm,
            "no" => Self::Cancel,
            "r" | "refresh" => Self::Refresh,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(format!("unknown command '{line}', type 'help'")),
        })
    }
}

enum Activated {
    Open(Record),
    Edit(Record),
}

/// Row callbacks of the terminal session.
struct BrowseActions {
    client: ConsoleClient,
    resource: Resource,
    activated: mpsc::UnboundedSender<Activated>,
}

#[async_trait]
impl RowActions<Record> for BrowseActions {
    fn on_row(&self, row: &Record) {
        let _ = self.activated.send(Activated::Open(row.clone()));
    }

    fn on_edit(&self, row: &Record) {
        let _ = self.activated.send(Activated::Edit(row.clone()));
    }

    async fn on_delete(&self, row: &Record) -> Result<(), Error> {
        self.client.delete(self.resource, row.row_id().as_str()).await
    }
}

enum Wake {
    Line(Option<String>),
    Table(TableEvent),
    Activated(Activated),
}

/// Runs the session until `quit` or end of input.
pub async fn run(client: ConsoleClient, resource: Resource, settings: &Settings) -> Result<()> {
    let (tx, mut activated) = mpsc::unbounded_channel();
    let actions = Arc::new(BrowseActions {
        client: client.clone(),
        resource,
        activated: tx,
    });
    let mut table = RemoteTable::builder(Arc::new(ResourceLoader::new(client.clone(), resource)))
        .options(presets::options_for(resource))
        .columns(presets::columns_for(resource))
        .page_size(settings.page_size()?)
        .search_debounce(settings.search_debounce())
        .actions(actions)
        .build();

    println!("{} (type 'help' for commands)", resource.title());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let busy = table.is_busy();
        let wake = tokio::select! {
            line = lines.next_line() => Wake::Line(line?),
            Some(event) = table.next_event(), if busy => Wake::Table(event),
            Some(row) = activated.recv() => Wake::Activated(row),
        };

        match wake {
            Wake::Line(None) => break,
            Wake::Line(Some(line)) => match Input::parse(&line) {
                Ok(Input::Quit) => break,
                Ok(input) => {
                    if apply(&mut table, input).await {
                        println!("{}", render::table(&table.view()));
                    }
                }
                Err(message) => println!("{message}"),
            },
            Wake::Table(event) => {
                if redraws(&event) {
                    println!("{}", render::table(&table.view()));
                }
            }
            Wake::Activated(Activated::Open(row)) => show(&client, resource, &row).await,
            Wake::Activated(Activated::Edit(row)) => {
                println!("editing is not available in the terminal; current values:");
                println!("{}", render::record(row.as_value()));
            }
        }
    }
    Ok(())
}

fn redraws(event: &TableEvent) -> bool {
    match event {
        TableEvent::Loaded { current, .. } | TableEvent::Failed { current, .. } => *current,
        TableEvent::SearchCommitted(_) => true,
        TableEvent::Superseded { .. } => false,
    }
}

/// Applies one command. Returns whether the table should be redrawn now.
async fn apply(table: &mut RemoteTable<Record>, input: Input) -> bool {
    match input {
        Input::Next => table.next_page(),
        Input::Previous => table.previous_page(),
        Input::First => table.first_page(),
        Input::Last => table.last_page(),
        Input::Goto(page) => table.jump_to_page(&page),
        Input::Size(size) => match PageSize::try_from(size) {
            Ok(size) => table.set_page_size(size),
            Err(err) => {
                println!("{err}");
                return false;
            }
        },
        Input::Sort(column) => match resolve_column(table, &column) {
            Some(id) => table.toggle_sort(&id),
            None => {
                println!("no column '{column}'");
                return false;
            }
        },
        Input::Search(text) => {
            if !table.options().search_enabled {
                println!("this listing has no search");
                return false;
            }
            table.set_search(text);
            return false;
        }
        Input::Open(row) | Input::Edit(row) if table.row(row).is_none() => {
            println!("no row {}", row + 1);
            return false;
        }
        Input::Open(row) => {
            table.click_row(row);
            return false;
        }
        Input::Edit(row) => {
            if !table.edit_row(row) {
                println!("this listing has no edit action");
            }
            return false;
        }
        Input::Delete(row) => {
            if !table.request_delete(row) {
                println!("cannot delete row {} here", row + 1);
                return false;
            }
        }
        Input::Confirm => {
            if table.delete_phase() == DeletePhase::Idle {
                println!("nothing to confirm");
                return false;
            }
            table.set_deleting(true);
            println!("{}", render::table(&table.view()));
            let result = table.confirm_delete().await;
            table.set_deleting(false);
            if let Err(err) = result {
                println!("delete failed: {err}");
            }
        }
        Input::Cancel => table.cancel_delete(),
        Input::Refresh => table.refetch(),
        Input::Help => {
            println!("{HELP}");
            return false;
        }
        Input::Quit | Input::Empty => return false,
    }
    true
}

/// Finds a column by id, header or 1-based number.
fn resolve_column(table: &RemoteTable<Record>, name: &str) -> Option<String> {
    let columns = table.columns();
    if let Ok(n) = name.parse::<usize>() {
        return columns.get(n.checked_sub(1)?).map(|c| c.id().to_string());
    }
    columns
        .iter()
        .find(|c| c.id().eq_ignore_ascii_case(name) || c.header().eq_ignore_ascii_case(name))
        .map(|c| c.id().to_string())
}

async fn show(client: &ConsoleClient, resource: Resource, row: &Record) {
    match client.get(resource, row.row_id().as_str()).await {
        Ok(record) => println!("{}", render::record(record.as_value())),
        Err(err) => {
            info!("detail fetch failed, showing listing row: {err}");
            println!("{}", render::record(row.as_value()));
        }
    }
}

#[cfg(test)]
mod tests {
    use console_lib::api::FnLoader;
    use console_lib::api::query::PageResult;

    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(Input::parse("n"), Ok(Input::Next));
        assert_eq!(Input::parse(" prev "), Ok(Input::Previous));
        assert_eq!(Input::parse("goto 3"), Ok(Input::Goto("3".to_string())));
        assert_eq!(Input::parse("goto"), Ok(Input::Goto(String::new())));
        assert_eq!(Input::parse("size 20"), Ok(Input::Size(20)));
        assert!(Input::parse("size big").is_err());
        assert_eq!(Input::parse(""), Ok(Input::Empty));
    }

    #[test]
    fn test_parse_rows_are_one_based() {
        assert_eq!(Input::parse("open 1"), Ok(Input::Open(0)));
        assert_eq!(Input::parse("del 4"), Ok(Input::Delete(3)));
        assert!(Input::parse("open 0").is_err());
        assert!(Input::parse("edit").is_err());
    }

    #[test]
    fn test_parse_search_and_sort() {
        assert_eq!(Input::parse("/ john doe "), Ok(Input::Search("john doe".to_string())));
        assert_eq!(Input::parse("/"), Ok(Input::Search(String::new())));
        assert_eq!(Input::parse("sort Name"), Ok(Input::Sort("Name".to_string())));
        assert!(Input::parse("sort").is_err());
        assert!(Input::parse("frobnicate").is_err());
    }

    #[test]
    fn test_only_current_page_events_redraw() {
        let key = RemoteTable::<Record>::builder(Arc::new(FnLoader::new(|_| async { Ok(PageResult::default()) })))
        .build()
        .current_key();
        assert!(redraws(&TableEvent::Loaded { key: key.clone(), current: true }));
        assert!(!redraws(&TableEvent::Loaded { key: key.clone(), current: false }));
        assert!(!redraws(&TableEvent::Superseded { key }));
    }
}
