//! Plain-text drawing of tables and records.

use console_lib::table::TableView;
use serde_json::Value;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Widest a cell may get before it is cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 36;

/// Lays out `rows` under `headers` in aligned columns.
pub fn grid(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell_width(cell));
            }
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| pad(&truncate(cells.get(i).map_or("", String::as_str), *width), *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers));
    out.push(
        widths
            .iter()
            .map(|width| "─".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(rows.iter().map(|row| line(row)));
    out
}

/// Draws a table view as it appears in `console browse`.
pub fn table(view: &TableView) -> String {
    let mut headers = vec!["#".to_string()];
    headers.extend(view.headers.iter().map(|header| {
        match header.indicator() {
            "" => header.label.clone(),
            arrow => format!("{} {arrow}", header.label),
        }
    }));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![(i + 1).to_string()];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();

    let mut lines = Vec::new();
    if let Some(search) = &view.search {
        lines.push(format!("Search: {search}"));
    }
    if rows.is_empty() && !view.is_fetching {
        lines.push("No records.".to_string());
    } else {
        lines.extend(grid(&headers, &rows));
    }

    let footer = &view.footer;
    let mut status = footer.page_label();
    if let Some(total) = footer.total_results {
        status.push_str(&format!(" · {total} results"));
    }
    status.push_str(&format!(" · {} per page", footer.page_size));
    if view.is_fetching {
        status.push_str(" · loading…");
    }
    lines.push(status);

    let mut actions = vec!["open N"];
    if view.show_edit {
        actions.push("edit N");
    }
    if view.show_delete {
        actions.push("del N");
    }
    lines.push(format!("Row actions: {}", actions.join(", ")));

    if let Some(error) = &view.error {
        lines.push(format!("error: {error}"));
    }
    if let Some(confirm) = &view.confirm {
        let state = if confirm.is_deleting { " (deleting…)" } else { "" };
        lines.push(format!(
            "{}: {} [{}] yes/no{state}",
            confirm.title, confirm.message, confirm.target
        ));
    }
    lines.join("\n")
}

/// Draws a JSON object as `key: value` lines, nested values as JSON.
pub fn record(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let width = map.keys().map(|key| cell_width(key)).max().unwrap_or(0);
            map.iter()
                .map(|(key, value)| {
                    let text = match value {
                        Value::String(s) => s.clone(),
                        Value::Null => "-".to_string(),
                        other => other.to_string(),
                    };
                    format!("{}  {text}", pad(key, width))
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        other => other.to_string(),
    }
}

fn cell_width(text: &str) -> usize {
    UnicodeWidthStr::width(text).min(MAX_CELL_WIDTH)
}

fn truncate(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grid_aligns_wide_characters() {
        let lines = grid(
            &strings(&["Name", "Role"]),
            &[strings(&["Şükrü", "Admin"]), strings(&["李雷", "User"])],
        );
        assert_eq!(lines[0], "Name   Role");
        assert_eq!(lines[2], "Şükrü  Admin");
        assert_eq!(lines[3], "李雷   User");
    }

    #[test]
    fn test_long_cells_are_cut() {
        let long = "x".repeat(50);
        let lines = grid(&strings(&["Value"]), &[vec![long]]);
        assert_eq!(UnicodeWidthStr::width(lines[2].as_str()), MAX_CELL_WIDTH);
        assert!(lines[2].ends_with('…'));
    }

    #[test]
    fn test_record_lines() {
        let text = record(&json!({"id": "1", "subject": null, "count": 2}));
        assert_eq!(text, "count    2\nid       1\nsubject  -");
    }
}
