//! Output formatting utilities for CLI commands

use anyhow::Context;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Print a table with cyan headers
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}

pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }
    table
}

/// Print a table where each cell may carry a color
pub fn print_table_colored(headers: &[&str], rows: Vec<Vec<(String, Option<Color>)>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        let cells: Vec<Cell> = row
            .into_iter()
            .map(|(text, color)| match color {
                Some(c) => Cell::new(text).fg(c),
                None => Cell::new(text),
            })
            .collect();
        table.add_row(cells);
    }

    println!("{}", table);
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{}", text);
    Ok(())
}

/// `valid` out of `total` as a percentage with one decimal ("87.5%").
pub fn format_rate(valid: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", valid as f64 * 100.0 / total as f64)
}

/// Green for a full rate, yellow when partial, red at zero.
pub fn color_for_rate(valid: usize, total: usize) -> Color {
    if total > 0 && valid == total {
        Color::Green
    } else if valid == 0 {
        Color::Red
    } else {
        Color::Yellow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(7, 8), "87.5%");
        assert_eq!(format_rate(3, 3), "100.0%");
        assert_eq!(format_rate(0, 0), "-");
    }

    #[test]
    fn test_color_for_rate() {
        assert_eq!(color_for_rate(2, 2), Color::Green);
        assert_eq!(color_for_rate(1, 2), Color::Yellow);
        assert_eq!(color_for_rate(0, 2), Color::Red);
    }

    #[test]
    fn test_build_table_contains_cells() {
        let table = build_table(&["Zone", "Total"], vec![vec!["bathroom".into(), "4".into()]]);
        let text = table.to_string();
        assert!(text.contains("bathroom"));
        assert!(text.contains("Total"));
    }
}
