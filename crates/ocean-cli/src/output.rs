//! Terminal output formatting.

use colored::Colorize;
use ocean_graph::ImportReport;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may grow before it is truncated.
const MAX_CELL_WIDTH: usize = 40;

/// How many failed rows the import summary lists.
const MAX_LISTED_FAILURES: usize = 10;

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Lay out rows as aligned text lines. CJK text counts double width.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| truncate_visual(c, MAX_CELL_WIDTH)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| pad_right(v, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(line(headers.to_vec()));
    lines.push("─".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &cells {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Print rows as a table.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("{}", "  (none)".dimmed());
        return;
    }
    let mut lines = format_table(headers, &rows).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// Print the outcome of an import run.
pub fn print_import_report(report: &ImportReport) {
    let headline = if report.is_clean() {
        "Import complete:".green().bold()
    } else {
        "Import finished with errors:".yellow().bold()
    };
    println!("\n{}", headline);
    println!("  Rows read:             {}", report.rows_total);
    println!("  Rows imported:         {}", report.rows_succeeded.to_string().green());
    if report.rows_failed > 0 {
        println!("  Rows failed:           {}", report.rows_failed.to_string().red());
    }
    println!("  Node merges:           {}", report.nodes_merged);
    println!("  Relationship merges:   {}", report.relationships_merged);

    for failure in report.failures.iter().take(MAX_LISTED_FAILURES) {
        println!(
            "  {} row {} ({}): {}",
            "✗".red(),
            failure.index + 1,
            failure.topic.as_deref().unwrap_or("-"),
            failure.error.dimmed()
        );
    }
    if report.failures.len() > MAX_LISTED_FAILURES {
        println!(
            "  {}",
            format!("... and {} more", report.failures.len() - MAX_LISTED_FAILURES).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_counts_cjk_as_double_width() {
        assert_eq!(pad_right("海洋", 6), "海洋  ");
        assert_eq!(pad_right("sea", 6), "sea   ");
    }

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("海洋污染治理措施", 8), "海洋污..");
    }

    #[test]
    fn test_table_columns_align_with_cjk() {
        let lines = format_table(
            &["Name", "Count"],
            &[
                vec!["渤海".to_string(), "3".to_string()],
                vec!["North Sea".to_string(), "12".to_string()],
            ],
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name       Count");
        assert_eq!(lines[2], "渤海".to_string() + &" ".repeat(7) + "3");
        assert_eq!(lines[3], "North Sea  12");
    }
}
