//! Markdown writing helpers.

// Internal imports (std, crate)
use crate::error::{Error, Result};

/// Writes a single table row, each cell padded to its column width.
pub fn write_row(row: &[String], widths: &[usize], padding: usize, indent: usize) -> String {
    let pad = " ".repeat(padding);
    let cells: Vec<String> = row
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let width = widths.get(index).copied().unwrap_or(0);
            format!("{pad}{}{pad}", ljust(cell, width))
        })
        .collect();
    format!("{}|{}|", " ".repeat(indent), cells.join("|"))
}

/// Writes the lines of a table. The first row is the header, followed by a
/// separator line, when `write_headers` is set.
pub fn write_table_lines(
    matrix: &[Vec<String>],
    write_headers: bool,
    padding: usize,
    indent: usize,
) -> Vec<String> {
    let columns = matrix.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|index| {
            matrix
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(matrix.len() + 1);
    for (index, row) in matrix.iter().enumerate() {
        lines.push(write_row(row, &widths, padding, indent));
        if index == 0 && write_headers {
            let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            lines.push(write_row(&separator, &widths, padding, indent));
        }
    }
    lines
}

/// Writes a Markdown table.
pub fn write_table(matrix: &[Vec<String>], write_headers: bool, padding: usize) -> String {
    write_table_lines(matrix, write_headers, padding, 0).join("\n")
}

/// Turns a title into an anchor: lower case, whitespace replaced by `-`,
/// characters other than alphanumerics, `-` and `_` removed.
pub fn normalize_link(value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidLink(value.to_string()));
    }
    let mut link = String::with_capacity(value.len());
    let mut previous_space = false;
    for c in value.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            if !previous_space {
                link.push('-');
            }
            previous_space = true;
            continue;
        }
        previous_space = false;
        if c.is_alphanumeric() || c == '-' || c == '_' {
            link.push(c);
        }
    }
    Ok(link)
}

fn ljust(value: &str, width: usize) -> String {
    let length = value.chars().count();
    if length >= width {
        return value.to_string();
    }
    format!("{value}{}", " ".repeat(width - length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_write_table() {
        let table = write_table(
            &matrix(&[&["Name", "Type"], &["id", "integer"], &["nickname", "string"]]),
            true,
            1,
        );
        assert_eq!(
            table,
            "| Name     | Type    |\n\
             | -------- | ------- |\n\
             | id       | integer |\n\
             | nickname | string  |"
        );
    }

    #[test]
    fn test_write_table_without_headers() {
        let lines = write_table_lines(&matrix(&[&["a", "bb"], &["ccc", "d"]]), false, 0, 2);
        assert_eq!(lines, vec!["  |a  |bb|", "  |ccc|d |"]);
    }

    #[test]
    fn test_normalize_link() {
        assert_eq!(normalize_link("Get Cats").unwrap(), "get-cats");
        assert_eq!(normalize_link("Pets & Toys (v2)").unwrap(), "pets--toys-v2");
        assert_eq!(normalize_link("snake_case-name").unwrap(), "snake_case-name");
        assert!(matches!(normalize_link("  "), Err(Error::InvalidLink(_))));
    }
}
