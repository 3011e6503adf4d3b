//! Pipe-delimited rows rendered as an HTML table.

use std::fmt::Write;

/// Render a block of pipe rows as `<table>`.
///
/// The first row becomes `<th>` cells inside `<thead>`, the rest `<td>` cells
/// inside `<tbody>`. Every row keeps its text, including dash-only rows. A
/// trailing newline on `block` is kept after `</table>`.
pub(crate) fn render(block: &str) -> String {
    let mut rows = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_cells);

    let mut out = String::with_capacity(block.len() * 2);
    out.push_str("<table>");

    if let Some(header) = rows.next() {
        out.push_str("<thead>");
        push_row(&mut out, &header, "th");
        out.push_str("</thead>");
    }

    let mut body = rows.peekable();
    if body.peek().is_some() {
        out.push_str("<tbody>");
        for row in body {
            push_row(&mut out, &row, "td");
        }
        out.push_str("</tbody>");
    }

    out.push_str("</table>");
    if block.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Split a row on `|`, trimming each cell.
///
/// The empty fragments produced by the outer pipes are dropped; empty cells
/// between pipes are kept.
fn split_cells(line: &str) -> Vec<&str> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn push_row(out: &mut String, cells: &[&str], tag: &str) {
    out.push_str("<tr>");
    for cell in cells {
        write!(out, "<{tag}>{cell}</{tag}>").unwrap();
    }
    out.push_str("</tr>");
}
