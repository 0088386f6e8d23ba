//! Text rendering for normalized results
//!
//! Turns a [`DisplayResult`] into plain text: labeled lines for pairs,
//! width-aligned columns with a header rule for tables, a single line
//! for scalars.

use scriptdeck_core::DisplayResult;

/// Render a normalized result for the terminal.
pub fn render(result: &DisplayResult) -> String {
    match result {
        DisplayResult::Empty => "(no output)\n".to_string(),
        DisplayResult::Scalar { label, value } => format!("{}: {}\n", label, value),
        DisplayResult::Pairs(pairs) => {
            let width = pairs.iter().map(|p| p.label.len()).max().unwrap_or(0);
            let mut out = String::new();
            for pair in pairs {
                out.push_str(&format!("{:<width$} : {}\n", pair.label, pair.value));
            }
            out
        }
        DisplayResult::Table { columns, rows } => render_table(columns, rows),
    }
}

/// Width-aligned table with a header rule.
fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    // Column width: widest of header and cells
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    render_row(&mut out, columns.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        render_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn render_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        line.push_str(&format!("{:<width$}", cell));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
