//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for the records the CLI prints.

pub mod config;
pub mod directory;
pub mod ledger;

pub use config::{format_association, format_communication};
pub use directory::{format_category_list, format_fine_list, format_house_details, format_house_list};
pub use ledger::{format_event_list, format_expense_list, format_income_list};

/// Column alignment
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, size: usize, align: Align) -> String {
    let fill = " ".repeat(size.saturating_sub(width(text)));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

/// Render rows under a header with a dashed separator
///
/// Column widths follow the widest cell, counted in characters.
pub(crate) fn render_table(columns: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| width(cell))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| -> String {
        let joined = cells.join("  ");
        format!("{}\n", joined.trim_end())
    };

    let mut output = String::new();
    output.push_str(&line(
        columns
            .iter()
            .zip(&widths)
            .map(|((header, align), w)| pad(header, *w, *align))
            .collect(),
    ));
    output.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        output.push_str(&line(
            columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, ((_, align), w))| pad(row.get(i).map(String::as_str).unwrap_or(""), *w, *align))
                .collect(),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_widths() {
        let table = render_table(
            &[("Casa", Align::Left), ("Monto", Align::Right)],
            &[
                vec!["Casa 1".into(), "$2,500.00".into()],
                vec!["Jardinería".into(), "$80.00".into()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Casa            Monto");
        assert_eq!(lines[1], "----------  ---------");
        assert_eq!(lines[2], "Casa 1      $2,500.00");
        assert_eq!(lines[3], "Jardinería     $80.00");
    }
}
