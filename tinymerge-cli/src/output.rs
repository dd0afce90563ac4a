use comfy_table::{presets, CellAlignment, Table};
use serde::Serialize;

use crate::app::GlobalOptions;

/// Print `data` as JSON (if `--json`) or call `display_fn` for human-readable output.
pub fn print_output<T: Serialize>(
    data: &T,
    opts: &GlobalOptions,
    display_fn: impl FnOnce(&T),
) -> anyhow::Result<()> {
    if opts.json {
        let json = serde_json::to_string_pretty(data)?;
        println!("{json}");
    } else {
        display_fn(data);
    }
    Ok(())
}

/// Print record counts as an indented `Records`/`Count` table.
pub fn print_counts(rows: &[(&str, usize)]) {
    for line in counts_table(rows).lines() {
        println!("  {}", line.trim_end());
    }
}

fn counts_table(rows: &[(&str, usize)]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec!["Records", "Count"]);
    for (label, count) in rows {
        table.add_row(vec![(*label).to_string(), count.to_string()]);
    }

    if let Some(column) = table.column_mut(0) {
        column.set_padding((0, 1));
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
        column.set_padding((1, 0));
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_right_aligned() {
        let text = counts_table(&[("classes", 2), ("parameters", 1234)]);
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Records"));
        assert!(lines[1].starts_with("classes"));
        assert!(lines[1].ends_with(" 2"));
        assert!(lines[2].ends_with("1234"));
        assert_eq!(lines[1].len(), lines[2].len());
    }
}
