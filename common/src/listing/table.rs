/// A data row of the table printed by the listing helper.
///
/// The helper wraps `openstack server list` and prints something like:
///
/// ```text
/// +---------+-----------------------+
/// | Name    | Networks              |
/// +---------+-----------------------+
/// | demo-01 | 10.0.0.5, 203.0.113.9 |
/// +---------+-----------------------+
/// ```
///
/// A row is a line that starts and ends with `|` and holds at least one cell between
/// them. Cells are trimmed. Border lines, blank lines and anything else are not rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based line number in the helper output
    pub line_number: usize,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn parse(line_number: usize, line: &str) -> Option<TableRow> {
        let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;

        let cells = inner
            .split('|')
            .map(|cell| cell.trim().to_string())
            .collect::<Vec<_>>();

        Some(TableRow { line_number, cells })
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

/// Split helper output into rows, dropping everything that is not a row.
pub fn parse_table(text: &str) -> Vec<TableRow> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let row = TableRow::parse(i + 1, line);
            if row.is_none() && !line.trim().is_empty() {
                tracing::trace!("Line {} is not a table row: {}", i + 1, line);
            }
            row
        })
        .collect()
}
