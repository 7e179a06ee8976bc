use anyhow::{bail, Result};

/// In-memory tabular data: a header plus rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a constant-valued column to every row.
    pub fn push_column(&mut self, name: &str, value: &str) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Parse a model response into a table.
///
/// Keeps only lines that contain a pipe and no "---" rule marker, then reads
/// the survivors as pipe-delimited text with the first line as header.
/// Phantom columns from leading/trailing pipes and fully empty rows are
/// dropped; headers and cells are whitespace-trimmed.
pub fn parse_markdown_table(markdown: &str) -> Result<Table> {
    let lines: Vec<&str> = markdown
        .lines()
        .filter(|line| line.contains('|') && !line.contains("---"))
        .collect();

    if lines.is_empty() {
        bail!("model output contains no table lines");
    }

    let text = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    if records.is_empty() {
        bail!("no parsable rows in table text");
    }

    // Flexible parsing can yield ragged rows; pad to a common width.
    let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in &mut records {
        row.resize(width, String::new());
    }

    // Drop columns that are empty in the header and every row.
    let keep: Vec<usize> = (0..width)
        .filter(|&i| records.iter().any(|r| !r[i].is_empty()))
        .collect();
    let mut records: Vec<Vec<String>> = records
        .into_iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();

    let columns = records.remove(0);
    let rows: Vec<Vec<String>> = records
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(Table { columns, rows })
}

// ── Tests ──
