use std::path::Path;

use anyhow::{Context, Result};

use crate::table::Table;

/// Accumulation file holding every platform's rows across all runs.
pub const OUTPUT_CSV: &str = "ai_influencer_tracker_2025.csv";

/// Load the accumulation file, or None if it does not exist yet.
pub fn load(path: &Path) -> Result<Option<Table>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(Some(Table { columns, rows }))
}

/// Concatenate prior rows then new rows. Columns merge as a union: prior
/// order first, unseen new columns appended, missing cells empty.
pub fn merge(prior: Option<Table>, new: Table) -> Table {
    let Some(old) = prior else { return new };

    let mut columns = old.columns.clone();
    for c in &new.columns {
        if !columns.contains(c) {
            columns.push(c.clone());
        }
    }

    let width = columns.len();
    let mut rows: Vec<Vec<String>> = old
        .rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();

    // Remap each new row into the merged column order.
    let positions: Vec<usize> = new
        .columns
        .iter()
        .map(|c| columns.iter().position(|m| m == c).unwrap_or(width))
        .collect();
    for row in new.rows {
        let mut mapped = vec![String::new(); width];
        for (value, &pos) in row.into_iter().zip(&positions) {
            if pos < width {
                mapped[pos] = value;
            }
        }
        rows.push(mapped);
    }

    Table { columns, rows }
}

/// Rewrite the accumulation file in full: header then every row, no index.
pub fn write(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read-modify-rewrite cycle for one batch. Returns the total row count
/// now persisted.
pub fn append_batch(path: &Path, batch: Table) -> Result<usize> {
    let merged = merge(load(path)?, batch);
    write(path, &merged)?;
    Ok(merged.rows.len())
}

// ── Tests ──
