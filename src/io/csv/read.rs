//! Delimited-text reading for region metrics.

use std::io::Cursor;

use anyhow::{anyhow, ensure, Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, StringChunked}};

use crate::region::MetricRecord;

/// Which columns of a metric table hold the region name and the value.
/// `None` picks the first (name) or second (value) column.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MetricColumns<'a> {
    pub(crate) name: Option<&'a str>,
    pub(crate) value: Option<&'a str>,
}

/// Reads delimited text with a header row into a Polars DataFrame, every column as String.
pub(crate) fn read_delimited_bytes(bytes: &[u8], separator: u8) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|po| po
            .with_separator(separator)
            .with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("[io::csv::read] Failed to read delimited metric table")
}

/// Read `(name, value)` records from delimited text, in row order.
///
/// Rows whose value is missing, non-numeric or non-finite are excluded, as are rows
/// without a name. Returns the records with the number of excluded rows.
pub(crate) fn read_metric_records(bytes: &[u8], separator: u8, columns: MetricColumns<'_>) -> Result<(Vec<MetricRecord>, usize)> {
    let df = read_delimited_bytes(bytes, separator)?;
    ensure!(df.width() >= 2,
        "[io::csv::read] metric table needs at least two columns (name, value), found {}", df.width());

    let names = string_column(&df, columns.name, 0)?;
    let values = string_column(&df, columns.value, 1)?;

    let mut records = Vec::with_capacity(df.height());
    let mut excluded = 0;

    for (name, value) in names.into_iter().zip(values.into_iter()) {
        match (name, value.and_then(parse_metric)) {
            (Some(name), Some(value)) if !name.is_empty() => records.push(MetricRecord::new(name, value)),
            (name, _) => {
                log::debug!("[io::csv::read] excluding row {:?}: value {:?} is not numeric", name, value);
                excluded += 1;
            }
        }
    }

    Ok((records, excluded))
}

/// Coerce a cell to a number; `None` for anything that is not a finite number.
fn parse_metric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Resolve a column by header name, or by position when no name is configured.
fn string_column<'a>(df: &'a DataFrame, name: Option<&str>, position: usize) -> Result<&'a StringChunked> {
    let column = match name {
        Some(name) => df.column(name)
            .with_context(|| format!("[io::csv::read] metric table has no column {name:?}"))?,
        None => df.get_columns().get(position)
            .ok_or_else(|| anyhow!("[io::csv::read] metric table has no column at position {position}"))?,
    };

    column.as_materialized_series().str()
        .with_context(|| format!("[io::csv::read] column {:?} is not text", column.name()))
}
