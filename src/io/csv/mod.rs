//! Delimited-text (CSV/TSV) reading operations.

mod read;

pub(crate) use read::*;
