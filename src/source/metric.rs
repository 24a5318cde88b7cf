use anyhow::{Context, Result};

use crate::{io::csv::{read_metric_records, MetricColumns}, region::MetricRecord};

use super::{Feed, MetricSource};

/// Region metrics from delimited text with a header row (TSV by default).
#[derive(Debug, Clone)]
pub struct DelimitedMetricSource {
    feed: Feed,
    delimiter: u8,
    name_column: Option<String>,
    value_column: Option<String>,
}

impl DelimitedMetricSource {
    pub fn new(feed: Feed) -> Self {
        Self { feed, delimiter: b'\t', name_column: None, value_column: None }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Header names of the region-name and value columns; `None` keeps the first and
    /// second column respectively.
    pub fn with_columns(mut self, name_column: Option<String>, value_column: Option<String>) -> Self {
        self.name_column = name_column;
        self.value_column = value_column;
        self
    }

    #[inline]
    pub fn feed(&self) -> &Feed { &self.feed }
}

impl MetricSource for DelimitedMetricSource {
    async fn load(&self) -> Result<Vec<MetricRecord>> {
        let bytes = self.feed.read().await?;
        let columns = MetricColumns {
            name: self.name_column.as_deref(),
            value: self.value_column.as_deref(),
        };

        let (records, excluded) = read_metric_records(&bytes, self.delimiter, columns)
            .with_context(|| format!("[source::metric] Failed to load {}", self.feed))?;

        if excluded > 0 {
            log::warn!("[source::metric] excluded {excluded} rows without a numeric value from {}", self.feed);
        }
        log::info!("[source::metric] {} records from {}", records.len(), self.feed);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn loads_comma_separated_columns_by_name() {
        let feed = Feed::from_bytes("Province,Infected\nA,42\nB,bad\n");
        let source = DelimitedMetricSource::new(feed)
            .with_delimiter(b',')
            .with_columns(Some("Province".into()), Some("Infected".into()));

        let records = block_on(source.load()).unwrap();
        assert_eq!(records, vec![MetricRecord::new("A", 42.0)]);
    }

    #[test]
    fn missing_column_fails_the_load() {
        let source = DelimitedMetricSource::new(Feed::from_bytes("name\tvalue\nA\t1\n"))
            .with_columns(None, Some("cases".into()));
        assert!(block_on(source.load()).is_err());
    }
}
