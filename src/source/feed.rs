use std::{fmt, path::PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;

/// Where a source reads its bytes from.
#[derive(Debug, Clone)]
pub enum Feed {
    Path(PathBuf),
    Bytes(Bytes),
    /// `http(s)://` resource; fetching needs the `download` feature.
    Url(String),
}

impl Feed {
    /// Interpret a command-line style location: URLs by scheme, anything else as a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Feed::Url(location.to_string())
        } else {
            Feed::Path(PathBuf::from(location))
        }
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self { Feed::Bytes(bytes.into()) }

    /// Read the whole feed in a single attempt.
    pub async fn read(&self) -> Result<Bytes> {
        match self {
            Feed::Path(path) => std::fs::read(path)
                .map(Bytes::from)
                .with_context(|| format!("[source::feed] Failed to read {}", path.display())),
            Feed::Bytes(bytes) => Ok(bytes.clone()),
            Feed::Url(url) => fetch(url).await,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Path(path) => write!(f, "{}", path.display()),
            Feed::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
            Feed::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(feature = "download")]
async fn fetch(url: &str) -> Result<Bytes> {
    let response = reqwest::get(url).await
        .with_context(|| format!("[source::feed] Failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("[source::feed] {url} returned an error status"))?;

    response.bytes().await
        .with_context(|| format!("[source::feed] Failed to read body of {url}"))
}

#[cfg(not(feature = "download"))]
async fn fetch(url: &str) -> Result<Bytes> {
    anyhow::bail!("[source::feed] cannot fetch {url}: built without the `download` feature")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use futures::executor::block_on;

    use super::*;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert!(matches!(Feed::parse("https://example.org/a.geojson"), Feed::Url(_)));
        assert!(matches!(Feed::parse("http://example.org/a.tsv"), Feed::Url(_)));
        assert!(matches!(Feed::parse("data/a.geojson"), Feed::Path(_)));
    }

    #[test]
    fn reads_bytes_and_files() {
        assert_eq!(&block_on(Feed::from_bytes("abc").read()).unwrap()[..], b"abc");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name\tvalue\n").unwrap();
        let feed = Feed::Path(file.path().to_path_buf());
        assert_eq!(&block_on(feed.read()).unwrap()[..], b"name\tvalue\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let feed = Feed::Path(PathBuf::from("/definitely/not/here.geojson"));
        let err = block_on(feed.read()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
