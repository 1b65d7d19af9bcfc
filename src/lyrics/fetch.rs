//! Lyric resource fetching
//!
//! Sources are either http(s) URLs (fetched with reqwest) or local paths,
//! optionally written as `file://` URIs.

use super::ParsedLyrics;
use crate::error::PlaybackError;
use std::future::Future;
use std::time::Duration;

/// Anything that can turn a lyric source into raw subtitle text.
pub trait LyricFetcher: Clone + Send + Sync + 'static {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<String, PlaybackError>> + Send;
}

/// Default fetcher for files and http(s) URLs
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    const USER_AGENT: &'static str = concat!("singalong/", env!("CARGO_PKG_VERSION"));

    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("http status {}", response.status());
        }
        Ok(response.text().await?)
    }
}

impl LyricFetcher for SourceFetcher {
    async fn fetch(&self, source: &str) -> Result<String, PlaybackError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            return self
                .fetch_http(source)
                .await
                .map_err(|e| PlaybackError::lyric_fetch(source, format!("{e:#}")));
        }

        let path = source.strip_prefix("file://").unwrap_or(source);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PlaybackError::lyric_fetch(source, e))
    }
}

/// Fetch and parse a lyric source. Failures are logged and yield empty
/// lyrics so playback can carry on without them.
pub async fn load_lyrics<F: LyricFetcher>(fetcher: &F, source: &str) -> ParsedLyrics {
    match fetcher.fetch(source).await {
        Ok(raw) => {
            let lyrics = ParsedLyrics::parse(&raw);
            tracing::debug!(source, cues = lyrics.len(), "lyrics loaded");
            lyrics
        }
        Err(e) => {
            tracing::warn!("{e}");
            ParsedLyrics::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fetcher() -> SourceFetcher {
        SourceFetcher::new(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "[00:01.50]Hello\n[00:03.00]World\n").unwrap();
        let path = f.path().display().to_string();

        let lyrics = load_lyrics(&fetcher(), &path).await;
        assert_eq!(lyrics.len(), 2);

        let uri = format!("file://{path}");
        let lyrics = load_lyrics(&fetcher(), &uri).await;
        assert_eq!(lyrics.lines[1].text, "World");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.lrc").display().to_string();

        let err = fetcher().fetch(&missing).await.unwrap_err();
        assert!(matches!(err, PlaybackError::LyricFetch { ref source_uri, .. } if *source_uri == missing));
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.lrc").display().to_string();
        assert!(load_lyrics(&fetcher(), &missing).await.is_empty());
    }
}
