//! Dataset loading: primary source first, one fallback, no retries

use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;

use crate::monster::Monster;

pub const DEFAULT_SOURCE: &str = "monsters.json";
pub const DEFAULT_FALLBACK: &str = "monsters_data.json";

/// Where a dataset comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Http(String),
    File(PathBuf),
}

impl DataSource {
    /// `http(s)://` locations are fetched, `file://` URLs and anything else
    /// are read from disk.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Http(location.to_string())
        } else if let Some(path) = location.strip_prefix("file://") {
            DataSource::File(PathBuf::from(path))
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unable to load monster data from {url} (status {status})")]
    Status { url: String, status: StatusCode },
    #[error("error while reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads one source and parses the whole document. A malformed document is
/// an error; nothing partial is returned.
pub async fn fetch(source: &DataSource) -> Result<Vec<Monster>, LoadError> {
    let body = match source {
        DataSource::Http(url) => {
            let response = reqwest::get(url).await.map_err(|source| LoadError::Request {
                url: url.clone(),
                source,
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status,
                });
            }
            response
                .bytes()
                .await
                .map_err(|source| LoadError::Request {
                    url: url.clone(),
                    source,
                })?
                .to_vec()
        }
        DataSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
    };
    Ok(serde_json::from_slice(&body)?)
}

/// Tries `primary`, then `fallback`. Only the fallback's error is reported.
pub async fn load_catalog(
    primary: &DataSource,
    fallback: &DataSource,
) -> Result<Vec<Monster>, LoadError> {
    match fetch(primary).await {
        Ok(monsters) => {
            tracing::info!(source = %primary, count = monsters.len(), "catalog loaded");
            return Ok(monsters);
        }
        Err(error) => {
            tracing::warn!(source = %primary, %error, "primary source failed, trying fallback");
        }
    }

    match fetch(fallback).await {
        Ok(monsters) => {
            tracing::info!(source = %fallback, count = monsters.len(), "catalog loaded from fallback");
            Ok(monsters)
        }
        Err(error) => {
            tracing::error!(source = %fallback, %error, "fallback source failed");
            Err(error)
        }
    }
}

/// User-facing text for a failed load: the error, then what to check.
pub fn failure_report(error: &LoadError, fallback: &DataSource) -> String {
    [
        error.to_string(),
        "Make sure that:".to_string(),
        format!("  1. {fallback} exists"),
        "  2. the dataset is served over HTTP (e.g. http://localhost:3000/monsters.json)".to_string(),
        "  3. or --source points at a readable file or URL".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_source_kinds() {
        assert_eq!(
            DataSource::parse("https://example.com/monsters.json"),
            DataSource::Http("https://example.com/monsters.json".into())
        );
        assert_eq!(
            DataSource::parse("file:///srv/monsters.json"),
            DataSource::File(PathBuf::from("/srv/monsters.json"))
        );
        assert_eq!(
            DataSource::parse("monsters_data.json"),
            DataSource::File(PathBuf::from("monsters_data.json"))
        );
    }

    #[tokio::test]
    async fn test_fetch_file() {
        let file = dataset_file(r#"[{ "name": "Slime", "region": "Plains" }]"#);
        let source = DataSource::File(file.path().to_path_buf());
        let monsters = fetch(&source).await.unwrap();
        assert_eq!(monsters.len(), 1);
        assert_eq!(monsters[0].name, "Slime");
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_document() {
        let file = dataset_file(r#"[{ "name": "Slime" }, { "region": "Cave" }]"#);
        let source = DataSource::File(file.path().to_path_buf());
        let error = fetch(&source).await.unwrap_err();
        assert!(matches!(error, LoadError::Parse(_)));
        assert!(error.to_string().starts_with("JSON parse failed"));
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let file = dataset_file(r#"[{ "name": "Bat" }, { "name": "Troll" }]"#);
        let primary = DataSource::File(PathBuf::from("/nonexistent/monsters.json"));
        let fallback = DataSource::File(file.path().to_path_buf());
        let monsters = load_catalog(&primary, &fallback).await.unwrap();
        assert_eq!(monsters.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_primary_falls_back() {
        let broken = dataset_file("{ not json");
        let good = dataset_file(r#"[{ "name": "Bat" }]"#);
        let primary = DataSource::File(broken.path().to_path_buf());
        let fallback = DataSource::File(good.path().to_path_buf());
        assert_eq!(load_catalog(&primary, &fallback).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_both_sources_failing_reports_fallback_error() {
        let primary = DataSource::File(PathBuf::from("/nonexistent/a.json"));
        let fallback = DataSource::File(PathBuf::from("/nonexistent/b.json"));
        let error = load_catalog(&primary, &fallback).await.unwrap_err();
        match &error {
            LoadError::Io { path, .. } => assert_eq!(path, &PathBuf::from("/nonexistent/b.json")),
            other => panic!("unexpected error: {other}"),
        }
        let report = failure_report(&error, &fallback);
        assert!(report.contains("/nonexistent/b.json exists"));
        assert!(report.lines().count() > 1);
    }

    #[tokio::test]
    async fn test_unreachable_http_primary_falls_back() {
        let file = dataset_file(r#"[{ "name": "Wisp" }]"#);
        let primary = DataSource::Http("http://127.0.0.1:9/monsters.json".into());
        let fallback = DataSource::File(file.path().to_path_buf());
        let monsters = load_catalog(&primary, &fallback).await.unwrap();
        assert_eq!(monsters[0].name, "Wisp");
    }
}
