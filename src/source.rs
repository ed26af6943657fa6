use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::domain::{SVError, expand_path};
use crate::pipeline::Dataset;

/// Where the CSV text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::File(expand_path(s))
        }
    }

    pub fn name(&self) -> String {
        match self {
            Source::File(path) => path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("???")
                .to_string(),
            Source::Url(url) => url.clone(),
        }
    }
}

/// URLs to try for a published sheet, in order.
///
/// A "pubhtml" link is turned into the two CSV export endpoints of the same
/// document; any other URL is used as is.
pub fn candidate_urls(url: &str) -> Vec<String> {
    match url.to_ascii_lowercase().find("/pubhtml") {
        Some(pos) => {
            let base = &url[..pos];
            vec![
                format!("{base}/pub?output=csv"),
                format!("{base}/gviz/tq?tqx=out:csv"),
            ]
        }
        None => vec![url.to_string()],
    }
}

/// Reject bodies that are an HTML page instead of CSV.
pub fn check_csv(url: &str, text: String) -> Result<String, SVError> {
    if text.trim_start().starts_with('<') {
        return Err(SVError::NotCsv(url.to_string()));
    }
    Ok(text)
}

/// Decode a body as UTF-8, replacing invalid sequences instead of failing.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn fetch(url: &str, timeout: Duration) -> Result<String, SVError> {
    let response = ureq::get(url).timeout(timeout).call()?;
    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    check_csv(url, decode_text(&body))
}

/// Try each URL once, in order, returning the first CSV body. When all fail the
/// last error is returned.
#[instrument(skip(timeout))]
pub fn fetch_with_fallback(urls: &[String], timeout: Duration) -> Result<String, SVError> {
    let mut last_err = None;
    for url in urls {
        match fetch(url, timeout) {
            Ok(text) => {
                info!("Downloaded {} bytes from {url}", text.len());
                return Ok(text);
            }
            Err(e) => {
                warn!("Fetching {url} failed: {e}");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| SVError::RetrievalFailed("no URL to fetch".to_string())))
}

/// Read the raw CSV text of `source`.
#[instrument(skip(timeout))]
pub fn read_source(source: &Source, timeout: Duration) -> Result<String, SVError> {
    match source {
        Source::File(path) => {
            let bytes = fs::read(path)?;
            Ok(decode_text(&bytes))
        }
        Source::Url(url) => fetch_with_fallback(&candidate_urls(url), timeout),
    }
}

/// Issues increasing tokens so that only the newest load is applied.
#[derive(Debug, Default)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }
}

#[derive(Debug)]
pub struct LoadResult {
    pub token: u64,
    pub outcome: Result<Dataset, SVError>,
}

/// Load and parse `source` on a worker thread, sending the outcome to `tx`.
pub fn spawn_load(
    source: Source,
    timeout: Duration,
    token: u64,
    tx: Sender<LoadResult>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        debug!("Load {token} started for {:?}", source);
        let outcome = read_source(&source, timeout).map(|text| Dataset::from_csv(&text));
        if tx.send(LoadResult { token, outcome }).is_err() {
            debug!("Load {token} finished after the session closed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::mpsc::channel;

    #[test]
    fn pubhtml_links_expand_to_export_urls() {
        let urls = candidate_urls("https://docs.google.com/spreadsheets/d/e/XYZ/pubHTML?gid=0&single=true");
        assert_eq!(
            urls,
            vec![
                "https://docs.google.com/spreadsheets/d/e/XYZ/pub?output=csv".to_string(),
                "https://docs.google.com/spreadsheets/d/e/XYZ/gviz/tq?tqx=out:csv".to_string(),
            ]
        );
        assert_eq!(candidate_urls("https://x.org/a.csv"), vec!["https://x.org/a.csv"]);
    }

    #[test]
    fn html_body_is_rejected() {
        assert!(matches!(
            check_csv("u", "  <!DOCTYPE html>".to_string()),
            Err(SVError::NotCsv(_))
        ));
        assert_eq!(check_csv("u", "a,b\n".to_string()).unwrap(), "a,b\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(decode_text(b"a,b\n\xff,1"), "a,b\n\u{fffd},1");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Nome\nJo\xe3o\n").unwrap();
        let text = read_source(&Source::File(file.path().to_path_buf()), Duration::from_secs(1))
            .unwrap();
        assert_eq!(text, "Nome\nJo\u{fffd}o\n");
    }

    #[test]
    fn source_kind() {
        assert!(matches!(Source::parse("HTTPS://x.org/a"), Source::Url(_)));
        assert_eq!(Source::parse("data/a.csv"), Source::File(PathBuf::from("data/a.csv")));
        assert_eq!(Source::parse("data/a.csv").name(), "a.csv");
    }

    #[test]
    fn tokens_increase() {
        let mut seq = LoadSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn worker_loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Nome,Convites\nAna,3\nBea,5\nCau,1\n").unwrap();
        let (tx, rx) = channel();
        let source = Source::File(file.path().to_path_buf());
        spawn_load(source, Duration::from_secs(1), 7, tx).join().unwrap();
        let result = rx.recv().unwrap();
        assert_eq!(result.token, 7);
        let data = result.outcome.unwrap();
        assert_eq!(data.table.len(), 3);
        assert_eq!(data.metric.as_deref(), Some("Convites"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = Source::File(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(
            read_source(&source, Duration::from_secs(1)),
            Err(SVError::IoError(_))
        ));
    }
}
