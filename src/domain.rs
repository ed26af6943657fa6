use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use clap::Parser;
use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;

use crate::paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

#[derive(Debug)]
pub enum SVError {
    IoError(Error),
    RetrievalFailed(String),
    NotCsv(String),
    NoSource,
    InvalidPageSize(usize),
    ClipboardFailed(String),
}

impl fmt::Display for SVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SVError::IoError(e) => write!(f, "I/O error: {e}"),
            SVError::RetrievalFailed(msg) => write!(f, "Download failed: {msg}"),
            SVError::NotCsv(url) => write!(f, "{url} returned HTML, not CSV"),
            SVError::NoSource => write!(f, "No data source given"),
            SVError::InvalidPageSize(size) => {
                write!(f, "Invalid page size {size}, expected one of {PAGE_SIZES:?}")
            }
            SVError::ClipboardFailed(msg) => write!(f, "Clipboard error: {msg}"),
        }
    }
}

impl std::error::Error for SVError {}

impl From<Error> for SVError {
    fn from(err: Error) -> Self {
        SVError::IoError(err)
    }
}

impl From<ureq::Error> for SVError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                SVError::RetrievalFailed(format!("{} {}", code, response.status_text()))
            }
            ureq::Error::Transport(t) => SVError::RetrievalFailed(t.to_string()),
        }
    }
}

impl From<arboard::Error> for SVError {
    fn from(err: arboard::Error) -> Self {
        SVError::ClipboardFailed(err.to_string())
    }
}

#[derive(Parser, Debug, Clone, PartialEq, Setters)]
#[command(version, about = "Browse a spreadsheet published as CSV")]
#[setters(prefix = "with_")]
pub struct SVConfig {
    /// Path or URL of the CSV export. A Google Sheets "pubhtml" link is accepted.
    #[arg(env = "SHEETVIEW_SOURCE")]
    #[setters(strip_option)]
    pub source: Option<String>,

    /// Rows per page (10, 25, 50 or 100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Where the export key writes the current view
    #[arg(long, default_value = "dados_filtrados.csv")]
    pub export_path: PathBuf,

    /// Timeout in seconds for each download attempt
    #[arg(long = "timeout", default_value_t = 15)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = 40)]
    pub max_column_width: usize,

    /// Milliseconds to wait for a terminal event before redrawing
    #[arg(long, default_value_t = 100)]
    pub event_poll_time: u64,

    /// Write logs to this file
    #[arg(long)]
    #[setters(strip_option)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for SVConfig {
    fn default() -> Self {
        Self {
            source: None,
            page_size: DEFAULT_PAGE_SIZE,
            export_path: PathBuf::from("dados_filtrados.csv"),
            timeout_secs: 15,
            max_column_width: 40,
            event_poll_time: 100,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl SVConfig {
    pub fn validate(&self) -> Result<(), SVError> {
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(SVError::InvalidPageSize(self.page_size));
        }
        if self.source.as_deref().is_none_or(|s| s.trim().is_empty()) {
            return Err(SVError::NoSource);
        }
        Ok(())
    }

    pub fn resolved_export_path(&self) -> PathBuf {
        expand_path(&self.export_path.to_string_lossy())
    }
}

/// Expand `~` and environment variables, keeping the input when expansion fails.
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(path),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CMDMode {
    Search,
    ValueFilter,
}

#[derive(Debug, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    NextPageSize,
    PrevPageSize,
    Search,
    ClearQuery,
    ChooseColumn,
    ValueMenu,
    ClearValues,
    Toggle,
    Sort,
    Clear,
    Refresh,
    Export,
    CopyView,
    Help,
    Enter,
    Exit,
    Resize(usize, usize),
    RawKey(KeyEvent),
}

pub const HELP_TEXT: &str = "\
 q          quit
 arrows     move cursor / column
 n p        next / previous page
 g G        first / last page
 + -        change page size
 /          search all columns
 x          clear search
 c          choose filter column
 v          select filter values
 X          clear selected values
 s          sort by column (again to reverse)
 r          clear query, values and sort
 R          reload data
 e          export view to file
 y          copy view as CSV
 ?          this help
 Esc        close";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_flags() {
        let cfg = SVConfig::parse_from([
            "sheetview",
            "data.csv",
            "--page-size",
            "50",
            "--timeout",
            "3",
        ]);
        assert_eq!(cfg.source.as_deref(), Some("data.csv"));
        assert_eq!(cfg.page_size, 50);
        assert_eq!(cfg.timeout_secs, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_page_size() {
        let cfg = SVConfig::default()
            .with_source("a.csv".to_string())
            .with_page_size(33);
        assert!(matches!(cfg.validate(), Err(SVError::InvalidPageSize(33))));
    }

    #[test]
    fn requires_source() {
        assert!(matches!(SVConfig::default().validate(), Err(SVError::NoSource)));
    }

    #[test]
    fn plain_paths_are_unchanged() {
        let cfg = SVConfig::default().with_export_path(PathBuf::from("out/view.csv"));
        assert_eq!(cfg.resolved_export_path(), PathBuf::from("out/view.csv"));
    }
}
