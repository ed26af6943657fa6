use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::fs;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

use crate::domain::{CMDMode, HELP_TEXT, Message, SVConfig, SVError};
use crate::inputter::{InputResult, Inputter};
use crate::numeric::{format_br, to_number};
use crate::paginate::{next_page_size, previous_page_size};
use crate::pipeline::{Dataset, Snapshot, export, run};
use crate::query::value_counts;
use crate::source::{LoadResult, LoadSequence, Source, spawn_load};
use crate::state::{Action, ViewState};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Status {
    EMPTY,
    LOADING,
    READY,
    FAILED,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    CMDINPUT,
    COLUMNS,
    VALUES,
    POPUP,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnView {
    pub name: String,
    pub width: usize,
    pub data: Vec<String>,
    pub numeric: Vec<bool>,
}

/// Entries of the column chooser or the value menu as shown in the popup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuView {
    pub title: String,
    pub lines: Vec<String>,
    pub selected: usize,
}

// Distinct values of the filter column with their counts. `visible` holds the
// indices that pass the menu's own text filter.
#[derive(Default)]
struct ValueMenu {
    items: Vec<(String, usize)>,
    visible: Vec<usize>,
    filter: String,
    cursor: usize,
}

impl ValueMenu {
    fn apply_filter(&mut self, filter: &str) {
        self.filter = filter.trim().to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, (v, _))| self.filter.is_empty() || v.to_lowercase().contains(&self.filter))
            .map(|(idx, _)| idx)
            .collect();
        self.cursor = std::cmp::min(self.cursor, self.visible.len().saturating_sub(1));
    }

    fn current(&self) -> Option<&str> {
        self.visible
            .get(self.cursor)
            .map(|&idx| self.items[idx].0.as_str())
    }
}

pub struct UIData {
    pub title: String,
    pub subtitle: String,
    pub table: Vec<ColumnView>,
    pub nrows: usize, // Rows on the current page
    pub selected_row: usize,
    pub selected_column: usize,
    pub kpi_total: String,
    pub kpi_rows: String,
    pub kpi_hint: String,
    pub chips: Vec<String>,
    pub footer: String,
    pub show_popup: bool,
    pub popup: MenuView,
    pub cmdinput: InputResult,
    pub cmd_mode: Option<CMDMode>,
    pub active_cmdinput: bool,
    pub status_message: String,
    pub last_status_message_update: Instant,
    pub last_update: Instant,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            title: String::new(),
            subtitle: String::new(),
            table: Vec::new(),
            nrows: 0,
            selected_row: 0,
            selected_column: 0,
            kpi_total: "—".to_string(),
            kpi_rows: "—".to_string(),
            kpi_hint: String::new(),
            chips: Vec::new(),
            footer: String::new(),
            show_popup: false,
            popup: MenuView::default(),
            cmdinput: InputResult::default(),
            cmd_mode: None,
            active_cmdinput: false,
            status_message: String::new(),
            last_status_message_update: Instant::now(),
            last_update: Instant::now(),
        }
    }
}

pub struct Model {
    config: SVConfig,
    source: Option<Source>,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    dataset: Option<Arc<Dataset>>,
    state: ViewState,
    snapshot: Option<Snapshot>,
    loads: LoadSequence,
    reset_page_on_load: bool,
    load_tx: Sender<LoadResult>,
    load_rx: Receiver<LoadResult>,
    load_error: Option<String>,
    curser_row: usize,
    curser_column: usize,
    offset_column: usize,
    table_width: usize,
    column_cursor: usize,
    value_menu: ValueMenu,
    popup_message: String,
    clipboard: Option<Clipboard>,
    input: Inputter,
    cmd_mode: Option<CMDMode>,
    saved_query: String,
    last_input: InputResult,
    active_cmdinput: bool,
    status_message: String,
    last_status_message_update: Instant,
    uidata: UIData,
}

impl Model {
    pub fn init(config: &SVConfig) -> Self {
        let (load_tx, load_rx) = channel();
        let mut model = Self {
            config: config.clone(),
            source: config.source.as_deref().map(Source::parse),
            status: Status::EMPTY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            dataset: None,
            state: ViewState::new(config.page_size),
            snapshot: None,
            loads: LoadSequence::default(),
            reset_page_on_load: false,
            load_tx,
            load_rx,
            load_error: None,
            curser_row: 0,
            curser_column: 0,
            offset_column: 0,
            table_width: 120,
            column_cursor: 0,
            value_menu: ValueMenu::default(),
            popup_message: String::new(),
            clipboard: None,
            input: Inputter::default(),
            cmd_mode: None,
            saved_query: String::new(),
            last_input: InputResult::default(),
            active_cmdinput: false,
            status_message: "Started sheetview!".to_string(),
            last_status_message_update: Instant::now(),
            uidata: UIData::empty(),
        };
        model.update_uidata();
        model
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_deref()
    }

    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::CMDINPUT
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
        self.uidata.status_message = self.status_message.clone();
        self.uidata.last_status_message_update = self.last_status_message_update;
        self.uidata.last_update = Instant::now();
    }

    // -------------------- Loading ---------------------- //

    /// Issue a token for a new load. Results carrying older tokens are dropped.
    pub fn begin_load(&mut self, force: bool) -> u64 {
        let token = self.loads.issue();
        self.status = Status::LOADING;
        self.reset_page_on_load |= force;
        self.set_status_message("Loading ...");
        self.update_uidata();
        token
    }

    /// Fetch the configured source on a worker thread.
    pub fn start_load(&mut self, force: bool) {
        let Some(source) = self.source.clone() else {
            self.fail_load(SVError::NoSource.to_string());
            return;
        };
        let token = self.begin_load(force);
        info!("Starting load {token} of {}", source.name());
        spawn_load(
            source,
            Duration::from_secs(self.config.timeout_secs),
            token,
            self.load_tx.clone(),
        );
    }

    /// Apply finished loads. Returns true when something changed.
    pub fn poll_loads(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.load_rx.try_recv() {
            changed |= self.apply_load(result);
        }
        changed
    }

    pub fn apply_load(&mut self, result: LoadResult) -> bool {
        if !self.loads.is_current(result.token) {
            debug!("Dropping stale load {}", result.token);
            return false;
        }
        match result.outcome {
            Ok(dataset) => {
                let nrows = dataset.table.len();
                self.state = self.state.clone().reconcile(dataset.table.headers());
                if self.reset_page_on_load {
                    self.state = self.state.clone().apply(Action::GoToPage(1));
                }
                self.dataset = Some(Arc::new(dataset));
                self.load_error = None;
                self.status = Status::READY;
                self.curser_column = 0;
                self.offset_column = 0;
                self.refresh_view();
                self.set_status_message(format!("Loaded {nrows} rows"));
            }
            Err(e) => {
                error!("Load {} failed: {e}", result.token);
                self.fail_load(e.to_string());
            }
        }
        self.reset_page_on_load = false;
        true
    }

    fn fail_load(&mut self, message: String) {
        self.dataset = None;
        self.snapshot = None;
        self.status = Status::FAILED;
        self.set_status_message(format!("Error: {message}"));
        self.load_error = Some(message);
        self.update_uidata();
    }

    // -------------------- Pipeline ---------------------- //

    fn apply(&mut self, action: Action) {
        self.state = self.state.clone().apply(action);
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        if let Some(dataset) = self.dataset.as_deref() {
            let start_time = Instant::now();
            let snapshot = run(dataset, &self.state);
            // Keep the stored page inside 1..=page_count.
            self.state.page = snapshot.page.number;
            trace!(
                "Pipeline produced {} rows in {}ms",
                snapshot.view.len(),
                start_time.elapsed().as_millis()
            );
            self.curser_row = std::cmp::min(
                self.curser_row,
                snapshot.page_rows().len().saturating_sub(1),
            );
            self.snapshot = Some(snapshot);
        }
        self.update_uidata();
    }

    fn headers(&self) -> &[String] {
        self.dataset
            .as_deref()
            .map(|d| d.table.headers())
            .unwrap_or(&[])
    }

    // -------------------- UI data ---------------------- //

    fn update_uidata(&mut self) {
        let mut uidata = UIData::empty();
        uidata.title = self
            .source
            .as_ref()
            .map(|s| s.name())
            .unwrap_or_else(|| "no source".to_string());
        uidata.status_message = self.status_message.clone();
        uidata.last_status_message_update = self.last_status_message_update;
        uidata.cmdinput = self.last_input.clone();
        uidata.cmd_mode = self.cmd_mode;
        uidata.active_cmdinput = self.active_cmdinput;

        // Data stays visible while a reload is pending; a failed load has already dropped it.
        match (self.dataset.as_deref(), self.snapshot.as_ref()) {
            (Some(dataset), Some(snapshot)) => {
                let metric = dataset
                    .metric
                    .as_ref()
                    .map(|m| format!(" • metric column: {m}"))
                    .unwrap_or_default();
                uidata.subtitle = match self.status {
                    Status::LOADING => "Loading…".to_string(),
                    _ => format!("{} row(s) • filters applied{metric}", snapshot.view.len()),
                };
                uidata.kpi_total = format_br(snapshot.kpis.total);
                uidata.kpi_rows = format_br(snapshot.kpis.row_count as f64);
                uidata.kpi_hint = snapshot.kpis.hint.clone();
                uidata.table = self
                    .build_columns(dataset, snapshot)
                    .into_iter()
                    .skip(self.offset_column)
                    .collect();
                uidata.nrows = snapshot.page_rows().len();
                uidata.selected_row = self.curser_row;
                uidata.selected_column = self.curser_column;
                let (first, last) = snapshot.page.visible_range();
                uidata.footer = format!(
                    "Showing {first}–{last} of {} • page {}/{} • {}/page",
                    snapshot.page.total, snapshot.page.number, snapshot.page.count, snapshot.page.size
                );
            }
            _ => {
                uidata.subtitle = match self.status {
                    Status::LOADING => "Loading…".to_string(),
                    Status::FAILED => {
                        "Failed to load data. Check that the sheet is published.".to_string()
                    }
                    _ => "No data".to_string(),
                };
                uidata.kpi_hint = self.load_error.clone().unwrap_or_default();
            }
        }

        let filter = &self.state.filter;
        if filter.has_query() {
            uidata.chips.push(format!("Search: {}", filter.query.trim()));
        }
        if let (Some(column), true) = (&filter.column, filter.has_value_filter()) {
            uidata.chips.push(format!("{column}: {} value(s)", filter.selected.len()));
        }

        match self.modus {
            Modus::POPUP => {
                uidata.show_popup = true;
                uidata.popup = MenuView {
                    title: "Help".to_string(),
                    lines: self.popup_message.lines().map(String::from).collect(),
                    selected: usize::MAX,
                };
            }
            Modus::COLUMNS => {
                uidata.show_popup = true;
                uidata.popup = self.column_menu_view();
            }
            Modus::VALUES => {
                uidata.show_popup = true;
                uidata.popup = self.value_menu_view();
            }
            Modus::CMDINPUT if self.cmd_mode == Some(CMDMode::ValueFilter) => {
                uidata.show_popup = true;
                uidata.popup = self.value_menu_view();
            }
            _ => {}
        }

        uidata.last_update = Instant::now();
        self.uidata = uidata;
    }

    fn build_columns(&self, dataset: &Dataset, snapshot: &Snapshot) -> Vec<ColumnView> {
        let rows = snapshot.page_rows();
        dataset
            .table
            .headers()
            .iter()
            .enumerate()
            .map(|(cidx, header)| {
                let mut name = header.clone();
                if self.state.sort.key.as_deref() == Some(header.as_str()) {
                    name = format!("{name} {}", self.state.sort.direction.arrow());
                }
                let mut data = Vec::with_capacity(rows.len());
                let mut numeric = Vec::with_capacity(rows.len());
                for &ridx in rows {
                    let cell = dataset.table.cell(ridx, cidx);
                    match to_number(cell) {
                        Some(n) => {
                            data.push(format_br(n));
                            numeric.push(true);
                        }
                        None => {
                            data.push(cell.to_string());
                            numeric.push(false);
                        }
                    }
                }
                let width = data
                    .iter()
                    .map(|s| s.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .clamp(1, self.config.max_column_width.max(1));
                ColumnView {
                    name,
                    width,
                    data,
                    numeric,
                }
            })
            .collect()
    }

    fn column_menu_view(&self) -> MenuView {
        let current = self.state.filter.column.as_deref();
        MenuView {
            title: "Filter column".to_string(),
            lines: self
                .headers()
                .iter()
                .map(|h| {
                    let mark = if Some(h.as_str()) == current { "●" } else { " " };
                    format!("{mark} {h}")
                })
                .collect(),
            selected: self.column_cursor,
        }
    }

    fn value_menu_view(&self) -> MenuView {
        let column = self.state.filter.column.clone().unwrap_or_default();
        let menu = &self.value_menu;
        let mut title = format!("{column}: {} values", menu.items.len());
        if !menu.filter.is_empty() {
            title = format!("{title} matching '{}'", menu.filter);
        }
        MenuView {
            title,
            lines: menu
                .visible
                .iter()
                .map(|&idx| {
                    let (value, count) = &menu.items[idx];
                    let mark = if self.state.filter.selected.contains(value) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    format!("{mark} {value} ({count})")
                })
                .collect(),
            selected: menu.cursor,
        }
    }

    // -------------------- Messages ---------------------- //

    pub fn update(&mut self, message: Option<Message>) -> Result<(), SVError> {
        let Some(msg) = message else {
            return Ok(());
        };
        if let Message::Resize(width, height) = msg {
            trace!("UI was resized to {width}x{height}");
            self.table_width = width.saturating_sub(2);
            self.scroll_to_cursor();
            self.update_uidata();
            return Ok(());
        }

        match self.modus {
            Modus::TABLE => match msg {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_row(-1),
                Message::MoveDown => self.move_row(1),
                Message::MoveLeft => self.move_column(-1),
                Message::MoveRight => self.move_column(1),
                Message::NextPage => self.apply(Action::NextPage),
                Message::PrevPage => self.apply(Action::PreviousPage),
                Message::FirstPage => self.apply(Action::GoToPage(1)),
                Message::LastPage => self.apply(Action::GoToPage(usize::MAX)),
                Message::NextPageSize => {
                    self.apply(Action::SetPageSize(next_page_size(self.state.page_size)))
                }
                Message::PrevPageSize => {
                    self.apply(Action::SetPageSize(previous_page_size(self.state.page_size)))
                }
                Message::Search => self.enter_cmd_mode(CMDMode::Search),
                Message::ClearQuery => self.apply(Action::ClearQuery),
                Message::ChooseColumn => self.open_column_menu(),
                Message::ValueMenu => self.open_value_menu(),
                Message::ClearValues => self.apply(Action::ClearValues),
                Message::Sort => self.sort_current_column(),
                Message::Clear => {
                    self.apply(Action::Clear);
                    self.set_status_message("Cleared search, values and sort");
                }
                Message::Refresh => self.start_load(true),
                Message::Export => self.export_to_file(),
                Message::CopyView => self.copy_view(),
                Message::Help => self.show_help(),
                _ => (),
            },
            Modus::COLUMNS => match msg {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_column_cursor(-1),
                Message::MoveDown => self.move_column_cursor(1),
                Message::Enter | Message::Toggle => self.choose_column(),
                Message::Exit | Message::ChooseColumn => self.exit(),
                _ => (),
            },
            Modus::VALUES => match msg {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_value_cursor(-1),
                Message::MoveDown => self.move_value_cursor(1),
                Message::Enter | Message::Toggle => self.toggle_current_value(),
                Message::Search => self.enter_cmd_mode(CMDMode::ValueFilter),
                Message::ClearValues => {
                    self.apply(Action::ClearValues);
                }
                Message::Exit | Message::ValueMenu => self.exit(),
                _ => (),
            },
            Modus::POPUP => match msg {
                Message::Quit => self.quit(),
                Message::Exit | Message::Enter | Message::Help => self.exit(),
                _ => (),
            },
            Modus::CMDINPUT => {
                if let Message::RawKey(key) = msg {
                    self.raw_input(key)
                }
            }
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.modus = match self.modus {
            Modus::CMDINPUT => self.previous_modus,
            _ => Modus::TABLE,
        };
        self.update_uidata();
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.popup_message = HELP_TEXT.to_string();
        self.update_uidata();
    }

    fn move_row(&mut self, step: isize) {
        let nrows = self.uidata.nrows;
        if nrows == 0 {
            return;
        }
        self.curser_row = self
            .curser_row
            .saturating_add_signed(step)
            .min(nrows - 1);
        self.update_uidata();
    }

    fn move_column(&mut self, step: isize) {
        let ncols = self.headers().len();
        if ncols == 0 {
            return;
        }
        let absolute = (self.offset_column + self.curser_column)
            .saturating_add_signed(step)
            .min(ncols - 1);
        // Scroll so that the selected column is the first rendered one when moving left past it.
        if absolute < self.offset_column {
            self.offset_column = absolute;
        }
        self.curser_column = absolute - self.offset_column;
        self.scroll_to_cursor();
        self.update_uidata();
    }

    // Shift the first rendered column until everything up to the cursor fits the table width.
    fn scroll_to_cursor(&mut self) {
        let widths: Vec<usize> = match (self.dataset.as_deref(), self.snapshot.as_ref()) {
            (Some(dataset), Some(snapshot)) => self
                .build_columns(dataset, snapshot)
                .iter()
                .map(|c| c.width + 1)
                .collect(),
            _ => return,
        };
        let absolute = std::cmp::min(self.offset_column + self.curser_column, widths.len().saturating_sub(1));
        while self.offset_column < absolute
            && widths[self.offset_column..=absolute].iter().sum::<usize>() > self.table_width
        {
            self.offset_column += 1;
        }
        self.curser_column = absolute.saturating_sub(self.offset_column);
    }

    fn sort_current_column(&mut self) {
        let Some(key) = self
            .headers()
            .get(self.offset_column + self.curser_column)
            .cloned()
        else {
            return;
        };
        self.apply(Action::SortBy(key.clone()));
        self.set_status_message(format!(
            "Sorted by {key} {}",
            self.state.sort.direction.arrow()
        ));
    }

    fn open_column_menu(&mut self) {
        if self.headers().is_empty() {
            return;
        }
        self.column_cursor = self
            .state
            .filter
            .column
            .as_ref()
            .and_then(|c| self.headers().iter().position(|h| h == c))
            .unwrap_or(0);
        self.modus = Modus::COLUMNS;
        self.update_uidata();
    }

    fn move_column_cursor(&mut self, step: isize) {
        let n = self.headers().len();
        if n > 0 {
            self.column_cursor = self.column_cursor.saturating_add_signed(step).min(n - 1);
        }
        self.update_uidata();
    }

    fn choose_column(&mut self) {
        let column = self.headers().get(self.column_cursor).cloned();
        debug!("Filter column is now {:?}", column);
        self.modus = Modus::TABLE;
        self.apply(Action::SelectColumn(column));
    }

    fn open_value_menu(&mut self) {
        let (Some(dataset), Some(column)) =
            (self.dataset.as_deref(), self.state.filter.column.as_deref())
        else {
            self.set_status_message("Choose a filter column first");
            return;
        };
        self.value_menu = ValueMenu {
            items: value_counts(&dataset.table, column),
            ..ValueMenu::default()
        };
        self.value_menu.apply_filter("");
        self.modus = Modus::VALUES;
        self.update_uidata();
    }

    fn move_value_cursor(&mut self, step: isize) {
        let n = self.value_menu.visible.len();
        if n > 0 {
            self.value_menu.cursor = self.value_menu.cursor.saturating_add_signed(step).min(n - 1);
        }
        self.update_uidata();
    }

    fn toggle_current_value(&mut self) {
        if let Some(value) = self.value_menu.current().map(String::from) {
            self.apply(Action::ToggleValue(value));
        }
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.cmd_mode = Some(mode);
        self.active_cmdinput = true;
        self.input.clear();
        match mode {
            CMDMode::Search => {
                self.saved_query = self.state.filter.query.clone();
                self.input.set(&self.saved_query);
            }
            CMDMode::ValueFilter => {
                let filter = self.value_menu.filter.clone();
                self.input.set(&filter);
            }
        }
        self.last_input = self.input.get();
        self.update_uidata();
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        let input = self.last_input.clone();
        trace!("Cmd input {:?}", input);

        match self.cmd_mode {
            Some(CMDMode::Search) => {
                let query = if input.canceled {
                    self.saved_query.clone()
                } else {
                    input.input.clone()
                };
                if query != self.state.filter.query {
                    self.apply(Action::SetQuery(query));
                }
            }
            Some(CMDMode::ValueFilter) => {
                let filter = if input.canceled { "" } else { input.input.as_str() };
                self.value_menu.apply_filter(filter);
            }
            None => warn!("Input without a command mode"),
        }

        if input.finished {
            self.active_cmdinput = false;
            self.cmd_mode = None;
            self.input.clear();
            self.last_input = InputResult::default();
            self.exit();
        } else {
            self.update_uidata();
        }
    }

    // -------------------- Export ---------------------- //

    fn export_text(&self) -> Option<String> {
        match (self.dataset.as_deref(), self.snapshot.as_ref()) {
            (Some(dataset), Some(snapshot)) => Some(export(dataset, snapshot)),
            _ => None,
        }
    }

    fn export_to_file(&mut self) {
        let Some(text) = self.export_text() else {
            self.set_status_message("Nothing to export");
            return;
        };
        let path = self.config.resolved_export_path();
        match fs::write(&path, text) {
            Ok(_) => {
                info!("Exported view to {}", path.display());
                let rows = self.snapshot.as_ref().map(|s| s.view.len()).unwrap_or(0);
                self.set_status_message(format!("Exported {rows} rows to {}", path.display()));
            }
            Err(e) => {
                error!("Export to {} failed: {e}", path.display());
                self.set_status_message(format!("Export failed: {e}"));
            }
        }
    }

    fn copy_view(&mut self) {
        let Some(text) = self.export_text() else {
            self.set_status_message("Nothing to copy");
            return;
        };
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    warn!("No clipboard available: {e}");
                    self.set_status_message(SVError::from(e).to_string());
                    return;
                }
            }
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return;
        };
        match clipboard.set_text(text) {
            Ok(_) => {
                trace!("Copied view to clipboard.");
                self.set_status_message("Copied view to clipboard");
            }
            Err(e) => {
                trace!("Error copying to clipboard: {:?}", e);
                self.set_status_message(SVError::from(e).to_string());
            }
        }
    }
}
