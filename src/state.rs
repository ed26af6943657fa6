use tracing::{debug, warn};

use crate::paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use crate::query::FilterState;
use crate::sort::{Direction, SortState};

/// Interactive state of a session. Updated only through `apply` and `reconcile`,
/// each returning a new state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub filter: FilterState,
    pub sort: SortState,
    /// 1-based; clamped against the view when a snapshot is taken.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetQuery(String),
    ClearQuery,
    SelectColumn(Option<String>),
    ToggleValue(String),
    ClearValues,
    SortBy(String),
    NextPage,
    PreviousPage,
    GoToPage(usize),
    SetPageSize(usize),
    /// Reset query, selected values, sort and page. The filter column is kept.
    Clear,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        Self {
            filter: FilterState::default(),
            sort: SortState::default(),
            page: 1,
            page_size,
        }
    }

    pub fn apply(mut self, action: Action) -> Self {
        debug!("Apply {:?}", action);
        match action {
            Action::SetQuery(query) => {
                self.filter.query = query;
                self.page = 1;
            }
            Action::ClearQuery => {
                self.filter.query.clear();
                self.page = 1;
            }
            Action::SelectColumn(column) => {
                if self.filter.column != column {
                    self.filter.column = column;
                    self.filter.selected.clear();
                }
            }
            Action::ToggleValue(value) => {
                if self.filter.column.is_none() {
                    warn!("Ignoring value {:?} without a filter column", value);
                } else if !self.filter.selected.remove(&value) {
                    self.filter.selected.insert(value);
                }
            }
            Action::ClearValues => self.filter.selected.clear(),
            Action::SortBy(key) => {
                if self.sort.key.as_deref() == Some(key.as_str()) {
                    self.sort.direction = self.sort.direction.toggled();
                } else {
                    self.sort = SortState {
                        key: Some(key),
                        direction: Direction::Ascending,
                    };
                }
            }
            Action::NextPage => self.page = self.page.saturating_add(1),
            Action::PreviousPage => self.page = self.page.saturating_sub(1).max(1),
            Action::GoToPage(page) => self.page = page.max(1),
            Action::SetPageSize(size) => {
                if PAGE_SIZES.contains(&size) {
                    self.page_size = size;
                    self.page = 1;
                } else {
                    warn!("Ignoring page size {size}, allowed {:?}", PAGE_SIZES);
                }
            }
            Action::Clear => {
                self.filter.query.clear();
                self.filter.selected.clear();
                self.sort = SortState::default();
                self.page = 1;
            }
        }
        self
    }

    /// Align the state with the headers of a freshly loaded table.
    ///
    /// A filter column that disappeared is replaced by the first header and its
    /// selected values are cleared; a session without a filter column also gets
    /// the first header. A sort key that disappeared is dropped.
    pub fn reconcile(mut self, headers: &[String]) -> Self {
        let column_present = self
            .filter
            .column
            .as_ref()
            .is_some_and(|c| headers.contains(c));
        if !column_present {
            if self.filter.column.is_some() {
                debug!("Filter column {:?} is gone", self.filter.column);
            }
            self.filter.column = headers.first().cloned();
            self.filter.selected.clear();
        }

        let key_present = self
            .sort
            .key
            .as_ref()
            .is_none_or(|k| headers.contains(k));
        if !key_present {
            debug!("Sort key {:?} is gone", self.sort.key);
            self.sort = SortState::default();
        }
        self
    }
}
