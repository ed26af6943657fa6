use std::sync::Arc;
use std::time::Instant;

use tracing::{info, trace};

use crate::csv::{RawTable, parse, to_csv};
use crate::kpi::{Kpis, aggregate};
use crate::metric::infer_metric_column;
use crate::paginate::{Page, paginate};
use crate::query::filter;
use crate::sort::sort;
use crate::state::ViewState;

/// A loaded table together with its inferred metric column. Both are replaced together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub table: RawTable,
    pub metric: Option<String>,
}

impl Dataset {
    pub fn from_csv(text: &str) -> Self {
        let start_time = Instant::now();
        let table = parse(text);
        let metric = infer_metric_column(&table);
        info!(
            "Parsed {} rows x {} columns in {}ms, metric column {:?}",
            table.len(),
            table.headers().len(),
            start_time.elapsed().as_millis(),
            metric
        );
        Self { table, metric }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Filtered and sorted row indices (all pages).
    pub view: Arc<Vec<usize>>,
    pub page: Page,
    pub kpis: Kpis,
}

impl Snapshot {
    pub fn page_rows(&self) -> &[usize] {
        &self.view[self.page.start..self.page.end]
    }
}

/// Filter, sort, aggregate and paginate `dataset` under `state`.
pub fn run(dataset: &Dataset, state: &ViewState) -> Snapshot {
    let mut view = filter(&dataset.table, &state.filter);
    sort(&dataset.table, &mut view, &state.sort);
    let kpis = aggregate(&dataset.table, &view, dataset.metric.as_deref());
    let page = paginate(view.len(), state.page, state.page_size);
    trace!("Snapshot: {} rows, page {}/{}", view.len(), page.number, page.count);
    Snapshot {
        view: Arc::new(view),
        page,
        kpis,
    }
}

/// CSV text of the whole view in loaded header order.
pub fn export(dataset: &Dataset, snapshot: &Snapshot) -> String {
    to_csv(&dataset.table, &snapshot.view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;

    #[test]
    fn end_to_end_totals() {
        let data = Dataset::from_csv("Nome,Convites\nAna,3\nBea,5\nCau,0\n");
        let snap = run(&data, &ViewState::default().reconcile(data.table.headers()));
        assert_eq!(snap.view.len(), 3);
        assert_eq!(data.metric.as_deref(), Some("Convites"));
        assert_eq!(snap.kpis.total, 8.0);
        assert_eq!(snap.kpis.row_count, 3);
        assert_eq!(snap.page_rows(), &[0, 1, 2]);
    }

    #[test]
    fn kpis_use_all_pages() {
        let mut text = String::from("Nome,Convites\n");
        for i in 0..30 {
            text.push_str(&format!("P{i},2\n"));
        }
        let data = Dataset::from_csv(&text);
        let state = ViewState::new(10).apply(Action::GoToPage(2));
        let snap = run(&data, &state);
        assert_eq!(snap.page_rows().len(), 10);
        assert_eq!(snap.page_rows()[0], 10);
        assert_eq!(snap.kpis.total, 60.0);
    }

    #[test]
    fn export_follows_sort_but_keeps_header_order() {
        let data = Dataset::from_csv("Nome,Convites\nBea,5\nAna,3\n");
        let state = ViewState::default().apply(Action::SortBy("Nome".into()));
        let snap = run(&data, &state);
        assert_eq!(export(&data, &snap), "Nome,Convites\nAna,3\nBea,5");
    }
}
