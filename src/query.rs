use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use tracing::trace;

use crate::collate::collate;
use crate::csv::{RawTable, Record};
use crate::numeric::trim_cell;

/// Free-text query plus the value filter on a single column.
///
/// `selected` only has an effect while `column` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub column: Option<String>,
    pub selected: BTreeSet<String>,
}

impl FilterState {
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn has_value_filter(&self) -> bool {
        self.column.is_some() && !self.selected.is_empty()
    }
}

fn matches_query(record: &Record, needle: &str) -> bool {
    record
        .values()
        .iter()
        .any(|v| v.to_lowercase().contains(needle))
}

/// Indices of the rows kept by `state`, in table order.
///
/// A row is kept when it matches the query (case-insensitive substring of any
/// cell) and, if a value filter is active, its trimmed cell in the filter
/// column is one of the selected values. An unknown filter column matches no
/// value, so an active value filter on it keeps nothing.
pub fn filter(table: &RawTable, state: &FilterState) -> Vec<usize> {
    let needle = state.query.trim().to_lowercase();
    let value_filter = state
        .column
        .as_deref()
        .filter(|_| !state.selected.is_empty())
        .map(|name| table.column_index(name));

    let kept: Vec<usize> = table
        .rows()
        .par_iter()
        .enumerate()
        .filter(|(_, record)| needle.is_empty() || matches_query(record, &needle))
        .filter(|(_, record)| match value_filter {
            None => true,
            Some(None) => false,
            Some(Some(cidx)) => state.selected.contains(trim_cell(record.get(cidx))),
        })
        .map(|(idx, _)| idx)
        .collect();

    trace!("Filter kept {}/{} rows", kept.len(), table.len());
    kept
}

/// Distinct non-empty values of `column` over all rows with their counts,
/// most frequent first, then by collation.
pub fn value_counts(table: &RawTable, column: &str) -> Vec<(String, usize)> {
    let Some(cidx) = table.column_index(column) else {
        return Vec::new();
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in table.rows() {
        let v = trim_cell(record.get(cidx));
        if !v.is_empty() {
            *counts.entry(v).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> =
        counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    sorted.sort_by(|(av, ac), (bv, bc)| {
        bc.cmp(ac)
            .then_with(|| collate(av, bv))
            .then_with(|| av.cmp(bv))
    });
    sorted
}
