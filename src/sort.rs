use std::cmp::Ordering;

use tracing::trace;

use crate::collate::collate;
use crate::csv::RawTable;
use crate::numeric::to_number;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: Direction,
}

/// Compare two cells: numerically when both coerce to numbers, otherwise by collation.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (to_number(a), to_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => collate(a, b),
    }
}

// Stable top-down merge sort. The cell comparator mixes numeric and collated
// ordering and is not guaranteed to be a total order, which the std sorts may
// reject with a panic.
fn merge_sort_by<T: Copy, F>(items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        // Take from the right run only when strictly smaller, which keeps equal keys in order.
        if compare(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..len]);
    items.copy_from_slice(&merged);
}

/// Reorder `rows` (indices into `table`) by the sort key. Without a key, or with a
/// key that is no longer a header, the order is unchanged.
pub fn sort(table: &RawTable, rows: &mut [usize], state: &SortState) {
    let Some(cidx) = state.key.as_deref().and_then(|k| table.column_index(k)) else {
        return;
    };
    let direction = state.direction;
    merge_sort_by(rows, &|&a: &usize, &b: &usize| {
        let ord = compare_cells(table.cell(a, cidx), table.cell(b, cidx));
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    trace!("Sorted {} rows by {:?} {:?}", rows.len(), state.key, direction);
}
