use crate::csv::RawTable;
use crate::numeric::to_number;

/// Summary figures for a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    /// Sum of the metric column, or the row count when `used_fallback`.
    pub total: f64,
    pub row_count: usize,
    pub used_fallback: bool,
    pub hint: String,
}

/// Compute KPIs over the filtered and sorted view (before pagination).
///
/// A missing metric column and a metric column summing to zero are treated
/// the same: the total falls back to the row count.
pub fn aggregate(table: &RawTable, view: &[usize], metric: Option<&str>) -> Kpis {
    let row_count = view.len();
    let sum = metric.map(|name| match table.column_index(name) {
        Some(cidx) => view
            .iter()
            .map(|&r| to_number(table.cell(r, cidx)).unwrap_or(0.0))
            .sum::<f64>(),
        None => 0.0,
    });

    match (metric, sum) {
        (Some(name), Some(total)) if total != 0.0 => Kpis {
            total,
            row_count,
            used_fallback: false,
            hint: format!("Summing column '{name}'"),
        },
        (Some(name), _) => Kpis {
            total: row_count as f64,
            row_count,
            used_fallback: true,
            hint: format!("Column '{name}' looks empty; using row count"),
        },
        (None, _) => Kpis {
            total: row_count as f64,
            row_count,
            used_fallback: true,
            hint: "No numeric count column detected; using row count".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse;

    #[test]
    fn sums_metric_column() {
        let t = parse("Nome,Convites\nAna,3\nBea,5\nCau,\n");
        let k = aggregate(&t, &[0, 1, 2], Some("Convites"));
        assert_eq!(k.total, 8.0);
        assert_eq!(k.row_count, 3);
        assert!(!k.used_fallback);
        assert!(k.hint.contains("Convites"));
    }

    #[test]
    fn zero_sum_falls_back_to_count() {
        let t = parse("Nome,Convites\nAna,0\nBea,x\n");
        let k = aggregate(&t, &[0, 1], Some("Convites"));
        assert!(k.used_fallback);
        assert_eq!(k.total, 2.0);
        assert!(k.hint.contains("looks empty"));
    }

    #[test]
    fn no_metric_falls_back_to_count() {
        let t = parse("Nome\nAna\nBea\n");
        let k = aggregate(&t, &[1], None);
        assert!(k.used_fallback);
        assert_eq!(k.total, 1.0);
        assert_eq!(k.row_count, 1);
    }

    #[test]
    fn only_view_rows_are_summed() {
        let t = parse("Nome,Convites\nAna,3\nBea,5\n");
        assert_eq!(aggregate(&t, &[1], Some("Convites")).total, 5.0);
        assert_eq!(aggregate(&t, &[], Some("Convites")).total, 0.0);
    }
}
