use rayon::prelude::*;
use tracing::{debug, trace};

use crate::csv::RawTable;
use crate::numeric::to_number;

/// Header fragments that mark a column as a candidate count column.
pub const CANDIDATE_NAME_PATTERNS: [&str; 5] =
    ["convite", "convites", "qtd", "quantidade", "convidad"];
/// Header fragments that earn `NAME_BONUS`.
pub const BONUS_NAME_PATTERNS: [&str; 2] = ["convite", "convites"];
/// Added to a column's sum when its name matches `BONUS_NAME_PATTERNS`.
/// Large enough to dominate any realistic sum.
pub const NAME_BONUS: f64 = 1_000_000.0;
/// Minimum share of rows that must coerce to a number.
pub const MIN_NUMERIC_SHARE: f64 = 0.3;
/// Minimum absolute number of numeric rows.
pub const MIN_NUMERIC_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScore {
    pub name: String,
    pub numeric_count: usize,
    pub sum: f64,
}

fn name_matches(name: &str, patterns: &[&str]) -> bool {
    let lower = name.to_lowercase();
    patterns.iter().any(|p| lower.contains(p))
}

/// Numeric rows required before a column qualifies.
pub fn required_numeric_rows(row_count: usize) -> usize {
    std::cmp::max(
        MIN_NUMERIC_ROWS,
        (row_count as f64 * MIN_NUMERIC_SHARE).floor() as usize,
    )
}

/// Weighting used to rank qualifying columns.
pub fn score(column: &ColumnScore) -> f64 {
    let bonus = if name_matches(&column.name, &BONUS_NAME_PATTERNS) {
        NAME_BONUS
    } else {
        0.0
    };
    bonus + column.sum
}

fn score_column(table: &RawTable, column: usize) -> ColumnScore {
    let (numeric_count, sum) = table
        .rows()
        .iter()
        .filter_map(|r| to_number(r.get(column)))
        .fold((0usize, 0.0f64), |(count, sum), n| (count + 1, sum + n));
    ColumnScore {
        name: table.headers()[column].clone(),
        numeric_count,
        sum,
    }
}

/// Pick the column that most likely holds the primary count, if any.
///
/// Candidates are headers matching `CANDIDATE_NAME_PATTERNS`, or every header
/// when none match. A candidate qualifies with at least
/// `required_numeric_rows` numeric cells; the highest `score` wins and the
/// first candidate wins ties.
pub fn infer_metric_column(table: &RawTable) -> Option<String> {
    let by_name: Vec<usize> = (0..table.headers().len())
        .filter(|&idx| name_matches(&table.headers()[idx], &CANDIDATE_NAME_PATTERNS))
        .collect();
    let candidates: Vec<usize> = if by_name.is_empty() {
        (0..table.headers().len()).collect()
    } else {
        by_name
    };

    // Score in parallel; collecting an indexed iterator keeps candidate order.
    let scores: Vec<ColumnScore> = candidates
        .par_iter()
        .map(|&idx| score_column(table, idx))
        .collect();

    let required = required_numeric_rows(table.len());
    let mut best: Option<(f64, &ColumnScore)> = None;
    for column in scores.iter() {
        if column.numeric_count < required {
            trace!(
                "Column {:?} has {} numeric cells, needs {}",
                column.name, column.numeric_count, required
            );
            continue;
        }
        let s = score(column);
        if best.is_none_or(|(best_score, _)| s > best_score) {
            best = Some((s, column));
        }
    }

    let chosen = best.map(|(_, c)| c.name.clone());
    debug!("Metric column: {:?}", chosen);
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse;

    #[test]
    fn picks_invite_column() {
        let mut text = String::from("Nome,Convites\n");
        let counts = ["10", "12", "20", "", "x", "", "", "", "", ""];
        for (i, c) in counts.iter().enumerate() {
            text.push_str(&format!("P{i},{c}\n"));
        }
        let t = parse(&text);
        assert_eq!(infer_metric_column(&t), Some("Convites".to_string()));
    }

    #[test]
    fn name_bonus_beats_larger_sum() {
        let t = parse("Qtd Mesas,Convites\n900,1\n900,1\n900,1\n");
        assert_eq!(infer_metric_column(&t), Some("Convites".to_string()));
    }

    #[test]
    fn sum_breaks_ties_between_named_columns() {
        let t = parse("Convites,Convites extras\n1,5\n1,5\n1,5\n");
        assert_eq!(infer_metric_column(&t), Some("Convites extras".to_string()));

        // Neither earns the bonus, so the larger sum wins.
        let t = parse("Qtd,Convidados\n1,4\n2,4\n3,4\n");
        assert_eq!(infer_metric_column(&t), Some("Convidados".to_string()));
    }

    #[test]
    fn falls_back_to_all_headers_by_sum() {
        let t = parse("Nome,Idade,Valor\nA,30,R$ 1.000\nB,40,R$ 2.000\nC,50,R$ 3.000\n");
        assert_eq!(infer_metric_column(&t), Some("Valor".to_string()));
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let t = parse("a,b\n1,1\n2,2\n3,3\n");
        assert_eq!(infer_metric_column(&t), Some("a".to_string()));
    }

    #[test]
    fn needs_three_numeric_rows() {
        let t = parse("Nome,Convites\nA,1\nB,2\n");
        assert_eq!(infer_metric_column(&t), None);
        assert_eq!(infer_metric_column(&RawTable::default()), None);
    }

    #[test]
    fn share_threshold_boundary() {
        // 20 rows need 6 numeric cells.
        assert_eq!(required_numeric_rows(20), 6);
        assert_eq!(required_numeric_rows(5), 3);

        let build = |numeric: usize| {
            let mut text = String::from("Convites\n");
            for i in 0..20 {
                text.push_str(if i < numeric { "1\n" } else { "-\n" });
            }
            parse(&text)
        };
        assert_eq!(infer_metric_column(&build(5)), None);
        assert_eq!(infer_metric_column(&build(6)), Some("Convites".to_string()));
    }
}
