use sheetview::csv::{parse, to_csv};
use sheetview::kpi::aggregate;
use sheetview::metric::infer_metric_column;
use sheetview::numeric::to_number;
use sheetview::paginate::paginate;
use sheetview::pipeline::{Dataset, export, run};
use sheetview::query::{FilterState, filter};
use sheetview::state::{Action, ViewState};

const GUESTS: &str = "\
Nome,Mesa,Convites,Observação
Ana,A,3,
Bea,B,5,\"vegetariana, sem glúten\"

Cau,A,0,
Dan,C,R$ 2,\"chega \"\"tarde\"\"\"
Eva,B,1.000,
";

#[test]
fn end_to_end_view_and_totals() {
    let data = Dataset::from_csv("Nome,Convites\nAna,3\nBea,5\nCau,0\n");
    let state = ViewState::default().reconcile(data.table.headers());
    let snap = run(&data, &state);

    assert_eq!(snap.view.len(), 3);
    assert_eq!(data.metric.as_deref(), Some("Convites"));
    assert_eq!(snap.kpis.total, 8.0);
    assert_eq!(snap.kpis.row_count, 3);
    assert!(!snap.kpis.used_fallback);
}

#[test]
fn quoted_fields_and_blank_lines() {
    let t = parse(GUESTS);
    assert_eq!(t.headers(), ["Nome", "Mesa", "Convites", "Observação"]);
    assert_eq!(t.len(), 5);
    assert_eq!(t.cell(1, 3), "vegetariana, sem glúten");
    assert_eq!(t.cell(3, 3), "chega \"tarde\"");
    assert_eq!(to_number(t.cell(4, 2)), Some(1000.0));
}

#[test]
fn filter_sort_and_export() {
    let data = Dataset::from_csv(GUESTS);
    let state = ViewState::default()
        .reconcile(data.table.headers())
        .apply(Action::SelectColumn(Some("Mesa".to_string())))
        .apply(Action::ToggleValue("B".to_string()))
        .apply(Action::ToggleValue("C".to_string()))
        .apply(Action::SortBy("Convites".to_string()))
        .apply(Action::SortBy("Convites".to_string()));
    let snap = run(&data, &state);

    // Eva (1000), Bea (5), Dan (2)
    assert_eq!(snap.view.as_slice(), &[4, 1, 3]);
    assert_eq!(snap.kpis.total, 1007.0);
    assert_eq!(
        export(&data, &snap),
        "Nome,Mesa,Convites,Observação\n\
         Eva,B,1.000,\n\
         Bea,B,5,\"vegetariana, sem glúten\"\n\
         Dan,C,R$ 2,\"chega \"\"tarde\"\"\""
    );
}

#[test]
fn zero_sum_metric_falls_back_to_count() {
    let data = Dataset::from_csv(GUESTS);
    let state = ViewState::default().apply(Action::SetQuery("cau".to_string()));
    let snap = run(&data, &state);
    assert_eq!(snap.view.len(), 1);
    assert!(snap.kpis.used_fallback);
    assert_eq!(snap.kpis.total, 1.0);
}

#[test]
fn filter_is_intersection_of_query_and_values() {
    let t = parse(GUESTS);
    for query in ["", "a", "e", "zz"] {
        for values in [vec![], vec!["A"], vec!["B", "C"]] {
            let combined = FilterState {
                query: query.to_string(),
                column: Some("Mesa".to_string()),
                selected: values.iter().map(|v| v.to_string()).collect(),
            };
            let only_query = FilterState {
                query: query.to_string(),
                ..FilterState::default()
            };
            let only_values = FilterState {
                query: String::new(),
                ..combined.clone()
            };
            let a = filter(&t, &only_query);
            let b = filter(&t, &only_values);
            for idx in filter(&t, &combined) {
                assert!(a.contains(&idx) && b.contains(&idx));
            }
        }
    }
}

#[test]
fn page_past_the_end_is_clamped() {
    for total in [1, 24, 25, 26, 99] {
        let page = paginate(total, 999, 25);
        assert_eq!(page.number, page.count);
        assert!(page.end - page.start >= 1);
    }
    let empty = paginate(0, 1, 25);
    assert_eq!((empty.count, empty.end - empty.start), (1, 0));
}

#[test]
fn export_round_trips_plain_tables() {
    let t = parse("a,b,c\n1,x,y\n2,,z\n3,w,\n");
    let all: Vec<usize> = (0..t.len()).collect();
    assert_eq!(parse(&to_csv(&t, &all)), t);
}

#[test]
fn metric_and_aggregate_on_fallback_candidates() {
    let t = parse("Nome,Valor\nA,R$ 10,50\nB,R$ 1.000,00\nC,R$ 0,50\n");
    // The unquoted decimal commas split the cells, so Valor holds only "R$ 10" etc.
    assert_eq!(t.cell(0, 1), "R$ 10");
    let metric = infer_metric_column(&t);
    assert_eq!(metric.as_deref(), Some("Valor"));
    let k = aggregate(&t, &[0, 1, 2], metric.as_deref());
    assert_eq!(k.total, 1010.0);
}
