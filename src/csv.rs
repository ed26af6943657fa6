use tracing::{debug, trace};

use crate::numeric::trim_cell;

/// One data row. Values are stored in header order; a missing cell is an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    pub fn get(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Parsed sheet: unique header names in order of first appearance and the data rows.
///
/// Immutable once parsed; a reload replaces it as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl RawTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows.get(row).map(|r| r.get(column)).unwrap_or("")
    }
}

// Split raw text into records of untrimmed fields.
fn tokenize(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => current.push(std::mem::take(&mut field)),
            '\n' => {
                current.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut current));
            }
            '\r' => {}
            _ => field.push(ch),
        }
    }

    // Input without a trailing newline, or an unterminated quote, leaves a pending record.
    if !field.is_empty() || !current.is_empty() {
        current.push(field);
        records.push(current);
    }

    if in_quotes {
        debug!("Unterminated quote, last field runs to the end of input");
    }
    records
}

/// Parse CSV text into a `RawTable`. Never fails; malformed input degrades.
///
/// The first non-blank record is the header. Empty header names are dropped and
/// the remaining names are zipped positionally against each data record, so a
/// dropped header shifts the cells that follow it. When a name repeats, the
/// header keeps its first position and the cell of the last occurrence wins.
pub fn parse(text: &str) -> RawTable {
    let mut records = tokenize(text)
        .into_iter()
        .filter(|r| r.iter().any(|v| !trim_cell(v).is_empty()));

    let Some(header_record) = records.next() else {
        return RawTable::default();
    };

    let mut headers: Vec<String> = Vec::new();
    // Slot i of the zipped header sequence maps to this header index.
    let mut slots: Vec<usize> = Vec::new();
    for name in header_record.iter().map(|h| trim_cell(h)).filter(|h| !h.is_empty()) {
        match headers.iter().position(|h| h == name) {
            Some(idx) => slots.push(idx),
            None => {
                headers.push(name.to_string());
                slots.push(headers.len() - 1);
            }
        }
    }

    let rows: Vec<Record> = records
        .map(|fields| {
            let mut values = vec![String::new(); headers.len()];
            for (pos, &idx) in slots.iter().enumerate() {
                values[idx] = fields.get(pos).map(|v| trim_cell(v)).unwrap_or("").to_string();
            }
            Record { values }
        })
        .collect();

    trace!("Parsed {} headers and {} rows", headers.len(), rows.len());
    RawTable { headers, rows }
}

fn escape_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render the given rows (indices into `table`) as CSV in header order.
/// Lines are joined with `\n` and there is no trailing newline.
pub fn to_csv(table: &RawTable, rows: &[usize]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        table
            .headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for &ridx in rows {
        let line = (0..table.headers.len())
            .map(|cidx| escape_field(table.cell(ridx, cidx)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(table: &RawTable) -> Vec<Vec<&str>> {
        table
            .rows()
            .iter()
            .map(|r| r.values().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn quoted_field_keeps_comma() {
        let t = parse("h1,h2\n1,\"2,000\"");
        assert_eq!(t.headers(), ["h1", "h2"]);
        assert_eq!(values(&t), vec![vec!["1", "2,000"]]);
    }

    #[test]
    fn doubled_quote_is_literal() {
        let t = parse("h\n\"a\"\"b\"");
        assert_eq!(values(&t), vec![vec!["a\"b"]]);
    }

    #[test]
    fn quoted_newline_stays_in_field() {
        let t = parse("a,b\n\"line1\nline2\",x\n");
        assert_eq!(values(&t), vec![vec!["line1\nline2", "x"]]);
    }

    #[test]
    fn crlf_and_blank_lines() {
        let t = parse("a,b\r\n1,2\r\n\r\n , \r\n3,4\r\n");
        assert_eq!(values(&t), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn empty_input_has_no_headers() {
        assert_eq!(parse(""), RawTable::default());
        assert_eq!(parse("\n \n,,\n"), RawTable::default());
    }

    #[test]
    fn short_and_long_rows() {
        let t = parse("a,b,c\n1\n1,2,3,4");
        assert_eq!(values(&t), vec![vec!["1", "", ""], vec!["1", "2", "3"]]);
    }

    #[test]
    fn empty_header_shifts_following_cells() {
        let t = parse("a,,b\n1,2,3");
        assert_eq!(t.headers(), ["a", "b"]);
        assert_eq!(values(&t), vec![vec!["1", "2"]]);
    }

    #[test]
    fn duplicate_header_keeps_first_position_last_value() {
        let t = parse("a,b,a\n1,2,3");
        assert_eq!(t.headers(), ["a", "b"]);
        assert_eq!(values(&t), vec![vec!["3", "2"]]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let t = parse("a,b\n1,\"open,\nmore");
        assert_eq!(values(&t), vec![vec!["1", "open,\nmore"]]);
    }

    #[test]
    fn cells_and_headers_are_trimmed() {
        let t = parse("\u{feff} Nome , Convites \n  Ana ,  3 ");
        assert_eq!(t.headers(), ["Nome", "Convites"]);
        assert_eq!(values(&t), vec![vec!["Ana", "3"]]);
    }

    #[test]
    fn export_quotes_special_fields() {
        let t = parse("name,note\nAna,\"a,b\"\nBea,\"say \"\"hi\"\"\"\nCau,plain");
        let out = to_csv(&t, &[2, 0, 1]);
        assert_eq!(out, "name,note\nCau,plain\nAna,\"a,b\"\nBea,\"say \"\"hi\"\"\"");
    }

    #[test]
    fn export_then_parse_is_identity() {
        let t = parse("x,y,z\n1,foo,R$ 2\n3,bar,\n");
        let all: Vec<usize> = (0..t.len()).collect();
        assert_eq!(parse(&to_csv(&t, &all)), t);
    }
}
