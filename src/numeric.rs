// Cell coercion under pt-BR formatting: "." groups thousands, "," marks decimals
// and an optional "R$" currency marker may prefix the value.

const CURRENCY_MARKER: &str = "R$";

/// Trim the way cells are trimmed everywhere: unicode whitespace plus a stray BOM.
pub fn trim_cell(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Coerce a cell to a number, or `None` when it is not numeric.
///
/// Every numeric test in the crate goes through this function so that sorting,
/// metric inference and KPI sums agree on what a number is.
pub fn to_number(cell: &str) -> Option<f64> {
    let s = trim_cell(cell);
    if s.is_empty() {
        return None;
    }

    let cleaned: String = s
        .replace(CURRENCY_MARKER, "")
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    parse_number_literal(&cleaned).filter(|n| n.is_finite())
}

// Accepts decimal literals with optional sign and exponent, and unsigned
// 0x/0o/0b integer literals of any length.
fn parse_number_literal(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    let lower = s.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return parse_radix_digits(digits, radix);
        }
    }
    // Rust accepts spellings such as "inf" and "nan"; those are dropped by the
    // finiteness check in the caller.
    s.parse::<f64>().ok()
}

// Only digits of `radix` are allowed after the prefix, so "0x+10" and "0x" are
// not numbers. Long literals lose precision instead of overflowing.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

// Round a plain decimal string to `places` fraction digits, ties away from zero.
fn round_decimal(text: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    if frac_part.len() <= places {
        return (int_part.to_string(), frac_part.to_string());
    }
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();
    if frac_part.as_bytes()[places] >= b'5' {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }
    let split = kept.len() - places;
    let frac = kept.split_off(split);
    (
        String::from_utf8_lossy(&kept).into_owned(),
        String::from_utf8_lossy(&frac).into_owned(),
    )
}

/// Render a number the way a pt-BR locale would: "." grouping, "," decimals and
/// at most three fraction digits.
pub fn format_br(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    // Display gives the shortest round-trip digits, which are then rounded in decimal.
    let (int_part, frac_part) = round_decimal(&n.abs().to_string(), 3);
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    let sign = if n < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac}")
    }
}
