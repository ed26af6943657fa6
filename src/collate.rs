use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

// Root collation order of common ASCII punctuation and symbols. Whitespace
// sorts before all of them and anything unlisted sorts after, by code point.
const PUNCT_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

fn punct_rank(c: char) -> usize {
    if c.is_whitespace() {
        return 0;
    }
    PUNCT_ORDER
        .chars()
        .position(|p| p == c)
        .map_or(PUNCT_ORDER.len() + 1, |pos| pos + 1)
}

// Collation units. Declaration order is the primary order:
// punctuation and spaces, then numbers, then letters.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    // Rank from `punct_rank`, then the character itself.
    Punct(usize, char),
    // Digits without leading zeros; compared by length first, then lexically.
    Number(usize, String),
    Letter(char),
}

fn units(s: &str) -> Vec<Unit> {
    let folded: Vec<char> = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut out = Vec::with_capacity(folded.len());
    let mut i = 0;
    while i < folded.len() {
        let c = folded[i];
        if c.is_ascii_digit() {
            let start = i;
            while i < folded.len() && folded[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = folded[start..i].iter().collect();
            let significant = digits.trim_start_matches('0').to_string();
            out.push(Unit::Number(significant.len(), significant));
            continue;
        }
        if c.is_alphanumeric() {
            out.push(Unit::Letter(c));
        } else {
            out.push(Unit::Punct(punct_rank(c), c));
        }
        i += 1;
    }
    out
}

/// Compare two strings for display ordering.
///
/// Approximates a pt-BR collator at base strength with numeric ordering: case
/// and accents are ignored ("É" == "e"), runs of digits compare by value
/// ("item2" < "item10") and punctuation sorts before digits, digits before
/// letters. Common ASCII punctuation follows the root collation order
/// (`_` < `-` < `,` ... `+` < `$`); other symbols sort after it by code point. Strings that differ only in case or accents compare `Equal`.
pub fn collate(a: &str, b: &str) -> Ordering {
    units(a).cmp(&units(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_inside_text_compare_by_value() {
        assert_eq!(collate("item2", "item10"), Ordering::Less);
        assert_eq!(collate("item10", "item9"), Ordering::Greater);
        assert_eq!(collate("v007", "v7"), Ordering::Equal);
    }

    #[test]
    fn ignores_case_and_accents() {
        assert_eq!(collate("Ana", "ana"), Ordering::Equal);
        assert_eq!(collate("José", "jose"), Ordering::Equal);
        assert_eq!(collate("Ção", "cao"), Ordering::Equal);
        assert_eq!(collate("Álvaro", "Bruno"), Ordering::Less);
    }

    #[test]
    fn digits_before_letters_and_prefixes_first() {
        assert_eq!(collate("10", "abc"), Ordering::Less);
        assert_eq!(collate("", "a"), Ordering::Less);
        assert_eq!(collate("ab", "abc"), Ordering::Less);
        assert_eq!(collate("a b", "ab"), Ordering::Less);
    }

    #[test]
    fn punctuation_follows_collation_order() {
        assert_eq!(collate("a_", "a-"), Ordering::Less);
        assert_eq!(collate("+", "$"), Ordering::Less);
        assert_eq!(collate("a b", "a_b"), Ordering::Less);
        assert_eq!(collate("$", "0"), Ordering::Less);
        assert_eq!(collate("§", "$"), Ordering::Greater);
    }
}
