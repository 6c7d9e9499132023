//! Natural ordering of metadata values
//!
//! Digit runs compare by numeric value, so "sample2" sorts before "sample10".
//! Values that parse entirely as finite floats are placed after all other
//! values and ordered by magnitude.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Alternating digit / non-digit runs
static CHUNK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+|[^0-9]+").unwrap());

/// Parse a value as a finite float, the way continuous coloring reads numbers.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Compare two strings chunk by chunk.
///
/// Digit runs are compared numerically (without overflowing on long runs),
/// text runs case-insensitively. A digit run sorts before a text run. Ties
/// fall back to plain byte order so the ordering is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = CHUNK_RE.find_iter(a);
    let mut right = CHUNK_RE.find_iter(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x.as_str(), y.as_str());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    let x_digits = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digits = y.starts_with(|c: char| c.is_ascii_digit());
    match (x_digits, y_digits) {
        (true, true) => {
            let xs = x.trim_start_matches('0');
            let ys = y.trim_start_matches('0');
            xs.len().cmp(&ys.len()).then_with(|| xs.cmp(ys))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.to_lowercase().cmp(&y.to_lowercase()),
    }
}

/// Full ordering used for legends and palette assignment.
pub fn value_cmp(a: &str, b: &str) -> Ordering {
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => natural_cmp(a, b),
    }
}

/// Sort values in place into natural order.
pub fn natural_sort<S: AsRef<str>>(values: &mut [S]) {
    values.sort_by(|a, b| value_cmp(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_digit_runs_compare_numerically() {
        let mut values = vec!["sample2", "sample10", "sample1"];
        natural_sort(&mut values);
        assert_eq!(values, vec!["sample1", "sample2", "sample10"]);
    }

    #[test]
    fn test_numbers_follow_text() {
        let mut values = vec!["10", "b", "2", "A", "-3.5"];
        natural_sort(&mut values);
        assert_eq!(values, vec!["A", "b", "-3.5", "2", "10"]);
    }

    #[test]
    fn test_case_insensitive_with_total_tiebreak() {
        assert_eq!(natural_cmp("abc", "ABD"), Ordering::Less);
        assert_eq!(natural_cmp("ABC", "abc"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn test_long_digit_runs_do_not_overflow() {
        let a = "x99999999999999999999999";
        let b = "x100000000000000000000000";
        assert_eq!(natural_cmp(a, b), Ordering::Less);
        assert_eq!(natural_cmp("x007", "x7"), Ordering::Less);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(" 4.5 "), Some(4.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("5 apples"), None);
    }
}
