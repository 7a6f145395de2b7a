//! Free-text year label parsing
//!
//! Timeline years are user-entered labels like "AE 350" or "-50". Layout needs
//! a number, so parsing strips everything except digits and signs and reads
//! the leading signed integer. Unparsable labels resolve to 0.

/// Parse a year label into a number for sorting and layout.
pub fn parse_year(label: &str) -> i64 {
    let filtered: String = label.chars().filter(|c| c.is_ascii_digit() || *c == '-').collect();
    let mut chars = filtered.chars().peekable();
    let mut digits = String::new();
    if chars.peek() == Some(&'-') {
        digits.push('-');
        chars.next();
    }
    for c in chars {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            break;
        }
    }
    digits.parse().unwrap_or(0)
}
