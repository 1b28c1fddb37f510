//! The number grammar: signed decimal numbers with thousands separators
//! validated in groups of exactly three digits.

use crate::element::{Element, Number, Sign};

/// Attempt to match a `Number` starting at `chars[*i]`. On success, advances
/// `*i` past the number and returns the element; on failure, leaves `*i`
/// untouched.
pub(crate) fn try_number(chars: &[char], i: &mut usize) -> Option<Element> {
    let start = *i;
    let mut cursor = *i;

    let mut sign = Sign::Positive;
    if chars.get(cursor) == Some(&'-') {
        sign = Sign::Negative;
        cursor += 1;
    }

    let whole = scan_digit_group(chars, &mut cursor);

    let has_whole = whole.as_ref().is_some_and(|s| !s.is_empty());
    let starts_decimal = chars.get(cursor) == Some(&'.') && chars.get(cursor + 1).is_some_and(|c| c.is_ascii_digit());

    if !has_whole && !starts_decimal {
        *i = start;
        return None;
    }

    let mut fraction = None;
    if chars.get(cursor) == Some(&'.') && chars.get(cursor + 1).is_some_and(|c| c.is_ascii_digit()) {
        cursor += 1;
        fraction = scan_digit_group(chars, &mut cursor);
    }

    *i = cursor;
    Some(Element::Number(Number {
        sign,
        whole: whole.unwrap_or_default().into(),
        fraction: fraction.map(Into::into),
    }))
}

/// Scan a run of digits, possibly broken into groups of exactly three by a
/// thousands separator (`,`, ` `, or the two-character escape `\ `). A
/// separator is only consumed if the group preceding it is at most three
/// digits long and exactly three digits (not four or more) follow it.
fn scan_digit_group(chars: &[char], i: &mut usize) -> Option<String> {
    if !chars.get(*i).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut out = String::new();
    let mut group_len = 0usize;
    while chars.get(*i).is_some_and(|c| c.is_ascii_digit()) {
        out.push(chars[*i]);
        *i += 1;
        group_len += 1;
    }

    loop {
        if group_len > 3 {
            break;
        }
        let (sep_char, sep_len) = match chars.get(*i) {
            Some(',') => (',', 1),
            Some(' ') => (' ', 1),
            Some('\\') if chars.get(*i + 1) == Some(&' ') => (' ', 2),
            _ => break,
        };

        let p = *i + sep_len;
        let three_digits = chars.get(p..p + 3).is_some_and(|s| s.iter().all(|c| c.is_ascii_digit()))
            && p + 3 <= chars.len();
        let fourth_is_digit = chars.get(p + 3).is_some_and(|c| c.is_ascii_digit());

        if three_digits && !fourth_is_digit {
            out.push(sep_char);
            out.push(chars[p]);
            out.push(chars[p + 1]);
            out.push(chars[p + 2]);
            *i = p + 3;
            group_len = 3;
        } else {
            break;
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> (Option<Element>, usize) {
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        let el = try_number(&chars, &mut i);
        (el, i)
    }

    #[test]
    fn plain_integer() {
        let (el, i) = parse("42x");
        assert_eq!(i, 2);
        match el.unwrap() {
            Element::Number(n) => {
                assert_eq!(n.sign, Sign::Positive);
                assert_eq!(&*n.whole, "42");
                assert!(n.fraction.is_none());
            }
            _ => panic!(),
        }
    }

    #[test]
    fn thousands_separator() {
        let (el, i) = parse("1,000widgets");
        assert_eq!(i, 5);
        match el.unwrap() {
            Element::Number(n) => assert_eq!(&*n.whole, "1,000"),
            _ => panic!(),
        }
    }

    #[test]
    fn invalid_group_terminates_number() {
        // "12,3" - only 1 digit follows the comma, so the comma is not a
        // valid thousands separator and terminates the number at "12".
        let (el, i) = parse("12,3");
        assert_eq!(i, 2);
        match el.unwrap() {
            Element::Number(n) => assert_eq!(&*n.whole, "12"),
            _ => panic!(),
        }
    }

    #[test]
    fn pure_fractional() {
        let (el, i) = parse(".5");
        assert_eq!(i, 2);
        match el.unwrap() {
            Element::Number(n) => {
                assert!(n.whole.is_empty());
                assert_eq!(n.fraction.as_deref(), Some("5"));
            }
            _ => panic!(),
        }
    }

    #[test]
    fn decimal_suffix() {
        let (el, _) = parse("3.14");
        match el.unwrap() {
            Element::Number(n) => {
                assert_eq!(&*n.whole, "3");
                assert_eq!(n.fraction.as_deref(), Some("14"));
            }
            _ => panic!(),
        }
    }

    #[test]
    fn no_match_on_non_digit() {
        let (el, i) = parse("abc");
        assert!(el.is_none());
        assert_eq!(i, 0);
    }
}
