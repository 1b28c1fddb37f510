//! ItemNumber: one of six fixed lead-in patterns recognized only at the
//! very start of a line, in math mode: `1. `, `a. `, `1) `, `a) `,
//! `(1) `, `(a) `. Digits allow 1-4 digits; letters allow exactly one.

use crate::element::Element;

pub(crate) fn parse_item_number(chars: &[char], i: &mut usize) -> Option<Element> {
    try_bare(chars, i, false, '.')
        .or_else(|| try_bare(chars, i, true, '.'))
        .or_else(|| try_bare(chars, i, false, ')'))
        .or_else(|| try_bare(chars, i, true, ')'))
        .or_else(|| try_parenthesized(chars, i, false))
        .or_else(|| try_parenthesized(chars, i, true))
        .map(|text| Element::ItemNumber(text.into()))
}

fn digits(chars: &[char], pos: &mut usize) -> Option<String> {
    let mut s = String::new();
    while s.len() < 4 && chars.get(*pos).is_some_and(|c| c.is_ascii_digit()) {
        s.push(chars[*pos]);
        *pos += 1;
    }
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn letter(chars: &[char], pos: &mut usize) -> Option<String> {
    match chars.get(*pos) {
        Some(c) if c.is_ascii_alphabetic() => {
            let s = c.to_string();
            *pos += 1;
            Some(s)
        }
        _ => None,
    }
}

fn try_bare(chars: &[char], i: &mut usize, use_letter: bool, sep: char) -> Option<String> {
    let start = *i;
    let mut pos = start;
    let core = if use_letter { letter(chars, &mut pos) } else { digits(chars, &mut pos) }?;
    if chars.get(pos) != Some(&sep) {
        return None;
    }
    pos += 1;
    if chars.get(pos) != Some(&' ') {
        return None;
    }
    let matched = format!("{core}{sep}");
    *i = pos + 1;
    Some(matched)
}

fn try_parenthesized(chars: &[char], i: &mut usize, use_letter: bool) -> Option<String> {
    let start = *i;
    let mut pos = start;
    if chars.get(pos) != Some(&'(') {
        return None;
    }
    pos += 1;
    let core = if use_letter { letter(chars, &mut pos) } else { digits(chars, &mut pos) }?;
    if chars.get(pos) != Some(&')') {
        return None;
    }
    pos += 1;
    if chars.get(pos) != Some(&' ') {
        return None;
    }
    let matched = format!("({core})");
    *i = pos + 1;
    Some(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> (Option<Element>, usize) {
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        let el = parse_item_number(&chars, &mut i);
        (el, i)
    }

    #[test]
    fn numeric_period() {
        let (el, i) = parse("12. rest");
        match el.unwrap() {
            Element::ItemNumber(s) => assert_eq!(&*s, "12."),
            _ => panic!(),
        }
        assert_eq!(i, 4);
    }

    #[test]
    fn letter_paren() {
        let (el, i) = parse("a) rest");
        match el.unwrap() {
            Element::ItemNumber(s) => assert_eq!(&*s, "a)"),
            _ => panic!(),
        }
        assert_eq!(i, 3);
    }

    #[test]
    fn parenthesized_digit() {
        let (el, i) = parse("(3) rest");
        match el.unwrap() {
            Element::ItemNumber(s) => assert_eq!(&*s, "(3)"),
            _ => panic!(),
        }
        assert_eq!(i, 4);
    }

    #[test]
    fn parenthesized_letter() {
        let (el, _) = parse("(a) rest");
        match el.unwrap() {
            Element::ItemNumber(s) => assert_eq!(&*s, "(a)"),
            _ => panic!(),
        }
    }

    #[test]
    fn no_match_without_trailing_space() {
        let (el, i) = parse("12.rest");
        assert!(el.is_none());
        assert_eq!(i, 0);
    }

    #[test]
    fn digits_capped_at_four() {
        let (el, i) = parse("12345. rest");
        // Only the first 4 digits are consumed, leaving "5." unmatched
        // against the separator check -> no match at all.
        assert!(el.is_none());
        assert_eq!(i, 0);
    }
}
