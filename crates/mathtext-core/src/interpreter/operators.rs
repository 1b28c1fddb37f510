//! Operators (`+ * - / `) and comparators (`< > = <= >= != ~=`).

use crate::element::{ComparatorKind, Element, OperatorKind};

fn skip_spaces(chars: &[char], i: &mut usize) {
    while chars.get(*i) == Some(&' ') {
        *i += 1;
    }
}

pub(crate) fn try_operator(chars: &[char], i: &mut usize) -> Option<Element> {
    let kind = match chars.get(*i) {
        Some('+') => {
            *i += 1;
            OperatorKind::Add
        }
        Some('*') => {
            *i += 1;
            OperatorKind::Mul
        }
        Some('-') => {
            *i += 1;
            OperatorKind::Sub
        }
        Some(' ') if chars.get(*i + 1) == Some(&'/') && chars.get(*i + 2) == Some(&' ') => {
            *i += 3;
            OperatorKind::Div
        }
        _ => return None,
    };
    skip_spaces(chars, i);
    Some(Element::Operator(kind))
}

pub(crate) fn try_comparator(chars: &[char], i: &mut usize) -> Option<Element> {
    let kind = if matches2(chars, *i, "<=") {
        *i += 2;
        ComparatorKind::Lte
    } else if matches2(chars, *i, ">=") {
        *i += 2;
        ComparatorKind::Gte
    } else if matches2(chars, *i, "!=") {
        *i += 2;
        ComparatorKind::Neq
    } else if matches2(chars, *i, "~=") {
        *i += 2;
        ComparatorKind::Approx
    } else {
        match chars.get(*i) {
            Some('<') => {
                *i += 1;
                ComparatorKind::Lt
            }
            Some('>') => {
                *i += 1;
                ComparatorKind::Gt
            }
            Some('=') => {
                *i += 1;
                ComparatorKind::Eq
            }
            _ => return None,
        }
    };
    skip_spaces(chars, i);
    Some(Element::Comparator(kind))
}

fn matches2(chars: &[char], i: usize, pat: &str) -> bool {
    let mut pat_chars = pat.chars();
    let a = pat_chars.next().unwrap();
    let b = pat_chars.next().unwrap();
    chars.get(i) == Some(&a) && chars.get(i + 1) == Some(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_requires_surrounding_spaces() {
        let chars: Vec<char> = " / x".chars().collect();
        let mut i = 0;
        assert_eq!(try_operator(&chars, &mut i), Some(Element::Operator(OperatorKind::Div)));
        assert_eq!(i, 3);
    }

    #[test]
    fn comparator_prefers_two_char_forms() {
        let chars: Vec<char> = "<=y".chars().collect();
        let mut i = 0;
        assert_eq!(try_comparator(&chars, &mut i), Some(Element::Comparator(ComparatorKind::Lte)));
        assert_eq!(i, 2);
    }
}
