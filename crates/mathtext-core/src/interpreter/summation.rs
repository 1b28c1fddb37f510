//! Summation: `` `S(lower,upper)` ``, where either bound may be empty and
//! a bound may itself contain parenthesized, comma-bearing sub-expressions
//! — the split is on the first comma at the outer group's nesting depth.

use crate::element::{Element, SourceLocation};
use crate::error::InterpreterError;
use crate::interpreter::{extract_group, Interpreter};

pub(crate) fn try_summation(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'`') || chars.get(*i + 1) != Some(&'S') {
        return Ok(None);
    }
    if chars.get(*i + 2) != Some(&'(') {
        // No dedicated failure code for this production; an absent argument
        // simply isn't a match and falls through to the catch buffer.
        return Ok(None);
    }

    let mut cursor = *i + 2;
    let Some(inner) = extract_group(chars, &mut cursor, '(', ')') else {
        return Ok(None);
    };

    let (lower_src, upper_src) = split_top_level_comma(&inner);
    let lower = interp.interpret_buffer(loc, &lower_src, false, false, depth + 1)?;
    let upper = interp.interpret_buffer(loc, &upper_src, false, false, depth + 1)?;
    *i = cursor;
    Ok(Some(Element::Summation { lower, upper }))
}

fn split_top_level_comma(src: &str) -> (String, String) {
    let mut depth = 0i32;
    for (idx, c) in src.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                return (src[..idx].to_string(), src[idx + 1..].to_string());
            }
            _ => {}
        }
    }
    (src.to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp() -> Interpreter {
        Interpreter::new(HashSet::new())
    }

    #[test]
    fn simple_bounds() {
        let chars: Vec<char> = "`S(1,9)x".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_summation(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Summation { lower, upper } => {
                assert_eq!(lower.len(), 1);
                assert_eq!(upper.len(), 1);
            }
            _ => panic!(),
        }
        assert_eq!(chars[i], 'x');
    }

    #[test]
    fn empty_upper_bound() {
        let chars: Vec<char> = "`S(i=1,)".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_summation(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Summation { upper, .. } => assert!(upper.is_empty()),
            _ => panic!(),
        }
    }

    #[test]
    fn nested_parens_in_bound_protect_inner_comma() {
        let chars: Vec<char> = "`S((a,b),n)".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_summation(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Summation { lower, upper } => {
                // lower is the group "(a,b)" as a single Group element.
                assert_eq!(lower.len(), 1);
                assert_eq!(upper.len(), 1);
            }
            _ => panic!(),
        }
    }

    #[test]
    fn missing_parens_does_not_match() {
        let chars: Vec<char> = "`Sxyz".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        assert!(try_summation(&mut it, &loc, &chars, &mut i, 0).unwrap().is_none());
        assert_eq!(i, 0);
    }
}
