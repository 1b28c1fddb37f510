//! Modifiers: a leading backtick followed by `V`, `BAR`, `CJ`, `HAT`, or
//! `H`, applied to a parenthesized group, a whole fraction kept together
//! (`@...#`), or the next bare item.

use crate::diagnostics::Code;
use crate::element::{Element, ElementVec, ModifierKind, SourceLocation};
use crate::error::{InterpreterError, InterpreterErrorKind};
use crate::interpreter::fraction::scan_fraction_span;
use crate::interpreter::{extract_group, extract_item, Interpreter, DEFAULT_TERMINATORS};

pub(crate) fn try_modifier(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'`') {
        return Ok(None);
    }

    let (kind, tag_len) = if starts_with(chars, *i + 1, "BAR") {
        (ModifierKind::OverBar, 3)
    } else if starts_with(chars, *i + 1, "CJ") {
        (ModifierKind::OverBar, 2)
    } else if starts_with(chars, *i + 1, "HAT") {
        (ModifierKind::OverHat, 3)
    } else if chars.get(*i + 1) == Some(&'V') {
        (ModifierKind::OverArrowRight, 1)
    } else if chars.get(*i + 1) == Some(&'H') {
        (ModifierKind::OverHat, 1)
    } else {
        return Ok(None);
    };

    let mut cursor = *i + 1 + tag_len;

    let argument_src = if chars.get(cursor) == Some(&'(') {
        match extract_group(chars, &mut cursor, '(', ')') {
            Some(inner) => inner,
            None => {
                return Err(interp.fatal(
                    Code::ModifierNotTerminated,
                    InterpreterErrorKind::UnterminatedModifier,
                    loc,
                    "modifier argument group not terminated",
                ));
            }
        }
    } else if chars.get(cursor) == Some(&'@') {
        match scan_whole_fraction(chars, &mut cursor) {
            Some(s) => s,
            None => {
                return Err(interp.fatal(
                    Code::ModifierNotTerminated,
                    InterpreterErrorKind::UnterminatedModifier,
                    loc,
                    "modifier fraction argument not terminated",
                ));
            }
        }
    } else {
        let item = extract_item(chars, &mut cursor, DEFAULT_TERMINATORS);
        if item.is_empty() {
            return Err(interp.fatal(
                Code::ModifierMissingArgument,
                InterpreterErrorKind::ModifierMissingArgument,
                loc,
                "modifier has no argument",
            ));
        }
        item
    };

    let child: ElementVec = interp.interpret_buffer(loc, &argument_src, false, false, depth + 1)?;
    *i = cursor;
    Ok(Some(Element::Modifier { kind, child }))
}

fn starts_with(chars: &[char], i: usize, pat: &str) -> bool {
    pat.chars().enumerate().all(|(k, c)| chars.get(i + k) == Some(&c))
}

/// Scan a `@...#` fraction kept whole as a single modifier argument,
/// returning the source verbatim (delimiters included) so the recursive
/// `interpret_buffer` call on it hits the fraction production itself.
fn scan_whole_fraction(chars: &[char], i: &mut usize) -> Option<String> {
    let span = scan_fraction_span(chars, *i)?;
    let content: String = chars[*i..span.end].iter().collect();
    *i = span.end;
    Some(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp() -> Interpreter {
        Interpreter::new(HashSet::new())
    }

    #[test]
    fn vector_over_next_item() {
        let chars: Vec<char> = "`Vx+1".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_modifier(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Modifier { kind, child } => {
                assert_eq!(kind, ModifierKind::OverArrowRight);
                assert_eq!(child.len(), 1);
            }
            _ => panic!(),
        }
        assert_eq!(i, 2);
    }

    #[test]
    fn bar_over_group() {
        let chars: Vec<char> = "`BAR(xy)z".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_modifier(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Modifier { kind, .. } => assert_eq!(kind, ModifierKind::OverBar),
            _ => panic!(),
        }
        assert_eq!(chars[i], 'z');
    }

    #[test]
    fn cj_is_also_over_bar() {
        let chars: Vec<char> = "`CJx".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_modifier(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Modifier { kind, .. } => assert_eq!(kind, ModifierKind::OverBar),
            _ => panic!(),
        }
    }

    #[test]
    fn hat_single_letter_form() {
        let chars: Vec<char> = "`Hx".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_modifier(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Modifier { kind, .. } => assert_eq!(kind, ModifierKind::OverHat),
            _ => panic!(),
        }
    }

    #[test]
    fn not_a_modifier_tag_defers() {
        let chars: Vec<char> = "`$5".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        assert!(try_modifier(&mut it, &loc, &chars, &mut i, 0).unwrap().is_none());
        assert_eq!(i, 0);
    }
}
