//! Exponent (`^`) and subscript (`_`, when not `_/` — the root prefix,
//! already claimed by the root production). Both take an argument of
//! `(...)`, `@...#`, or the next bare item.

use crate::diagnostics::Code;
use crate::element::{Element, ElementVec, SourceLocation};
use crate::error::{InterpreterError, InterpreterErrorKind};
use crate::interpreter::fraction::scan_fraction_span;
use crate::interpreter::{extract_group, extract_item, Interpreter, DEFAULT_TERMINATORS};

fn scan_argument(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    cursor: &mut usize,
    not_terminated: Code,
    not_terminated_kind: InterpreterErrorKind,
) -> Result<Option<String>, InterpreterError> {
    if chars.get(*cursor) == Some(&'(') {
        match extract_group(chars, cursor, '(', ')') {
            Some(inner) => Ok(Some(inner)),
            None => Err(interp.fatal(not_terminated, not_terminated_kind, loc, "argument group not terminated")),
        }
    } else if chars.get(*cursor) == Some(&'@') {
        match scan_fraction_span(chars, *cursor) {
            Some(span) => {
                let content: String = chars[*cursor..span.end].iter().collect();
                *cursor = span.end;
                Ok(Some(content))
            }
            None => Err(interp.fatal(not_terminated, not_terminated_kind, loc, "fraction argument not terminated")),
        }
    } else {
        let item = extract_item(chars, cursor, DEFAULT_TERMINATORS);
        if item.is_empty() {
            Ok(None)
        } else {
            Ok(Some(item))
        }
    }
}

pub(crate) fn try_exponent(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'^') {
        return Ok(None);
    }
    let mut cursor = *i + 1;
    let Some(argument_src) = scan_argument(interp, loc, chars, &mut cursor, Code::ExponentNotTerminated, InterpreterErrorKind::UnterminatedExponent)? else {
        return Err(interp.fatal(Code::ExponentNotTerminated, InterpreterErrorKind::UnterminatedExponent, loc, "exponent has no argument"));
    };
    let body: ElementVec = interp.interpret_buffer(loc, &argument_src, false, false, depth + 1)?;
    *i = cursor;
    Ok(Some(Element::Exponent(body)))
}

pub(crate) fn try_subscript(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'_') {
        return Ok(None);
    }
    let mut cursor = *i + 1;
    let Some(argument_src) = scan_argument(interp, loc, chars, &mut cursor, Code::SubscriptNotTerminated, InterpreterErrorKind::UnterminatedSubscript)? else {
        return Err(interp.fatal(Code::SubscriptNotTerminated, InterpreterErrorKind::UnterminatedSubscript, loc, "subscript has no argument"));
    };
    let body: ElementVec = interp.interpret_buffer(loc, &argument_src, false, false, depth + 1)?;
    *i = cursor;
    Ok(Some(Element::Subscript(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp() -> Interpreter {
        Interpreter::new(HashSet::new())
    }

    #[test]
    fn exponent_of_next_item() {
        let chars: Vec<char> = "^2x".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_exponent(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Exponent(body) => assert_eq!(body.len(), 1),
            _ => panic!(),
        }
        assert_eq!(chars[i], 'x');
    }

    #[test]
    fn exponent_of_grouped_argument() {
        let chars: Vec<char> = "^(n+1)".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_exponent(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Exponent(body) => assert_eq!(body.len(), 3),
            _ => panic!(),
        }
        assert_eq!(i, 6);
    }

    #[test]
    fn subscript_of_next_item() {
        let chars: Vec<char> = "_n+1".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_subscript(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Subscript(body) => assert_eq!(body.len(), 1),
            _ => panic!(),
        }
        assert_eq!(chars[i], '+');
    }

    #[test]
    fn unterminated_exponent_group_is_fatal() {
        let chars: Vec<char> = "^(n+1".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        assert!(try_exponent(&mut it, &loc, &chars, &mut i, 0).is_err());
    }
}
