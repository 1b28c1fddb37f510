//! Roots: `_/` optionally followed by an index (`[...]` or a single
//! word character), then an argument (`(...)`, `@...#`, or the next item).

use crate::diagnostics::Code;
use crate::element::{Element, SourceLocation};
use crate::error::{InterpreterError, InterpreterErrorKind};
use crate::interpreter::fraction::scan_fraction_span;
use crate::interpreter::{extract_group, extract_item, Interpreter, DEFAULT_TERMINATORS};

pub(crate) fn try_root(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'_') || chars.get(*i + 1) != Some(&'/') {
        return Ok(None);
    }
    let mut cursor = *i + 2;

    let index_src = if chars.get(cursor) == Some(&'[') {
        match extract_group(chars, &mut cursor, '[', ']') {
            Some(inner) => inner,
            None => {
                return Err(interp.fatal(
                    Code::RootIndexNotTerminated,
                    InterpreterErrorKind::UnterminatedRootIndex,
                    loc,
                    "root index not terminated, expected ']'",
                ));
            }
        }
    } else if chars.get(cursor).is_some_and(|c| c.is_alphanumeric()) {
        let c = chars[cursor];
        cursor += 1;
        c.to_string()
    } else {
        String::new()
    };

    let argument_src = if chars.get(cursor) == Some(&'(') {
        match extract_group(chars, &mut cursor, '(', ')') {
            Some(inner) => inner,
            None => {
                return Err(interp.fatal(
                    Code::RootNotTerminated,
                    InterpreterErrorKind::UnterminatedRoot,
                    loc,
                    "root argument not terminated, expected ')'",
                ));
            }
        }
    } else if chars.get(cursor) == Some(&'@') {
        match scan_fraction_span(chars, cursor) {
            Some(span) => {
                let content: String = chars[cursor..span.end].iter().collect();
                cursor = span.end;
                content
            }
            None => {
                return Err(interp.fatal(
                    Code::RootNotTerminated,
                    InterpreterErrorKind::UnterminatedRoot,
                    loc,
                    "root argument fraction not terminated",
                ));
            }
        }
    } else {
        let item = extract_item(chars, &mut cursor, DEFAULT_TERMINATORS);
        if item.is_empty() {
            return Err(interp.fatal(
                Code::RootNotTerminated,
                InterpreterErrorKind::UnterminatedRoot,
                loc,
                "root has no argument",
            ));
        }
        item
    };

    let index = interp.interpret_buffer(loc, &index_src, false, false, depth + 1)?;
    let argument = interp.interpret_buffer(loc, &argument_src, false, false, depth + 1)?;
    *i = cursor;
    Ok(Some(Element::Root { index, argument }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp() -> Interpreter {
        Interpreter::new(HashSet::new())
    }

    #[test]
    fn plain_square_root_of_next_item() {
        let chars: Vec<char> = "_/9".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_root(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Root { index, argument } => {
                assert!(index.is_empty());
                assert_eq!(argument.len(), 1);
            }
            _ => panic!(),
        }
        assert_eq!(i, 3);
    }

    #[test]
    fn bracketed_index() {
        let chars: Vec<char> = "_/[3]8".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_root(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Root { index, .. } => assert_eq!(index.len(), 1),
            _ => panic!(),
        }
        assert_eq!(i, 6);
    }

    #[test]
    fn single_char_index() {
        let chars: Vec<char> = "_/n8".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_root(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Root { index, .. } => assert_eq!(index.len(), 1),
            _ => panic!(),
        }
    }

    #[test]
    fn bare_underscore_is_not_a_root() {
        let chars: Vec<char> = "_8".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        assert!(try_root(&mut it, &loc, &chars, &mut i, 0).unwrap().is_none());
        assert_eq!(i, 0);
    }

    #[test]
    fn grouped_argument() {
        let chars: Vec<char> = "_/(x+y)z".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_root(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Root { argument, .. } => assert_eq!(argument.len(), 3),
            _ => panic!(),
        }
        assert_eq!(chars[i], 'z');
    }
}
