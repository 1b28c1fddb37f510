//! Groups: `(...)`, `[...]`, `{...}`, recursively interpreted as a nested
//! math-mode buffer.

use crate::element::{Element, GroupKind, SourceLocation};
use crate::error::InterpreterError;
use crate::interpreter::{extract_group, Interpreter};

pub(crate) fn try_group(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    let (kind, open, close) = match chars.get(*i) {
        Some('(') => (GroupKind::Parens, '(', ')'),
        Some('[') => (GroupKind::Brackets, '[', ']'),
        Some('{') => (GroupKind::Braces, '{', '}'),
        _ => return Ok(None),
    };

    let mut cursor = *i;
    let Some(inner) = extract_group(chars, &mut cursor, open, close) else {
        return Ok(None);
    };

    let children = interp.interpret_buffer(loc, &inner, false, false, depth + 1)?;
    *i = cursor;
    Ok(Some(Element::Group { kind, children }))
}
