//! Fractions: `@numerator~denominator#`, with nested fractions counted so
//! an inner `@...#` pair doesn't prematurely close the outer one, and the
//! two-character escapes `\#`, `\@`, `\~`, `~=` skipped over rather than
//! treated as structural.

use crate::diagnostics::Code;
use crate::element::{Element, SourceLocation};
use crate::error::{InterpreterError, InterpreterErrorKind};
use crate::interpreter::Interpreter;

/// The numerator and denominator source text of one `@...#` span, plus the
/// index just past the closing `#`.
pub(crate) struct FractionSpan {
    pub numerator: String,
    pub denominator: String,
    pub end: usize,
}

/// Scan a fraction span starting at `chars[start] == '@'`. Returns `None`
/// if the matching `#` is never found (EOF reached first).
pub(crate) fn scan_fraction_span(chars: &[char], start: usize) -> Option<FractionSpan> {
    debug_assert_eq!(chars[start], '@');
    let mut depth = 1u32;
    let mut pos = start + 1;
    let mut divider: Option<usize> = None;
    let mut content = String::new();

    while pos < chars.len() {
        if pos + 1 < chars.len() {
            let pair = (chars[pos], chars[pos + 1]);
            if pair == ('\\', '#') || pair == ('\\', '@') || pair == ('\\', '~') || pair == ('~', '=') {
                content.push(chars[pos]);
                content.push(chars[pos + 1]);
                pos += 2;
                continue;
            }
        }

        match chars[pos] {
            '@' => {
                depth += 1;
                content.push('@');
                pos += 1;
            }
            '#' => {
                depth -= 1;
                if depth == 0 {
                    let (numerator, denominator) = split_at_divider(&content, divider);
                    return Some(FractionSpan { numerator, denominator, end: pos + 1 });
                }
                content.push('#');
                pos += 1;
            }
            '~' if depth == 1 && divider.is_none() => {
                divider = Some(content.chars().count());
                pos += 1;
            }
            c => {
                content.push(c);
                pos += 1;
            }
        }
    }

    None
}

fn split_at_divider(content: &str, divider: Option<usize>) -> (String, String) {
    match divider {
        Some(at) => {
            let numerator: String = content.chars().take(at).collect();
            let denominator: String = content.chars().skip(at).collect();
            (numerator, denominator)
        }
        None => (content.to_string(), String::new()),
    }
}

pub(crate) fn try_fraction(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
    depth: u32,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'@') {
        return Ok(None);
    }

    let span = scan_fraction_span(chars, *i).ok_or_else(|| {
        interp.fatal(
            Code::FractionNotTerminated,
            InterpreterErrorKind::UnterminatedFraction,
            loc,
            "fraction not terminated, expected '#'",
        )
    })?;

    let numerator = interp.interpret_buffer(loc, &span.numerator, false, false, depth + 1)?;
    let denominator = interp.interpret_buffer(loc, &span.denominator, false, false, depth + 1)?;
    *i = span.end;
    Ok(Some(Element::Fraction { numerator, denominator }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp() -> Interpreter {
        Interpreter::new(HashSet::new())
    }

    #[test]
    fn simple_fraction() {
        let chars: Vec<char> = "@1~2#x".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_fraction(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Fraction { numerator, denominator } => {
                assert_eq!(numerator.len(), 1);
                assert_eq!(denominator.len(), 1);
            }
            _ => panic!(),
        }
        assert_eq!(chars[i], 'x');
    }

    #[test]
    fn nested_fraction_in_denominator() {
        let chars: Vec<char> = "@1~2@3~4##".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_fraction(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            Element::Fraction { denominator, .. } => {
                // "2" then the nested fraction "3~4"
                assert_eq!(denominator.len(), 2);
                match &denominator[1] {
                    Element::Fraction { .. } => {}
                    _ => panic!("expected nested fraction"),
                }
            }
            _ => panic!(),
        }
        assert_eq!(i, chars.len());
    }

    #[test]
    fn unterminated_fraction_is_fatal() {
        let chars: Vec<char> = "@1~2".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        assert!(try_fraction(&mut it, &loc, &chars, &mut i, 0).is_err());
    }

    #[test]
    fn escaped_hash_is_not_structural() {
        let chars: Vec<char> = "@1\\#2~3#".chars().collect();
        let mut i = 0;
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        let el = try_fraction(&mut it, &loc, &chars, &mut i, 0).unwrap().unwrap();
        match el {
            // "1", "\#" (caught together as one text run), "2"
            Element::Fraction { numerator, .. } => assert_eq!(numerator.len(), 3),
            _ => panic!(),
        }
    }
}
