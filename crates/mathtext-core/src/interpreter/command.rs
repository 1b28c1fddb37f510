//! Command directives: `$$` at the start of a line, only ever tried on
//! the very first iteration of a top-level line, never inside a
//! recursively-parsed sub-buffer.

use crate::diagnostics::Code;
use crate::element::{Element, SourceLocation};
use crate::error::{InterpreterError, InterpreterErrorKind};
use crate::interpreter::Interpreter;

pub(crate) fn parse_command(
    interp: &mut Interpreter,
    loc: &SourceLocation,
    chars: &[char],
    i: &mut usize,
) -> Result<Option<Element>, InterpreterError> {
    if chars.get(*i) != Some(&'$') || chars.get(*i + 1) != Some(&'$') {
        return Ok(None);
    }
    let mut cursor = *i + 2;

    let sign_param = match chars.get(cursor) {
        Some('+') => {
            cursor += 1;
            Some("true ")
        }
        Some('-') => {
            cursor += 1;
            Some("false ")
        }
        _ => None,
    };

    let name_start = cursor;
    while chars.get(cursor).is_some_and(|c| c.is_ascii_alphabetic()) {
        cursor += 1;
    }
    if cursor == name_start {
        return Ok(None);
    }
    let name: String = chars[name_start..cursor].iter().collect();

    if !interp.is_registered_command(&name) {
        return Err(interp.fatal(
            Code::UnknownCommand,
            InterpreterErrorKind::UnknownCommand(name.clone().into()),
            loc,
            format!("unknown command \"$${name}\""),
        ));
    }

    let remainder: String = chars[cursor..].iter().collect();
    let remainder = remainder.trim();
    let mut parameters = String::new();
    if let Some(sign) = sign_param {
        parameters.push_str(sign);
    }
    parameters.push_str(remainder);

    *i = chars.len();
    Ok(Some(Element::Command { name: name.into(), parameters: parameters.into() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp(commands: &[&str]) -> Interpreter {
        Interpreter::new(commands.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_command() {
        let chars: Vec<char> = "$$NoBracketSizing".chars().collect();
        let mut i = 0;
        let mut it = interp(&["NoBracketSizing"]);
        let loc = SourceLocation::new("t", 1, 1);
        let el = parse_command(&mut it, &loc, &chars, &mut i).unwrap().unwrap();
        match el {
            Element::Command { name, parameters } => {
                assert_eq!(&*name, "NoBracketSizing");
                assert_eq!(&*parameters, "");
            }
            _ => panic!(),
        }
    }

    #[test]
    fn sign_prefix_becomes_parameter() {
        let chars: Vec<char> = "$$+SpaceUEBOperators".chars().collect();
        let mut i = 0;
        let mut it = interp(&["SpaceUEBOperators"]);
        let loc = SourceLocation::new("t", 1, 1);
        let el = parse_command(&mut it, &loc, &chars, &mut i).unwrap().unwrap();
        match el {
            Element::Command { parameters, .. } => assert_eq!(&*parameters, "true "),
            _ => panic!(),
        }
    }

    #[test]
    fn remainder_is_appended_after_sign() {
        let chars: Vec<char> = "$$-Foo  bar baz  ".chars().collect();
        let mut i = 0;
        let mut it = interp(&["Foo"]);
        let loc = SourceLocation::new("t", 1, 1);
        let el = parse_command(&mut it, &loc, &chars, &mut i).unwrap().unwrap();
        match el {
            Element::Command { parameters, .. } => assert_eq!(&*parameters, "false bar baz"),
            _ => panic!(),
        }
    }

    #[test]
    fn unknown_command_is_fatal() {
        let chars: Vec<char> = "$$Bogus".chars().collect();
        let mut i = 0;
        let mut it = interp(&[]);
        let loc = SourceLocation::new("t", 1, 1);
        assert!(parse_command(&mut it, &loc, &chars, &mut i).is_err());
    }
}
