//! Heuristic check: a text-mode run that looks like it might actually be
//! math gets a warning, not a hard error — the author may simply be
//! discussing symbols in prose.

use crate::diagnostics::Code;
use crate::element::SourceLocation;
use crate::interpreter::Interpreter;

pub(crate) fn sniff(interp: &mut Interpreter, loc: &SourceLocation, text: &str) {
    let mut categories = Vec::new();

    if text.contains('@') && text.contains('~') && text.contains('#') {
        categories.push("fraction-like punctuation (@, ~, #)");
    }
    if text.contains('<') || text.contains('>') || text.contains('=') {
        categories.push("comparator");
    }
    if text.contains("_/") {
        categories.push("root prefix (_/)");
    }
    if text.contains("/_") {
        categories.push("reversed root prefix (/_)");
    }
    if text.contains('_') {
        categories.push("subscript marker (_)");
    }
    if text.contains('^') {
        categories.push("exponent marker (^)");
    }
    if text.contains('|') {
        categories.push("pipe (|)");
    }

    if !categories.is_empty() {
        interp.warn(
            Code::SuspectMathInText,
            loc,
            format!("text block looks like it might contain math: {}", categories.join(", ")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn interp() -> Interpreter {
        Interpreter::new(HashSet::new())
    }

    #[test]
    fn plain_prose_is_silent() {
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        sniff(&mut it, &loc, "just ordinary words here");
        assert!(it.diagnostics_for_test().is_empty());
    }

    #[test]
    fn comparator_triggers_warning() {
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        sniff(&mut it, &loc, "if x = y then");
        assert_eq!(it.diagnostics_for_test().len(), 1);
    }

    #[test]
    fn fraction_triplet_triggers_warning() {
        let mut it = interp();
        let loc = SourceLocation::new("t", 1, 1);
        sniff(&mut it, &loc, "weird @1~2# thing");
        assert_eq!(it.diagnostics_for_test().len(), 1);
    }
}
