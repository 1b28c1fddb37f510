//! Miscellaneous symbols: punctuation, grouping characters not consumed as
//! a `Group`, and backtick currency escapes. Longer symbols are matched
//! before shorter ones.

use crate::element::{Element, SymbolKind};

pub(crate) fn try_symbol(chars: &[char], i: &mut usize) -> Option<Element> {
    if starts_with(chars, *i, "%%") {
        *i += 2;
        return Some(Element::Symbol(SymbolKind::Percent));
    }
    if starts_with(chars, *i, "/\\") {
        *i += 2;
        return Some(Element::Symbol(SymbolKind::Therefore));
    }

    if chars.get(*i) == Some(&'`') {
        let kind = match chars.get(*i + 1) {
            Some('C') => Some(SymbolKind::Cents),
            Some('E') => Some(SymbolKind::Euro),
            Some('F') => Some(SymbolKind::Franc),
            Some('P') => Some(SymbolKind::Pound),
            Some('$') => Some(SymbolKind::Dollar),
            Some('Y') => Some(SymbolKind::Yen),
            _ => None,
        };
        if let Some(kind) = kind {
            *i += 2;
            return Some(Element::Symbol(kind));
        }
    }

    let kind = match chars.get(*i)? {
        ',' => SymbolKind::Comma,
        '.' => SymbolKind::Period,
        '!' => SymbolKind::Factorial,
        '(' => SymbolKind::LeftParen,
        ')' => SymbolKind::RightParen,
        '[' => SymbolKind::LeftBracket,
        ']' => SymbolKind::RightBracket,
        '{' => SymbolKind::LeftBrace,
        '}' => SymbolKind::RightBrace,
        _ => return None,
    };
    *i += 1;
    Some(Element::Symbol(kind))
}

fn starts_with(chars: &[char], i: usize, pat: &str) -> bool {
    pat.chars().enumerate().all(|(k, c)| chars.get(i + k) == Some(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_currency_escape() {
        let chars: Vec<char> = "`$5".chars().collect();
        let mut i = 0;
        assert_eq!(try_symbol(&chars, &mut i), Some(Element::Symbol(SymbolKind::Dollar)));
        assert_eq!(i, 2);
    }

    #[test]
    fn percent_percent() {
        let chars: Vec<char> = "%%".chars().collect();
        let mut i = 0;
        assert_eq!(try_symbol(&chars, &mut i), Some(Element::Symbol(SymbolKind::Percent)));
    }

    #[test]
    fn lone_paren_as_symbol() {
        let chars: Vec<char> = ")".chars().collect();
        let mut i = 0;
        assert_eq!(try_symbol(&chars, &mut i), Some(Element::Symbol(SymbolKind::RightParen)));
    }
}
