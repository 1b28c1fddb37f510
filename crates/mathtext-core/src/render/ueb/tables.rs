//! Braille cell constants, expressed directly as the braille-ASCII
//! characters the original project's `BD_*` dot-pattern macros expand to
//! (see `liblouis-mt.h`), composed into the same named `UEB_*` constants
//! `UEBRenderer.h` declares.

use crate::element::{ComparatorKind, GreekLetter, ModifierKind, OperatorKind, SymbolKind};

pub(crate) const MATH_BLOCK_BEGIN: &str = "<|@M@|>";
pub(crate) const TEXT_BLOCK_BEGIN: &str = "<|@T@|>";

pub(crate) const WORDWRAP_PRI1: &str = "<|@1@|>";
pub(crate) const WORDWRAP_PRI2: &str = "<|@2@|>";
pub(crate) const WORDWRAP_PRI3: &str = "<|@3@|>";

pub(crate) const CAPITAL_SIGN: &str = ",";
pub(crate) const GROUP_BEGIN: &str = "<";
pub(crate) const GROUP_END: &str = ">";
pub(crate) const NUMBER_SIGN: &str = "#";
pub(crate) const NUMERIC_SPACE: &str = "\"";
pub(crate) const COMMA: &str = "1";
pub(crate) const PERIOD: &str = "4";
pub(crate) const G1: &str = ";";
pub(crate) const LEVEL_UP: &str = "9";
pub(crate) const LEVEL_DOWN: &str = "5";

pub(crate) const LEFT_BRACE: &str = "_<";
pub(crate) const LEFT_BRACKET: &str = ".<";
pub(crate) const LEFT_PAREN: &str = "\"<";
pub(crate) const PERCENT: &str = ".0";
pub(crate) const RIGHT_BRACE: &str = "_>";
pub(crate) const RIGHT_BRACKET: &str = ".>";
pub(crate) const RIGHT_PAREN: &str = "\">";

pub(crate) const APPROX_EQUAL: &str = "_9";
pub(crate) const DIV_SIGN: &str = "\"/";
pub(crate) const EQUAL_SIGN: &str = "\"7";
pub(crate) const FACTORIAL: &str = "6";
pub(crate) const FRAC_BEGIN: &str = "(";
pub(crate) const FRAC_DIVIDER: &str = "./";
pub(crate) const FRAC_END: &str = ")";
pub(crate) const GREATER_THAN: &str = "@>";
pub(crate) const GREATER_THAN_EQ: &str = "_@>";
pub(crate) const LESS_THAN: &str = "@<";
pub(crate) const LESS_THAN_EQ: &str = "_@<";
pub(crate) const MINUS_SIGN: &str = "\"-";
pub(crate) const PLUS_SIGN: &str = "\"6";
pub(crate) const ROOT_BEGIN: &str = "%";
pub(crate) const ROOT_END: &str = "+";
pub(crate) const SIMPLE_FRAC_DIVIDER: &str = "/";
pub(crate) const THEREFORE: &str = ",*";
pub(crate) const TIMES_SIGN: &str = "\"8";
pub(crate) const UNEQUAL_SIGN: &str = "\"7@:";

pub(crate) const OVER_ARROW_RIGHT: &str = "^:";
pub(crate) const OVER_BAR: &str = ":";
pub(crate) const OVER_HAT: &str = "\":";

pub(crate) const GREEK_SIGN: &str = ".";

pub(crate) const CURRENCY_CENTS: &str = "@C";
pub(crate) const CURRENCY_EURO: &str = "@E";
pub(crate) const CURRENCY_FRANC: &str = "@F";
pub(crate) const CURRENCY_POUND: &str = "@L";
pub(crate) const CURRENCY_DOLLAR: &str = "@S";
pub(crate) const CURRENCY_YEN: &str = "@Y";

/// Digit-to-braille-cell table: `0 -> J, 1 -> A, ..., 9 -> I`.
pub(crate) const NUMERIC_DIGITS: &str = "JABCDEFGHI";

pub(crate) fn digit_cell(d: u8) -> char {
    NUMERIC_DIGITS.as_bytes()[d as usize] as char
}

pub(crate) fn operator_braille(op: OperatorKind, spaced: bool) -> String {
    let cell = match op {
        OperatorKind::Add => PLUS_SIGN,
        OperatorKind::Sub => MINUS_SIGN,
        OperatorKind::Mul => TIMES_SIGN,
        OperatorKind::Div => DIV_SIGN,
    };
    if spaced {
        format!(" {cell} ")
    } else {
        cell.to_string()
    }
}

pub(crate) fn comparator_braille(cmp: ComparatorKind) -> &'static str {
    match cmp {
        ComparatorKind::Lt => LESS_THAN,
        ComparatorKind::Gt => GREATER_THAN,
        ComparatorKind::Eq => EQUAL_SIGN,
        ComparatorKind::Approx => APPROX_EQUAL,
        ComparatorKind::Neq => UNEQUAL_SIGN,
        ComparatorKind::Gte => GREATER_THAN_EQ,
        ComparatorKind::Lte => LESS_THAN_EQ,
    }
}

pub(crate) fn symbol_braille(kind: SymbolKind) -> String {
    let cell = match kind {
        SymbolKind::Comma => COMMA,
        SymbolKind::Period => PERIOD,
        SymbolKind::Percent => PERCENT,
        SymbolKind::Factorial => FACTORIAL,
        SymbolKind::Therefore => THEREFORE,
        SymbolKind::LeftParen => LEFT_PAREN,
        SymbolKind::RightParen => RIGHT_PAREN,
        SymbolKind::LeftBracket => LEFT_BRACKET,
        SymbolKind::RightBracket => RIGHT_BRACKET,
        SymbolKind::LeftBrace => LEFT_BRACE,
        SymbolKind::RightBrace => RIGHT_BRACE,
        SymbolKind::Cents => CURRENCY_CENTS,
        SymbolKind::Euro => CURRENCY_EURO,
        SymbolKind::Franc => CURRENCY_FRANC,
        SymbolKind::Pound => CURRENCY_POUND,
        SymbolKind::Dollar => CURRENCY_DOLLAR,
        SymbolKind::Yen => CURRENCY_YEN,
    };
    cell.to_string()
}

pub(crate) fn modifier_braille(kind: ModifierKind) -> &'static str {
    match kind {
        ModifierKind::OverArrowRight => OVER_ARROW_RIGHT,
        ModifierKind::OverBar => OVER_BAR,
        ModifierKind::OverHat => OVER_HAT,
    }
}

/// One-letter braille cell for a Greek letter, without the leading Greek
/// sign or capital sign (the caller prepends those).
fn greek_letter_cell(letter: GreekLetter) -> &'static str {
    use GreekLetter::*;
    match letter {
        Alpha | UpperAlpha => "A",
        Beta | UpperBeta => "B",
        Gamma | UpperGamma => "G",
        Delta | UpperDelta => "D",
        Epsilon | UpperEpsilon => "E",
        Zeta | UpperZeta => "Z",
        Eta | UpperEta => ":",
        Theta | UpperTheta => "?",
        Iota | UpperIota => "I",
        Kappa | UpperKappa => "K",
        Lambda | UpperLambda => "L",
        Mu | UpperMu => "M",
        Nu | UpperNu => "N",
        Xi | UpperXi => "X",
        Omicron | UpperOmicron => "O",
        Pi | UpperPi => "P",
        Rho | UpperRho => "R",
        Sigma | UpperSigma => "S",
        Tau | UpperTau => "T",
        Upsilon | UpperUpsilon => "U",
        Phi | UpperPhi => "F",
        Chi | UpperChi => "&",
        Psi | UpperPsi => "Y",
        Omega | UpperOmega => "W",
    }
}

pub(crate) fn greek_braille(letter: GreekLetter) -> String {
    if letter.is_upper() {
        format!("{GREEK_SIGN}{CAPITAL_SIGN}{}", greek_letter_cell(letter))
    } else {
        format!("{GREEK_SIGN}{}", greek_letter_cell(letter))
    }
}
