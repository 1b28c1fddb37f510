//! The document element model.
//!
//! A [`Document`] is a flat [`Vec<Element>`]; composite elements (fractions,
//! roots, groups, ...) own their own child sequences by value. There is no
//! shared ownership anywhere in the tree: every element has exactly one
//! parent, so a `Vec<Element>` per composite is sufficient and nothing here
//! needs reference counting or arena allocation.

use std::fmt;

/// One logical source line, as produced by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub filename: Box<str>,
    pub line1: u32,
    pub line2: u32,
}

impl SourceLocation {
    pub fn new(filename: impl Into<Box<str>>, line1: u32, line2: u32) -> Self {
        Self { filename: filename.into(), line1, line2 }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line1 == self.line2 {
            write!(f, "{}:{}", self.filename, self.line1)
        } else {
            write!(f, "{}:{}-{}", self.filename, self.line1, self.line2)
        }
    }
}

/// A sequence of elements; the unit of recursion for composite children.
pub type ElementVec = Vec<Element>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeMarkerKind {
    /// A whole line consisting solely of `$$` or `&&`.
    Block,
    /// A `$` or `&` appearing mid-line.
    Segment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupKind {
    Parens,
    Brackets,
    Braces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparatorKind {
    Lt,
    Gt,
    Eq,
    Approx,
    Neq,
    Lte,
    Gte,
}

/// The 24 canonical Greek letters, lower- and uppercase, keyed by the
/// single-letter MathText source code (`%a` .. `%w`, `%A` .. `%W`).
///
/// Note the historical oddity preserved from the original renderer: the
/// source code `q` maps to `Tau`, not `Theta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreekLetter {
    Alpha, Beta, Gamma, Delta, Epsilon, Zeta, Eta, Theta, Iota, Kappa, Lambda,
    Mu, Nu, Xi, Omicron, Pi, Rho, Sigma, Tau, Upsilon, Phi, Chi, Psi, Omega,
    UpperAlpha, UpperBeta, UpperGamma, UpperDelta, UpperEpsilon, UpperZeta,
    UpperEta, UpperTheta, UpperIota, UpperKappa, UpperLambda, UpperMu,
    UpperNu, UpperXi, UpperOmicron, UpperPi, UpperRho, UpperSigma, UpperTau,
    UpperUpsilon, UpperPhi, UpperChi, UpperPsi, UpperOmega,
}

impl GreekLetter {
    pub fn is_upper(self) -> bool {
        matches!(
            self,
            GreekLetter::UpperAlpha
                | GreekLetter::UpperBeta
                | GreekLetter::UpperGamma
                | GreekLetter::UpperDelta
                | GreekLetter::UpperEpsilon
                | GreekLetter::UpperZeta
                | GreekLetter::UpperEta
                | GreekLetter::UpperTheta
                | GreekLetter::UpperIota
                | GreekLetter::UpperKappa
                | GreekLetter::UpperLambda
                | GreekLetter::UpperMu
                | GreekLetter::UpperNu
                | GreekLetter::UpperXi
                | GreekLetter::UpperOmicron
                | GreekLetter::UpperPi
                | GreekLetter::UpperRho
                | GreekLetter::UpperSigma
                | GreekLetter::UpperTau
                | GreekLetter::UpperUpsilon
                | GreekLetter::UpperPhi
                | GreekLetter::UpperChi
                | GreekLetter::UpperPsi
                | GreekLetter::UpperOmega
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Comma,
    Period,
    Percent,
    Factorial,
    Therefore,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Cents,
    Euro,
    Franc,
    Pound,
    Dollar,
    Yen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    OverBar,
    OverHat,
    OverArrowRight,
}

/// A decimal number as parsed, still carrying its original digit groups so
/// that the renderers can each decide how to present thousands separators.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Number {
    pub sign: Sign,
    /// Digits (and internal thousands separators) before the decimal point.
    /// May be empty for a pure-fractional number (`.5`).
    pub whole: Box<str>,
    /// Digits (and internal thousands separators) after the decimal point.
    /// `None` when there is no decimal part at all.
    pub fraction: Option<Box<str>>,
}

impl Number {
    /// Render this number in "standard notation", i.e. the plain decimal
    /// string a re-parse of which must reproduce an equal `Number`.
    pub fn standard_notation(&self) -> String {
        let mut out = String::new();
        if self.sign == Sign::Negative {
            out.push('-');
        }
        out.push_str(&self.whole);
        if let Some(frac) = &self.fraction {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

/// One node of the flat, closed-sum-type document element tree.
///
/// Composite variants own their children by value; there is no sharing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    /// Diagnostic breadcrumb copied verbatim from the source loader.
    SourceLine { location: SourceLocation, text: Box<str> },
    /// A `$$name params...` directive line.
    Command { name: Box<str>, parameters: Box<str> },
    MathModeMarker(ModeMarkerKind),
    TextModeMarker(ModeMarkerKind),
    LineBreak,
    TextBlock(Box<str>),
    MathBlock(Box<str>),
    /// A question/exercise number at the start of a line, in math mode.
    ItemNumber(Box<str>),
    Number(Number),
    Group { kind: GroupKind, children: ElementVec },
    Operator(OperatorKind),
    Comparator(ComparatorKind),
    GreekLetter(GreekLetter),
    Symbol(SymbolKind),
    Modifier { kind: ModifierKind, child: ElementVec },
    /// Both `index` and `argument` are child sequences; `index` may be empty
    /// (plain square root).
    Root { index: ElementVec, argument: ElementVec },
    Summation { lower: ElementVec, upper: ElementVec },
    Fraction { numerator: ElementVec, denominator: ElementVec },
    Exponent(ElementVec),
    Subscript(ElementVec),
}

/// A complete, immutable document: a flat sequence of elements in source
/// order. Built once by the interpreter and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub elements: ElementVec,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }
}
