//! Interpreter diagnostics: info/notice/warning/error messages tagged with
//! a source location. Diagnostics accumulate across an `interpret` call;
//! only a message in the `Error` category aborts interpretation.

use std::fmt;

use crate::element::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Info,
    Notice,
    Warning,
    Error,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Info => "info",
            Category::Notice => "notice",
            Category::Warning => "warning",
            Category::Error => "error",
        };
        f.write_str(s)
    }
}

/// The enumerated set of diagnostic codes the interpreter can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Code {
    NestedTextMode,
    NestedMathMode,
    SuspectMathInText,
    SuspectTextInMath,
    SuspectFraction,
    UnknownGreek,
    FractionNotTerminated,
    ExponentNotTerminated,
    SubscriptNotTerminated,
    RootIndexNotTerminated,
    RootNotTerminated,
    ModifierMissingArgument,
    ModifierNotTerminated,
    UnknownCommand,
    RecursionLimitExceeded,
}

impl Code {
    /// The category a given code always belongs to. A handful of codes
    /// (e.g. `UnknownGreek`) are always warnings; others are always fatal.
    pub fn default_category(self) -> Category {
        match self {
            Code::NestedTextMode
            | Code::NestedMathMode
            | Code::SuspectMathInText
            | Code::SuspectTextInMath
            | Code::SuspectFraction
            | Code::UnknownGreek => Category::Warning,
            Code::FractionNotTerminated
            | Code::ExponentNotTerminated
            | Code::SubscriptNotTerminated
            | Code::RootIndexNotTerminated
            | Code::RootNotTerminated
            | Code::ModifierMissingArgument
            | Code::ModifierNotTerminated
            | Code::UnknownCommand
            | Code::RecursionLimitExceeded => Category::Error,
        }
    }
}

/// A single diagnostic produced during interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub category: Category,
    pub code: Code,
    pub location: SourceLocation,
    pub message: Box<str>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({}): {}", self.location, self.category, self.code_name(), self.message)
    }
}

impl Diagnostic {
    pub fn new(code: Code, location: SourceLocation, message: impl Into<Box<str>>) -> Self {
        Self { category: code.default_category(), code, location, message: message.into() }
    }

    pub fn code_name(&self) -> &'static str {
        match self.code {
            Code::NestedTextMode => "nested-text-mode",
            Code::NestedMathMode => "nested-math-mode",
            Code::SuspectMathInText => "suspect-math-in-text",
            Code::SuspectTextInMath => "suspect-text-in-math",
            Code::SuspectFraction => "suspect-fraction",
            Code::UnknownGreek => "unknown-greek",
            Code::FractionNotTerminated => "fraction-not-terminated",
            Code::ExponentNotTerminated => "exponent-not-terminated",
            Code::SubscriptNotTerminated => "subscript-not-terminated",
            Code::RootIndexNotTerminated => "root-index-not-terminated",
            Code::RootNotTerminated => "root-not-terminated",
            Code::ModifierMissingArgument => "modifier-missing-argument",
            Code::ModifierNotTerminated => "modifier-not-terminated",
            Code::UnknownCommand => "unknown-command",
            Code::RecursionLimitExceeded => "recursion-limit-exceeded",
        }
    }
}

/// An append-only collection of diagnostics, in production order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.category == Category::Error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
