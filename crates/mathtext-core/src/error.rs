//! Typed error values: filename, line, and include chain carried as plain
//! fields rather than loosely-typed exception payloads.

use std::path::PathBuf;

use strum_macros::IntoStaticStr;

use crate::diagnostics::Diagnostics;

/// Errors raised by the source loader.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("could not open \"{}\": {source}", path.display())]
    Open { path: PathBuf, #[source] source: std::io::Error },

    #[error("could not read \"{}\": {source}", path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },

    #[error("cannot nest #include more than 5 levels deep (at \"{}\" line {line})", path.display())]
    IncludeTooDeep { path: PathBuf, line: u32 },
}

/// A `MathTextError` decorated with one more level of "included by"
/// context. Propagating an include error back up through N nested
/// `#include`s produces N nested wrappers, one per level, matching the
/// original's chain-of-inclusion message rewriting at every level the
/// error propagates through.
#[derive(Debug, thiserror::Error)]
#[error("{inner} (included by \"{including_file}\" at line {line})")]
pub struct IncludeChainError {
    #[source]
    inner: Box<MathTextError>,
    including_file: String,
    line: u32,
}

/// Errors raised by the interpreter. These always accompany an `Error`
/// diagnostic already recorded in the `Diagnostics` list.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InterpreterErrorKind {
    #[error("unterminated fraction")]
    UnterminatedFraction,
    #[error("unterminated exponent")]
    UnterminatedExponent,
    #[error("unterminated subscript")]
    UnterminatedSubscript,
    #[error("unterminated root index")]
    UnterminatedRootIndex,
    #[error("unterminated root argument")]
    UnterminatedRoot,
    #[error("modifier missing argument")]
    ModifierMissingArgument,
    #[error("unterminated modifier argument")]
    UnterminatedModifier,
    #[error("unknown command \"{0}\"")]
    UnknownCommand(Box<str>),
    #[error("recursion depth limit exceeded")]
    RecursionLimitExceeded,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} at {filename}:{line}")]
pub struct InterpreterError {
    pub kind: InterpreterErrorKind,
    pub filename: Box<str>,
    pub line: u32,
}

/// Tokens naming the place a render error was detected, used only for
/// error messages (not exhaustive dispatch, which the closed `Element`
/// enum makes unnecessary).
#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum RenderStage {
    #[strum(serialize = "braille translation")]
    BrailleTranslation,
    #[strum(serialize = "text chunk")]
    TextChunk,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("braille translation library failure: {0}")]
    BrailleTranslation(String),
    #[error("text chunk of {len} bytes exceeds the translation buffer ({max} bytes)")]
    ChunkTooLarge { len: usize, max: usize },
}

/// Errors raised by a [`crate::braille::BrailleTranslator`], kept separate
/// from [`RenderError`] since the adapter has no notion of elements or
/// rendering state — only of a string in and a string (or failure) out.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrailleError {
    #[error("chunk of {len} bytes exceeds the translation buffer ({max} bytes)")]
    ChunkTooLarge { len: usize, max: usize },
    #[error("liblouis translation failed (status {0})")]
    TranslationFailed(i32),
    #[error("could not set liblouis data path \"{path}\"")]
    DataPath { path: String },
}

impl From<BrailleError> for RenderError {
    fn from(err: BrailleError) -> Self {
        match err {
            BrailleError::ChunkTooLarge { len, max } => RenderError::ChunkTooLarge { len, max },
            other => RenderError::BrailleTranslation(other.to_string()),
        }
    }
}

/// The top-level error type for a `load` + `interpret` + `render` pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MathTextError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    IncludeChain(#[from] IncludeChainError),
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl MathTextError {
    /// Decorate this error with the fact that it was reached via an
    /// `#include` directive.
    pub fn included_by(self, including_file: &str, line: u32) -> MathTextError {
        MathTextError::IncludeChain(IncludeChainError {
            inner: Box::new(self),
            including_file: including_file.to_string(),
            line,
        })
    }
}

/// Result of an `interpret` call: either a complete document (with any
/// accumulated warnings/notices) or a fatal error plus the diagnostics
/// produced before the abort.
pub struct InterpretOutcome<T> {
    pub value: Result<T, InterpreterError>,
    pub diagnostics: Diagnostics,
}

#[cfg(feature = "ariadne")]
impl MathTextError {
    /// Convert to an `ariadne::Report` for pretty-printed diagnostics.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
    ) -> ariadne::Report<'static, (&'name str, std::ops::Range<usize>)> {
        use ariadne::{Config, Label, Report, ReportKind};

        let config = Config::default().with_index_type(ariadne::IndexType::Char);
        Report::build(ReportKind::Error, (source_name, 0..0))
            .with_config(config)
            .with_message(self.to_string())
            .with_label(Label::new((source_name, 0..0)).with_message(self.to_string()))
            .finish()
    }
}
