//! The interpreter: a mode-sensitive, recursive-descent lexer/parser that
//! turns logical source lines into a flat [`Document`], recursing into
//! itself for every composite element's children.

mod command;
mod expsub;
mod fraction;
mod greek;
mod group;
mod item;
mod item_number;
mod modifier;
mod number;
mod operators;
mod root;
mod summation;
mod symbol;
mod text_sniff;

use std::collections::HashSet;

use tracing::{trace, trace_span};

use crate::diagnostics::{Category, Code, Diagnostic, Diagnostics};
use crate::element::{Document, Element, ElementVec, ModeMarkerKind, SourceLocation};
use crate::error::{InterpreterError, InterpreterErrorKind};
use crate::loader::SourceLine;

pub(crate) use item::{extract_group, extract_item};

/// Recursion guard for nested composite parses (fractions, groups,
/// exponents, ...). The original grammar has no explicit bound; in a
/// stack-limited environment we fail with a diagnostic rather than
/// overflow, per the design notes.
pub const MAX_RECURSION_DEPTH: u32 = 64;

/// Terminator characters used by `extract_item` when no narrower set is
/// supplied by a specific production.
pub(crate) const DEFAULT_TERMINATORS: &str = ", +/*=<>()[]{}~@# ";

/// Outcome of a full `interpret` call.
pub struct InterpretResult {
    pub document: Document,
    pub diagnostics: Diagnostics,
    pub error: Option<InterpreterError>,
}

/// Drives interpretation of a whole source buffer into a [`Document`].
pub struct Interpreter {
    diagnostics: Diagnostics,
    registered_commands: HashSet<String>,
    in_text_block: bool,
    block_began_line: Option<SourceLocation>,
}

impl Interpreter {
    pub fn new(registered_commands: HashSet<String>) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            registered_commands,
            in_text_block: false,
            block_began_line: None,
        }
    }

    /// Interpret every logical line of `lines` into a document.
    pub fn interpret(mut self, lines: &[SourceLine]) -> InterpretResult {
        let span = trace_span!("interpret");
        let _enter = span.enter();

        let mut document = Document::new();
        let mut error = None;

        for line in lines {
            document.push(Element::SourceLine { location: line.location.clone(), text: line.text.clone().into() });

            let trimmed = line.text.trim();
            if trimmed == "$$" {
                if !self.in_text_block {
                    self.warn(Code::NestedMathMode, &line.location, "nested math-mode block");
                } else {
                    self.in_text_block = false;
                    self.block_began_line = Some(line.location.clone());
                    document.push(Element::MathModeMarker(ModeMarkerKind::Block));
                }
                continue;
            }
            if trimmed == "&&" {
                if self.in_text_block {
                    self.warn(Code::NestedTextMode, &line.location, "nested text-mode block");
                } else {
                    self.in_text_block = true;
                    self.block_began_line = Some(line.location.clone());
                    document.push(Element::TextModeMarker(ModeMarkerKind::Block));
                }
                continue;
            }

            let in_text_mode = self.in_text_block;
            match self.interpret_buffer(&line.location, &line.text, in_text_mode, true, 0) {
                Ok(elements) => {
                    document.elements.extend(elements);
                    document.push(Element::LineBreak);
                }
                Err(err) => {
                    error = Some(err);
                    break;
                }
            }
        }

        InterpretResult { document, diagnostics: self.diagnostics, error }
    }

    pub(crate) fn is_registered_command(&self, name: &str) -> bool {
        self.registered_commands.contains(name)
    }

    #[cfg(test)]
    pub(crate) fn diagnostics_for_test(&self) -> &[crate::diagnostics::Diagnostic] {
        self.diagnostics.as_slice()
    }

    pub(crate) fn info(&mut self, code: Code, loc: &SourceLocation, message: impl Into<Box<str>>) {
        self.push(Category::Info, code, loc, message);
    }

    pub(crate) fn warn(&mut self, code: Code, loc: &SourceLocation, message: impl Into<Box<str>>) {
        self.push(Category::Warning, code, loc, message);
    }

    fn push(&mut self, category: Category, code: Code, loc: &SourceLocation, message: impl Into<Box<str>>) {
        self.diagnostics.push(Diagnostic { category, code, location: loc.clone(), message: message.into() });
    }

    pub(crate) fn error(&mut self, code: Code, loc: &SourceLocation, message: impl Into<Box<str>>) {
        self.push(Category::Error, code, loc, message);
    }

    pub(crate) fn fatal(&mut self, code: Code, kind: InterpreterErrorKind, loc: &SourceLocation, message: impl Into<Box<str>>) -> InterpreterError {
        self.error(code, loc, message);
        InterpreterError { kind, filename: loc.filename.clone(), line: loc.line1 }
    }

    fn check_depth(&mut self, loc: &SourceLocation, depth: u32) -> Result<(), InterpreterError> {
        if depth >= MAX_RECURSION_DEPTH {
            Err(self.fatal(
                Code::RecursionLimitExceeded,
                InterpreterErrorKind::RecursionLimitExceeded,
                loc,
                "recursion depth limit exceeded while parsing nested constructs",
            ))
        } else {
            Ok(())
        }
    }

    /// The recursive heart: scan `src` left to right, producing an element
    /// sequence. `at_start_of_line` gates the Command/ItemNumber productions,
    /// which may only ever match on the very first iteration of a top-level
    /// per-line call, never inside a recursively-parsed sub-buffer.
    pub(crate) fn interpret_buffer(
        &mut self,
        loc: &SourceLocation,
        src: &str,
        mut in_text_mode: bool,
        mut at_start_of_line: bool,
        depth: u32,
    ) -> Result<ElementVec, InterpreterError> {
        self.check_depth(loc, depth)?;
        trace!(src, in_text_mode, "interpret_buffer");

        let chars: Vec<char> = src.chars().collect();
        let mut i = 0usize;
        let mut out = ElementVec::new();
        let mut catch = String::new();

        macro_rules! flush {
            () => {
                if !catch.is_empty() {
                    let text: Box<str> = std::mem::take(&mut catch).into();
                    if in_text_mode {
                        text_sniff::sniff(self, loc, &text);
                        out.push(Element::TextBlock(text));
                    } else {
                        out.push(Element::MathBlock(text));
                    }
                }
            };
        }

        while i < chars.len() {
            let first_iteration = at_start_of_line;
            at_start_of_line = false;

            if first_iteration && !in_text_mode {
                if let Some(cmd) = command::parse_command(self, loc, &chars, &mut i)? {
                    flush!();
                    out.push(cmd);
                    continue;
                }
                if let Some(item_num) = item_number::parse_item_number(&chars, &mut i) {
                    flush!();
                    out.push(item_num);
                    continue;
                }
            }

            // Mode switches, checked before anything else at this position.
            // A `$` preceded by a backtick is always consumed two positions
            // earlier by the Symbol production's currency escape, so a bare
            // `$` reaching this check is never the escaped form.
            if chars[i] == '$' {
                if in_text_mode {
                    flush!();
                    out.push(Element::MathModeMarker(ModeMarkerKind::Segment));
                    in_text_mode = false;
                    i += 1;
                    continue;
                } else {
                    self.warn(Code::NestedMathMode, loc, "nested math-mode segment marker");
                    catch.push(chars[i]);
                    i += 1;
                    continue;
                }
            }
            if chars[i] == '&' {
                if !in_text_mode {
                    flush!();
                    out.push(Element::TextModeMarker(ModeMarkerKind::Segment));
                    in_text_mode = true;
                    i += 1;
                    continue;
                } else {
                    self.warn(Code::NestedTextMode, loc, "nested text-mode segment marker");
                    catch.push(chars[i]);
                    i += 1;
                    continue;
                }
            }

            if in_text_mode {
                catch.push(chars[i]);
                i += 1;
                continue;
            }

            if let Some(el) = group::try_group(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = operators::try_operator(&chars, &mut i) {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = number::try_number(&chars, &mut i) {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = operators::try_comparator(&chars, &mut i) {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = greek::try_greek(self, loc, &chars, &mut i) {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = modifier::try_modifier(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = symbol::try_symbol(&chars, &mut i) {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = fraction::try_fraction(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = root::try_root(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = summation::try_summation(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = expsub::try_exponent(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }
            if let Some(el) = expsub::try_subscript(self, loc, &chars, &mut i, depth)? {
                flush!();
                out.push(el);
                continue;
            }

            catch.push(chars[i]);
            i += 1;
        }

        flush!();
        Ok(out)
    }
}

/// Join a contiguous run of chars back into a `String`.
pub(crate) fn chars_to_string(chars: &[char]) -> String {
    chars.iter().collect()
}
