//! The renderer framework: a backend-agnostic walk over a [`Document`]
//! dispatching each element to a type-specific method. The `Element` enum
//! is closed, so the dispatch in [`Renderer::render_element`] is one
//! exhaustive `match` per backend rather than a runtime lookup — "unknown
//! element variant" is not a reachable state.

pub mod latex;
pub mod ueb;

use tracing::trace_span;

use crate::element::{Document, Element, ElementVec};
use crate::error::RenderError;

/// One rendering backend. Implementors own all per-variant mapping tables
/// and any mutable rendering state (line mode, nesting counters, ...).
pub trait Renderer {
    /// Command names this renderer recognizes in `$$name ...` directives,
    /// to be registered with the interpreter before `interpret` runs.
    fn register_interpreter_commands(&self) -> Vec<&'static str>;

    fn render_document(&mut self, document: &Document) -> Result<String, RenderError> {
        let span = trace_span!("render_document");
        let _enter = span.enter();
        self.render_vector(&document.elements)
    }

    fn render_vector(&mut self, elements: &ElementVec) -> Result<String, RenderError> {
        let span = trace_span!("render_vector", len = elements.len());
        let _enter = span.enter();
        let mut out = String::new();
        for element in elements {
            out.push_str(&self.render_element(element)?);
        }
        Ok(out)
    }

    fn render_element(&mut self, element: &Element) -> Result<String, RenderError>;
}
