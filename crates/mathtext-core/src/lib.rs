//! `mathtext-core`: translate MathText source — a linear notation for
//! mathematics meant to be typed on an ordinary keyboard — into LaTeX or
//! Unified English Braille.
//!
//! The pipeline is three independent stages, each usable on its own:
//! [`loader`] turns a file (or in-memory buffer) into logical source
//! lines, resolving `#include`; [`interpreter`] turns those lines into a
//! flat [`element::Document`]; a [`render::Renderer`] turns a document
//! into output text.

pub mod braille;
pub mod config;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod interpreter;
pub mod loader;
pub mod render;
pub mod util;

use std::collections::HashSet;
use std::path::Path;

use interpreter::{InterpretResult, Interpreter};
use render::Renderer;

/// Run the full `load -> interpret` pipeline over a file on disk.
pub fn interpret_file(
    path: impl AsRef<Path>,
    registered_commands: HashSet<String>,
) -> Result<InterpretResult, error::MathTextError> {
    let lines = loader::load_from_file(path)?;
    Ok(Interpreter::new(registered_commands).interpret(&lines))
}

/// Run the full `load -> interpret` pipeline over an in-memory buffer.
pub fn interpret_buffer(
    buffer: &str,
    filename: &str,
    registered_commands: HashSet<String>,
) -> InterpretResult {
    let lines = loader::load_from_buffer(buffer, filename);
    Interpreter::new(registered_commands).interpret(&lines)
}

/// Render an already-interpreted document with the given backend.
pub fn render_with(
    renderer: &mut dyn Renderer,
    document: &element::Document,
) -> Result<String, error::RenderError> {
    renderer.render_document(document)
}
