//! Command-line front end for `mathtext-core`: load a MathText source
//! file, interpret it, and render it to LaTeX and/or Unified English
//! Braille.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mathtext_core::config::{load_config_file, MathTextConfig};
use mathtext_core::loader::default_output_path;
use mathtext_core::render::latex::LatexRenderer;
use mathtext_core::render::ueb::UebRenderer;
use mathtext_core::render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "mathtext", about = "Translate MathText source into LaTeX and Unified English Braille")]
struct Args {
    /// Input MathText source file.
    #[arg(short, long)]
    file: PathBuf,

    /// Emit Unified English Braille, optionally to a named file (default:
    /// the input's stem with a `.brf` extension).
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    braille: Option<String>,

    /// Emit LaTeX, optionally to a named file (default: the input's stem
    /// with a `.tex` extension).
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    latex: Option<String>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();
    match run(&args) {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(true)` if interpretation produced diagnostics printed to
/// stderr with at least one `Error`, `Ok(false)` on a clean run.
fn run(args: &Args) -> Result<bool, String> {
    let config = match &args.config {
        Some(path) => load_config_file(path).map_err(|e| e.to_string())?,
        None => MathTextConfig::default(),
    };

    let mut commands = std::collections::HashSet::new();
    let mut latex = LatexRenderer::new();
    let mut ueb = UebRenderer::new();
    if config.ueb_line_length > 0 {
        ueb.enable_line_wrapping(config.ueb_line_length);
    } else {
        ueb.disable_line_wrapping();
    }
    commands.extend(latex.register_interpreter_commands().into_iter().map(str::to_string));
    commands.extend(ueb.register_interpreter_commands().into_iter().map(str::to_string));

    let result = mathtext_core::interpret_file(&args.file, commands).map_err(|e| e.to_string())?;

    for diagnostic in &result.diagnostics {
        eprintln!("{diagnostic}");
    }
    if let Some(err) = &result.error {
        let source_name = args.file.to_string_lossy();
        let report = mathtext_core::error::MathTextError::Interpreter(err.clone()).to_report(source_name.as_ref());
        let _ = report.eprint((source_name.as_ref(), ariadne::Source::from("")));
        return Ok(true);
    }

    if let Some(path_arg) = &args.braille {
        let out_path =
            if path_arg.is_empty() { default_output_path(&args.file, "brf") } else { PathBuf::from(path_arg) };
        let text = ueb.render_document(&result.document).map_err(|e| e.to_string())?;
        std::fs::write(&out_path, text)
            .map_err(|e| format!("could not write \"{}\": {e}", out_path.display()))?;
    }

    if let Some(path_arg) = &args.latex {
        let out_path =
            if path_arg.is_empty() { default_output_path(&args.file, "tex") } else { PathBuf::from(path_arg) };
        let text = latex.render_document(&result.document).map_err(|e| e.to_string())?;
        std::fs::write(&out_path, text)
            .map_err(|e| format!("could not write \"{}\": {e}", out_path.display()))?;
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn braille_flag_without_value_uses_default_missing() {
        let args = Args::parse_from(["mathtext", "-f", "in.mt", "-b"]);
        assert_eq!(args.braille, Some(String::new()));
    }

    #[test]
    fn braille_flag_with_value() {
        let args = Args::parse_from(["mathtext", "-f", "in.mt", "-b", "out.brf"]);
        assert_eq!(args.braille, Some("out.brf".to_string()));
    }
}
