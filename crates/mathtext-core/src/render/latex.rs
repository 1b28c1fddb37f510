//! The LaTeX backend, grounded directly in the original project's
//! `LaTeXRenderer`: a standalone-document preamble plus a per-line mode
//! state machine that switches between `\[ ... \]` math and `\par`/`$...$`
//! text as each element demands.

use tracing::trace;

use crate::element::{
    ComparatorKind, Element, GreekLetter, GroupKind, ModifierKind, OperatorKind, SymbolKind,
};
use crate::error::RenderError;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unknown,
    Math,
    Text,
}

/// Renders a [`Document`](crate::element::Document) as a complete,
/// standalone LaTeX article.
pub struct LatexRenderer {
    line_mode: Mode,
    current_mode: Mode,
    bracket_sizing_enabled: bool,
    internal_render_count: u32,
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self { line_mode: Mode::Unknown, current_mode: Mode::Unknown, bracket_sizing_enabled: true, internal_render_count: 0 }
    }
}

impl LatexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn doing_internal_render(&self) -> bool {
        self.internal_render_count > 0
    }

    fn begin_internal_render(&mut self) {
        self.internal_render_count += 1;
    }

    fn end_internal_render(&mut self) {
        debug_assert!(self.internal_render_count != 0);
        self.internal_render_count -= 1;
    }

    /// Emit `s` as math content, switching LaTeX modes first if needed.
    fn render_math_content(&mut self, s: &str) -> String {
        let mut output = String::new();

        if !self.doing_internal_render() && self.current_mode != Mode::Math {
            if self.current_mode == Mode::Unknown {
                self.line_mode = Mode::Math;
                output.push_str("\\[ ");
            } else if self.line_mode == Mode::Math {
                output.push_str("} ");
            } else {
                output.push_str(" $");
            }
            self.current_mode = Mode::Math;
        }

        output.push_str(s);
        output
    }

    /// Emit `s` (LaTeX-escaped) as text content, switching modes first.
    fn render_text_content(&mut self, s: &str) -> String {
        let mut output = String::new();

        if !self.doing_internal_render() && self.current_mode != Mode::Text {
            if self.current_mode == Mode::Unknown {
                self.line_mode = Mode::Text;
                output.push_str("\\par ");
            } else if self.line_mode == Mode::Math {
                output.push_str("\\text{ ");
            } else {
                output.push_str("$ ");
            }
            self.current_mode = Mode::Text;
        }

        output.push_str(&make_latex_safe(s));
        output
    }

    fn render_children(&mut self, children: &[Element]) -> Result<String, RenderError> {
        self.begin_internal_render();
        let result = self.render_vector(&children.to_vec());
        self.end_internal_render();
        result
    }
}

/// Escapes the handful of characters LaTeX treats specially in running
/// text, matching the historical renderer's table exactly.
fn make_latex_safe(input: &str) -> String {
    let mut output = String::new();
    for ch in input.chars() {
        match ch {
            '#' => output.push_str("\\#"),
            '\\' => output.push_str("\\backslash "),
            '_' => output.push_str("\\underline "),
            '^' => output.push_str("\\^{}"),
            '{' => output.push_str("\\lbrace "),
            '}' => output.push_str("\\rbrace "),
            c => output.push(c),
        }
    }
    output
}

fn greek_macro(letter: GreekLetter) -> &'static str {
    use GreekLetter::*;
    match letter {
        Alpha => "\\alpha",
        UpperAlpha => "A",
        Beta => "\\beta",
        UpperBeta => "B",
        Gamma => "\\gamma",
        UpperGamma => "\\Gamma",
        Delta => "\\delta",
        UpperDelta => "\\Delta",
        Epsilon => "\\epsilon",
        UpperEpsilon => "\\varepsilon",
        Zeta => "\\zeta",
        UpperZeta => "Z",
        Eta => "\\eta",
        UpperEta => "H",
        Theta => "\\theta",
        UpperTheta => "\\Theta",
        Iota => "\\iota",
        UpperIota => "I",
        Kappa => "\\kappa",
        UpperKappa => "K",
        Lambda => "\\lambda",
        UpperLambda => "\\Lambda",
        Mu => "\\mu",
        UpperMu => "M",
        Nu => "\\nu",
        UpperNu => "N",
        Xi => "\\xi",
        UpperXi => "\\Xi",
        Omicron => "o",
        UpperOmicron => "O",
        Pi => "\\pi",
        UpperPi => "\\Pi",
        Rho => "\\rho",
        UpperRho => "P",
        Sigma => "\\sigma",
        UpperSigma => "\\Sigma",
        Tau => "\\tau",
        UpperTau => "T",
        Upsilon => "\\upsilon",
        UpperUpsilon => "\\Upsilon",
        Phi => "\\phi",
        UpperPhi => "\\Phi",
        Chi => "\\chi",
        UpperChi => "X",
        Psi => "\\psi",
        UpperPsi => "\\Psi",
        Omega => "\\omega",
        UpperOmega => "\\Omega",
    }
}

fn symbol_latex(kind: SymbolKind) -> &'static str {
    use SymbolKind::*;
    match kind {
        Comma => ",",
        Period => ".",
        Percent => "\\%",
        Factorial => "!",
        Therefore => "\\therefore ",
        LeftParen => "(",
        RightParen => ")",
        LeftBracket => "[",
        RightBracket => "]",
        LeftBrace => "\\{",
        RightBrace => "\\}",
        Cents => "\\cent ",
        Euro => "\\euro ",
        Franc => "F",
        Pound => "\\pounds ",
        Dollar => "\\$",
        Yen => "Y ",
    }
}

impl Renderer for LatexRenderer {
    fn register_interpreter_commands(&self) -> Vec<&'static str> {
        vec!["NoBracketSizing"]
    }

    fn render_document(&mut self, document: &crate::element::Document) -> Result<String, RenderError> {
        let mut output = String::new();
        output.push_str("\\documentclass[12pt]{article}\n");
        output.push_str("\\usepackage{amssymb}\n");
        output.push_str("\\usepackage[fleqn]{amsmath}\n");
        output.push_str("\\usepackage{amstext}\n");
        output.push_str("\\usepackage{eurosym}\n");
        output.push_str("\\usepackage{textcomp}\n");
        output.push_str("\\usepackage{wasysym}\n");
        output.push_str("\\usepackage[margin=1in]{geometry}\n");
        output.push_str("\\usepackage{fancyhdr}\n");
        output.push_str("\\usepackage{lastpage}\n");
        output.push_str("\\pagestyle{fancy}\n");
        output.push_str("\\renewcommand{\\headrulewidth}{0pt}\n");
        output.push_str("\\fancyhead{}\n");
        output.push_str("\\cfoot{Page \\thepage\\ of \\pageref{LastPage}}\n");
        output.push_str("\\parskip 0in \\parindent 0in\n");
        output.push_str("\\begin{document}\n\n");

        output.push_str(&self.render_vector(&document.elements)?);

        output.push_str("\n\\end{document}\n");
        Ok(output)
    }

    fn render_element(&mut self, element: &Element) -> Result<String, RenderError> {
        trace!(?element, "latex render_element");
        Ok(match element {
            Element::SourceLine { text, .. } => format!("%% {text}\n"),
            Element::Command { name, parameters } => {
                if name.eq_ignore_ascii_case("NoBracketSizing") {
                    if parameters.eq_ignore_ascii_case("true") {
                        self.bracket_sizing_enabled = false;
                    } else if parameters.eq_ignore_ascii_case("false") {
                        self.bracket_sizing_enabled = true;
                    }
                }
                format!("%% COMMAND: {name} {parameters}\n")
            }
            Element::MathModeMarker(_) => {
                self.current_mode = Mode::Math;
                String::new()
            }
            Element::TextModeMarker(_) => {
                self.current_mode = Mode::Text;
                String::new()
            }
            Element::LineBreak => {
                let mut output = String::new();
                match self.line_mode {
                    Mode::Math => {
                        if self.current_mode == Mode::Text {
                            output.push('}');
                        }
                        output.push_str(" \\]");
                    }
                    Mode::Text => {
                        if self.current_mode != Mode::Text {
                            output.push('$');
                        }
                    }
                    Mode::Unknown => output.push_str("\\vspace{10pt}"),
                }
                self.line_mode = Mode::Unknown;
                self.current_mode = Mode::Unknown;
                output.push('\n');
                output
            }
            Element::TextBlock(text) => self.render_text_content(text),
            Element::MathBlock(text) => self.render_math_content(text),
            Element::ItemNumber(text) => {
                let content = format!("\\text{{{text}}}\\thickspace ");
                self.render_math_content(&content)
            }
            Element::Number(n) => self.render_math_content(&n.standard_notation()),
            Element::Operator(op) => {
                let s = match op {
                    OperatorKind::Add => " + ",
                    OperatorKind::Sub => " - ",
                    OperatorKind::Div => " \\div ",
                    OperatorKind::Mul => " \\times ",
                };
                self.render_math_content(s)
            }
            Element::Comparator(cmp) => {
                let s = match cmp {
                    ComparatorKind::Lt => " < ",
                    ComparatorKind::Gt => " > ",
                    ComparatorKind::Eq => " = ",
                    ComparatorKind::Approx => " \\approx ",
                    ComparatorKind::Neq => " \\neq ",
                    ComparatorKind::Gte => " \\geq ",
                    ComparatorKind::Lte => " \\leq ",
                };
                self.render_math_content(s)
            }
            Element::GreekLetter(letter) => self.render_math_content(greek_macro(*letter)),
            Element::Symbol(kind) => self.render_math_content(symbol_latex(*kind)),
            Element::Group { kind, children } => {
                let rendered = self.render_children(children)?;
                let (open, close) = match kind {
                    GroupKind::Parens => ("(", ")"),
                    GroupKind::Brackets => ("[", "]"),
                    GroupKind::Braces => ("\\{", "\\}"),
                };
                let content = if self.bracket_sizing_enabled {
                    format!("\\left{open}{rendered}\\right{close}")
                } else {
                    format!("{open}{rendered}{close}")
                };
                self.render_math_content(&content)
            }
            Element::Modifier { kind, child } => {
                let rendered = self.render_children(child)?;
                let content = match kind {
                    ModifierKind::OverArrowRight => format!("\\overrightarrow{{{rendered}}}"),
                    ModifierKind::OverBar => format!("\\overline{{{rendered}}}"),
                    ModifierKind::OverHat => format!("\\hat{{{rendered}}}"),
                };
                self.render_math_content(&content)
            }
            Element::Root { index, argument } => {
                let rendered_index = self.render_children(index)?;
                let rendered_argument = self.render_children(argument)?;
                let content = if !rendered_index.is_empty() {
                    format!("\\sqrt[{rendered_index}]{{{rendered_argument}}}")
                } else {
                    format!("\\sqrt{{{rendered_argument}}}")
                };
                self.render_math_content(&content)
            }
            Element::Summation { lower, upper } => {
                let rendered_lower = self.render_children(lower)?;
                let rendered_upper = self.render_children(upper)?;
                let mut content = String::from("\\sum");
                if !rendered_lower.is_empty() {
                    content.push_str(&format!("_{{{rendered_lower}}}"));
                }
                if !rendered_upper.is_empty() {
                    content.push_str(&format!("^{{{rendered_upper}}}"));
                }
                content.push(' ');
                self.render_math_content(&content)
            }
            Element::Fraction { numerator, denominator } => {
                let rendered_num = self.render_children(numerator)?;
                let rendered_den = self.render_children(denominator)?;
                self.render_math_content(&format!("\\frac{{{rendered_num}}}{{{rendered_den}}}"))
            }
            Element::Exponent(body) => {
                let rendered = self.render_children(body)?;
                self.render_math_content(&format!("^{{{rendered}}}"))
            }
            Element::Subscript(body) => {
                let rendered = self.render_children(body)?;
                self.render_math_content(&format!("_{{{rendered}}}"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Document, Number, Sign};

    #[test]
    fn escapes_special_characters() {
        assert_eq!(make_latex_safe("a_b^c{d}#e\\f"), "a\\underline b\\^{}c\\lbrace d\\rbrace #e\\backslash f");
    }

    #[test]
    fn math_line_opens_and_closes_display() {
        let mut r = LatexRenderer::new();
        let mut doc = Document::new();
        doc.push(Element::Number(Number { sign: Sign::Positive, whole: "1".into(), fraction: None }));
        doc.push(Element::LineBreak);
        let out = r.render_vector(&doc.elements).unwrap();
        assert!(out.starts_with("\\[ 1"));
        assert!(out.trim_end().ends_with("\\]"));
    }

    #[test]
    fn fraction_renders_as_frac() {
        let mut r = LatexRenderer::new();
        let numerator = vec![Element::Number(Number { sign: Sign::Positive, whole: "1".into(), fraction: None })];
        let denominator = vec![Element::Number(Number { sign: Sign::Positive, whole: "2".into(), fraction: None })];
        let el = Element::Fraction { numerator, denominator };
        let out = r.render_element(&el).unwrap();
        assert!(out.contains("\\frac{1}{2}"));
    }

    #[test]
    fn blank_line_emits_vspace() {
        let mut r = LatexRenderer::new();
        let out = r.render_element(&Element::LineBreak).unwrap();
        assert_eq!(out, "\\vspace{10pt}\n");
    }
}
