//! Greek letters: `%X` for 24 canonical mappings. `%%` is reserved for
//! the percent symbol and deferred to the symbol production.

use crate::diagnostics::Code;
use crate::element::{Element, GreekLetter, SourceLocation};
use crate::interpreter::Interpreter;

/// Maps the lowercase MathText source letter to its lower/upper Greek
/// letter pair. Note the historical oddity preserved from the original
/// renderer: `q` maps to tau, not theta.
fn greek_for_letter(c: char) -> Option<(GreekLetter, GreekLetter)> {
    use GreekLetter::*;
    Some(match c {
        'a' => (Alpha, UpperAlpha),
        'b' => (Beta, UpperBeta),
        'g' => (Gamma, UpperGamma),
        'd' => (Delta, UpperDelta),
        'e' => (Epsilon, UpperEpsilon),
        'z' => (Zeta, UpperZeta),
        'h' => (Eta, UpperEta),
        't' => (Theta, UpperTheta),
        'i' => (Iota, UpperIota),
        'k' => (Kappa, UpperKappa),
        'l' => (Lambda, UpperLambda),
        'm' => (Mu, UpperMu),
        'n' => (Nu, UpperNu),
        'x' => (Xi, UpperXi),
        'o' => (Omicron, UpperOmicron),
        'p' => (Pi, UpperPi),
        'q' => (Tau, UpperTau), // historical oddity: q -> tau, not theta
        'r' => (Rho, UpperRho),
        's' => (Sigma, UpperSigma),
        'u' => (Upsilon, UpperUpsilon),
        'v' => (Phi, UpperPhi),
        'c' => (Chi, UpperChi),
        'f' => (Psi, UpperPsi),
        'w' => (Omega, UpperOmega),
        _ => return None,
    })
}

pub(crate) fn try_greek(interp: &mut Interpreter, loc: &SourceLocation, chars: &[char], i: &mut usize) -> Option<Element> {
    if chars.get(*i) != Some(&'%') {
        return None;
    }
    let code = chars.get(*i + 1)?;
    if *code == '%' {
        // Reserved for the percent symbol.
        return None;
    }

    let lower = code.to_ascii_lowercase();
    match greek_for_letter(lower) {
        Some((lower_letter, upper_letter)) => {
            *i += 2;
            let letter = if code.is_ascii_uppercase() { upper_letter } else { lower_letter };
            Some(Element::GreekLetter(letter))
        }
        None => {
            interp.warn(Code::UnknownGreek, loc, format!("unknown Greek letter code '%{code}'"));
            None
        }
    }
}
