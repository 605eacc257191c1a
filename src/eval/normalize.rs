use std::fmt;

use tracing::trace;

use crate::error::{PlotError, PlotResult};

/// Expression text with every implicit operator and function-name variant
/// rewritten into the evaluator's grammar.
///
/// Produced by [`normalize`] and never mutated afterwards. Hosts that
/// persisted canonical text can rewrap it with
/// [`CanonicalEquation::from_canonical_text`]; evaluation treats the text
/// as untrusted either way, so malformed content surfaces as
/// [`crate::eval::EvalError`], not a panic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalEquation(String);

impl CanonicalEquation {
    #[must_use]
    pub fn from_canonical_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalEquation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Function names the evaluator's grammar recognizes, in canonical casing.
const FUNCTION_NAMES: [&str; 9] = [
    "sin", "cos", "tan", "log", "sqrt", "exp", "asin", "acos", "atan",
];

/// Rewrites raw user text into canonical expression syntax.
///
/// - one `=` keeps only the trimmed right-hand side; more than one fails
/// - `*` is inserted between a digit immediately followed by a letter
/// - recognized function names are lowercased as whole words, and the
///   `asin`/`acos`/`atan` and legacy `sin$`/`cos$`/`tan$` spellings map to
///   the inverse-function names
///
/// Idempotent: normalizing canonical text returns it unchanged.
pub fn normalize(raw: &str) -> PlotResult<CanonicalEquation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlotError::MalformedEquation("equation is empty".to_owned()));
    }

    let rhs = strip_left_hand_side(trimmed)?;
    let explicit = insert_explicit_multiplication(rhs);
    let canonical = canonicalize_function_names(&explicit);

    trace!(raw, canonical = %canonical, "normalized equation");
    Ok(CanonicalEquation(canonical))
}

fn strip_left_hand_side(text: &str) -> PlotResult<&str> {
    let mut parts = text.split('=');
    // `split` always yields at least one part
    let _lhs = parts.next();
    match (parts.next(), parts.next()) {
        (None, _) => Ok(text),
        (Some(rhs), None) => {
            let rhs = rhs.trim();
            if rhs.is_empty() {
                Err(PlotError::MalformedEquation(
                    "missing right-hand side after `=`".to_owned(),
                ))
            } else {
                Ok(rhs)
            }
        }
        (Some(_), Some(_)) => Err(PlotError::MalformedEquation(
            "more than one `=`".to_owned(),
        )),
    }
}

fn insert_explicit_multiplication(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    for chr in text.chars() {
        if let Some(p) = prev
            && p.is_ascii_digit()
            && chr.is_ascii_alphabetic()
        {
            out.push('*');
        }
        out.push(chr);
        prev = Some(chr);
    }
    out
}

fn canonicalize_function_names(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(&chr) = chars.peek() {
        if !chr.is_ascii_alphabetic() {
            out.push(chr);
            chars.next();
            continue;
        }

        // maximal alphabetic run, so `asin` can never be mangled via `sin`
        let mut word = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                word.push(c);
                chars.next();
            } else {
                break;
            }
        }

        let lower = word.to_ascii_lowercase();
        let legacy_inverse =
            chars.peek() == Some(&'$') && matches!(lower.as_str(), "sin" | "cos" | "tan");
        if legacy_inverse {
            chars.next(); // consume the `$` alias marker
            out.push('a');
            out.push_str(&lower);
        } else if FUNCTION_NAMES.contains(&lower.as_str()) {
            out.push_str(&lower);
        } else {
            out.push_str(&word);
        }
    }
    out
}
