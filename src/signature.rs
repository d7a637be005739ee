//! Signature declarations.
//!
//! Rust cannot read a live function's parameter list, so callables declare
//! theirs explicitly. Three forms are supported and all produce the same
//! ordered [`ParameterInfo`] list:
//!
//! - a declaration literal: `introspect("greet(name, count=1, greeting='Hello')")`
//! - names plus a trailing slice of defaults: `introspect_parts(&["a", "b"], vec![1.into()])`
//! - the [`Signature`] builder
//!
//! A leading `self` receiver is dropped. Only fixed-arity parameter lists are
//! derivable; `*args` and `**kwargs` are rejected.

use crate::error::{DocargsError, Result};
use crate::value::{NumericType, Value};
use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

/// Conventional name of the receiver parameter of a method.
pub const RECEIVER: &str = "self";

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name as declared (including any leading underscore).
    pub name: String,
    /// Default value, if the parameter has one. `Some(Value::None)` is a real default.
    pub default: Option<Value>,
}

impl ParameterInfo {
    /// Creates a parameter without a default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Creates a parameter with a default.
    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// Returns true if the parameter carries a default value.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A parsed declaration literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Callable name, when the literal had the `name(...)` form.
    pub name: Option<String>,
    /// Parameters with the receiver removed.
    pub params: Vec<ParameterInfo>,
}

/// Builder for an explicit parameter list.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<ParameterInfo>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter without a default.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParameterInfo::required(name));
        self
    }

    /// Adds a parameter with a default.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push(ParameterInfo::with_default(name, value));
        self
    }

    /// Adds a parameter whose default is the bare `int` or `float` type.
    pub fn typed(self, name: impl Into<String>, ty: NumericType) -> Self {
        self.with_default(name, Value::Type(ty))
    }

    /// Validates the list and returns it with the receiver removed.
    pub fn into_params(self) -> Result<Vec<ParameterInfo>> {
        finish(self.params)
    }
}

/// Extracts the parameter list from names and the trailing run of defaults.
///
/// `defaults[i]` belongs to `names[names.len() - defaults.len() + i]`.
pub fn introspect_parts(names: &[&str], defaults: Vec<Value>) -> Result<Vec<ParameterInfo>> {
    if defaults.len() > names.len() {
        return Err(DocargsError::signature(format!(
            "{} defaults given for {} parameters",
            defaults.len(),
            names.len()
        )));
    }

    let num_required = names.len() - defaults.len();
    let mut defaults = defaults.into_iter();
    let params = names
        .iter()
        .enumerate()
        .map(|(idx, name)| ParameterInfo {
            name: (*name).to_string(),
            default: if idx < num_required {
                None
            } else {
                defaults.next()
            },
        })
        .collect();

    finish(params)
}

/// Extracts the parameter list from a declaration literal.
pub fn introspect(decl: &str) -> Result<Vec<ParameterInfo>> {
    parse_declaration(decl).map(|d| d.params)
}

/// Parses a declaration literal such as `commit(self, a=False, m=None)`.
///
/// The `name(...)` wrapper is optional; a bare `a, b=2` list is accepted too.
/// Text is only read as a wrapper when an identifier precedes the first `(`.
pub fn parse_declaration(decl: &str) -> Result<Declaration> {
    let decl = decl.trim();
    let (name, list) = match decl.split_once('(') {
        Some((head, rest)) if is_identifier(head.trim()) => {
            let inner = rest.strip_suffix(')').ok_or_else(|| {
                DocargsError::signature(format!("unbalanced parentheses in '{decl}'"))
            })?;
            (Some(head.trim().to_string()), inner)
        }
        _ => (None, decl),
    };

    let params = split_params(list)?
        .iter()
        .map(|piece| parse_param(piece))
        .collect::<Result<Vec<_>>>()?;

    Ok(Declaration {
        name,
        params: finish(params)?,
    })
}

/// Drops the receiver and rejects names the schema cannot carry.
fn finish(mut params: Vec<ParameterInfo>) -> Result<Vec<ParameterInfo>> {
    if params.first().is_some_and(|p| p.name == RECEIVER) {
        params.remove(0);
    }

    let mut seen = HashSet::new();
    let mut seen_default = false;
    for param in &params {
        if param.has_default() {
            seen_default = true;
        } else if seen_default {
            return Err(DocargsError::signature(format!(
                "parameter '{}' without a default follows one with a default",
                param.name
            )));
        }
        if param.name.starts_with('*') {
            return Err(DocargsError::signature(format!(
                "variadic parameter '{}' is not supported",
                param.name
            )));
        }
        if !is_identifier(&param.name) {
            return Err(DocargsError::signature(format!(
                "invalid parameter name '{}'",
                param.name
            )));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(DocargsError::signature(format!(
                "duplicate parameter '{}'",
                param.name
            )));
        }
    }

    Ok(params)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Splits a parameter list on commas that are not inside quotes.
fn split_params(list: &str) -> Result<Vec<String>> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in list.chars() {
        current.push(c);
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ',' => {
                current.pop();
                pieces.push(std::mem::take(&mut current));
            }
            None => {}
        }
    }

    if quote.is_some() {
        return Err(DocargsError::signature(format!(
            "unterminated string in '{list}'"
        )));
    }
    pieces.push(current);

    let pieces: Vec<String> = pieces.into_iter().map(|p| p.trim().to_string()).collect();

    // A lone trailing comma is allowed, as is an empty list.
    let last_empty = pieces.last().is_some_and(|p| p.is_empty());
    let body = if last_empty {
        &pieces[..pieces.len() - 1]
    } else {
        &pieces[..]
    };
    if body.iter().any(|p| p.is_empty()) {
        return Err(DocargsError::signature(format!(
            "empty parameter in '{list}'"
        )));
    }
    Ok(body.to_vec())
}

fn parse_param(piece: &str) -> Result<ParameterInfo> {
    match piece.split_once('=') {
        Some((name, literal)) => Ok(ParameterInfo {
            name: name.trim().to_string(),
            default: Some(parse_literal(literal.trim())?),
        }),
        None => Ok(ParameterInfo::required(piece)),
    }
}

/// Parses a default value literal.
fn parse_literal(literal: &str) -> Result<Value> {
    match literal {
        "True" => return Ok(Value::Bool(true)),
        "False" => return Ok(Value::Bool(false)),
        "None" => return Ok(Value::None),
        "int" => return Ok(Value::Type(NumericType::Int)),
        "float" => return Ok(Value::Type(NumericType::Float)),
        _ => {}
    }

    let mut chars = literal.chars().peekable();
    if let Some(&quote @ ('"' | '\'')) = chars.peek() {
        chars.next();
        let (text, closed) = collect_quoted(&mut chars, quote);
        if !closed || chars.next().is_some() {
            return Err(DocargsError::signature(format!(
                "malformed string literal {literal}"
            )));
        }
        return Ok(Value::Str(text));
    }

    if let Ok(i) = literal.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if literal.contains(['.', 'e', 'E']) {
        if let Ok(x) = literal.parse::<f64>() {
            return Ok(Value::Float(x));
        }
    }

    Err(DocargsError::signature(format!(
        "unsupported default literal '{literal}'"
    )))
}

/// Collects characters inside quotes, handling escape sequences.
///
/// Returns the text and whether the closing quote was found.
fn collect_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> (String, bool) {
    let mut result = String::new();
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if escaped {
            match c {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                '\\' => result.push('\\'),
                '"' => result.push('"'),
                '\'' => result.push('\''),
                _ => {
                    // Unknown escape, keep as-is
                    result.push('\\');
                    result.push(c);
                }
            }
            escaped = false;
            continue;
        }

        if c == '\\' {
            escaped = true;
            continue;
        }

        if c == quote {
            return (result, true);
        }

        result.push(c);
    }

    (result, false)
}
