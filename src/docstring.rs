//! Docstring analysis.
//!
//! Splits free-form documentation into a main description and per-parameter
//! help text. Parameter help is written in field form:
//!
//! ```text
//! Clone a repository
//! :param src:   the repository to clone
//! :param _dest: the destination for cloning
//! ```
//!
//! Authors are inconsistent with spacing, so whitespace is allowed around every
//! token (`:  param   src  :  help`) and the leading colon may be omitted.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Result of analyzing a docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocHelp {
    /// Every non-field line, trimmed and concatenated.
    pub main_text: String,
    /// Parameter name to help text. Later fields overwrite earlier ones.
    pub param_help: HashMap<String, String>,
}

impl DocHelp {
    /// Returns the help text for a parameter, if documented.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.param_help.get(name).map(String::as_str)
    }
}

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^:?\s*param\b\s*(?P<param>\w+)\s*:(?P<help>.*)$")
            .unwrap_or_else(|e| panic!("invalid docstring field pattern: {e}"))
    })
}

/// Analyzes an optional docstring.
///
/// Lines are stripped individually and non-field lines are joined with no
/// separator, so a sentence wrapped across two lines runs together
/// (`"a repository, but" + "with"` gives `"a repository, butwith"`).
pub fn analyze(doc: Option<&str>) -> DocHelp {
    let Some(doc) = doc else {
        return DocHelp::default();
    };

    let mut help = DocHelp::default();

    for line in doc.lines() {
        let line = line.trim();
        match field_pattern().captures(line) {
            Some(caps) => {
                help.param_help
                    .insert(caps["param"].to_string(), caps["help"].trim().to_string());
            }
            None => help.main_text.push_str(line),
        }
    }

    help
}
