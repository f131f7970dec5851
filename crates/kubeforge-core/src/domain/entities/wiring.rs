//! Wiring markers and the line-oriented text operations the wiring updater
//! performs on an entry file.
//!
//! The engine does not parse Go. It finds anchor comments, scans brackets to
//! find the block an anchor lives in, and splices rendered snippets in front
//! of the anchor line.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    entities::template::render_template, error::DomainError, value_objects::WiringTarget,
};

/// A named anchor inside the entry file and what to insert there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiringMarker {
    /// Stable marker name reported back to callers.
    pub name: &'static str,
    /// Exact text of the anchor line (surrounding whitespace ignored).
    pub anchor: &'static str,
    /// Snippet template inserted before the anchor. Lines are re-indented to
    /// the anchor's indentation.
    pub snippet: &'static str,
    /// Template of the identity token whose presence means "already applied".
    pub token: &'static str,
    /// Wirings this marker participates in.
    pub targets: &'static [WiringTarget],
}

impl WiringMarker {
    pub fn serves(&self, target: WiringTarget) -> bool {
        self.targets.contains(&target)
    }

    pub fn render_token(&self, vars: &BTreeMap<String, String>) -> Result<String, DomainError> {
        render_template(&format!("marker:{}:token", self.name), self.token, vars)
    }

    pub fn render_snippet(&self, vars: &BTreeMap<String, String>) -> Result<String, DomainError> {
        render_template(&format!("marker:{}", self.name), self.snippet, vars)
    }
}

/// Index of the first line whose trimmed text equals `anchor`.
pub fn find_anchor(lines: &[&str], anchor: &str) -> Option<usize> {
    lines.iter().position(|line| line.trim() == anchor)
}

/// Inclusive line range of the innermost `(`/`{` block enclosing `anchor_line`.
///
/// Falls back to the whole file when the anchor sits at top level. Brackets
/// inside `//` comments and single-line string or rune literals are ignored.
///
/// ## Limitations
///
/// The scan works line by line, so `/* */` comments and raw strings that span
/// several lines are counted as code.
pub fn enclosing_block(lines: &[&str], anchor_line: usize) -> (usize, usize) {
    let mut start = 0;
    let mut depth = 0usize;
    'backward: for idx in (0..anchor_line).rev() {
        for c in code_brackets(lines[idx]).into_iter().rev() {
            match c {
                ')' | '}' => depth += 1,
                '(' | '{' if depth == 0 => {
                    start = idx;
                    break 'backward;
                }
                '(' | '{' => depth -= 1,
                _ => {}
            }
        }
    }

    let mut end = lines.len().saturating_sub(1);
    let mut depth = 0usize;
    'forward: for (idx, line) in lines.iter().enumerate().skip(anchor_line + 1) {
        for c in code_brackets(line) {
            match c {
                '(' | '{' => depth += 1,
                ')' | '}' if depth == 0 => {
                    end = idx;
                    break 'forward;
                }
                ')' | '}' => depth -= 1,
                _ => {}
            }
        }
    }

    (start, end)
}

/// Brackets of `line` that are Go code, in order.
fn code_brackets(line: &str) -> Vec<char> {
    let mut brackets = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) if q != '`' && c == '\\' => {
                chars.next();
            }
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => break,
                '(' | ')' | '{' | '}' => brackets.push(c),
                _ => {}
            },
        }
    }
    brackets
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `line` contains `token` as a whole token.
///
/// An occurrence only counts when it is not glued to a longer identifier on
/// either side, so `batchv1.AddToScheme(scheme)` does not match inside
/// `xbatchv1.AddToScheme(scheme)`.
pub fn contains_token(line: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    line.match_indices(token).any(|(at, _)| {
        let before = line[..at].chars().next_back();
        let after = line[at + token.len()..].chars().next();
        let open_start = token.chars().next().is_some_and(is_ident_char);
        let open_end = token.chars().next_back().is_some_and(is_ident_char);
        !(open_start && before.is_some_and(is_ident_char))
            && !(open_end && after.is_some_and(is_ident_char))
    })
}

/// The quoted import path `alias` is bound to within `lines`, if any.
pub fn import_binding<'a>(lines: &[&'a str], alias: &str) -> Option<&'a str> {
    lines.iter().copied().find_map(|line| {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some(name), Some(path)) if name == alias && path.starts_with('"') => Some(path),
            _ => None,
        }
    })
}

/// Insert `snippet` before `anchor_line`, indenting every non-empty snippet
/// line with the anchor's leading whitespace. Returns the new text.
///
/// The original line terminator style is preserved: if the text uses `\r\n`,
/// inserted lines do too.
pub fn insert_before(text: &str, anchor_line: usize, snippet: &str) -> String {
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(text.len() + snippet.len() + 16);

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        if idx == anchor_line {
            let indent: String = line
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();
            for snippet_line in snippet.lines() {
                if !snippet_line.is_empty() {
                    out.push_str(&indent);
                    out.push_str(snippet_line);
                }
                out.push_str(newline);
            }
        }
        out.push_str(line);
    }
    out
}

// ============================================================================
// Version 2 entry file markers
// ============================================================================

pub const IMPORTS_ANCHOR: &str = "// +kubebuilder:scaffold:imports";
pub const SCHEME_ANCHOR: &str = "// +kubebuilder:scaffold:scheme";
pub const BUILDER_ANCHOR: &str = "// +kubebuilder:scaffold:builder";

pub const API_IMPORT: WiringMarker = WiringMarker {
    name: "imports",
    anchor: IMPORTS_ANCHOR,
    snippet: "{{ IMPORT_ALIAS }} \"{{ PACKAGE_PATH }}\"",
    token: "\"{{ PACKAGE_PATH }}\"",
    targets: &[WiringTarget::Resource, WiringTarget::Webhook],
};

pub const CONTROLLER_IMPORT: WiringMarker = WiringMarker {
    name: "controller-imports",
    anchor: IMPORTS_ANCHOR,
    snippet: "\"{{ REPO }}/controllers\"",
    token: "\"{{ REPO }}/controllers\"",
    targets: &[WiringTarget::Controller],
};

pub const SCHEME_REGISTRATION: WiringMarker = WiringMarker {
    name: "scheme",
    anchor: SCHEME_ANCHOR,
    snippet: "_ = {{ IMPORT_ALIAS }}.AddToScheme(scheme)",
    token: "{{ IMPORT_ALIAS }}.AddToScheme(scheme)",
    targets: &[WiringTarget::Resource],
};

pub const CONTROLLER_SETUP: WiringMarker = WiringMarker {
    name: "controller-builder",
    anchor: BUILDER_ANCHOR,
    snippet: r#"if err = (&controllers.{{ KIND }}Reconciler{
	Client: mgr.GetClient(),
	Log:    ctrl.Log.WithName("controllers").WithName("{{ KIND }}"),
	Scheme: mgr.GetScheme(),
}).SetupWithManager(mgr); err != nil {
	setupLog.Error(err, "unable to create controller", "controller", "{{ KIND }}")
	os.Exit(1)
}"#,
    token: "&controllers.{{ KIND }}Reconciler{",
    targets: &[WiringTarget::Controller],
};

pub const WEBHOOK_SETUP: WiringMarker = WiringMarker {
    name: "webhook-builder",
    anchor: BUILDER_ANCHOR,
    snippet: r#"if err = (&{{ IMPORT_ALIAS }}.{{ KIND }}{}).SetupWebhookWithManager(mgr); err != nil {
	setupLog.Error(err, "unable to create webhook", "webhook", "{{ KIND }}")
	os.Exit(1)
}"#,
    token: "(&{{ IMPORT_ALIAS }}.{{ KIND }}{}).SetupWebhookWithManager(mgr)",
    targets: &[WiringTarget::Webhook],
};

/// Every version 2 marker in application order.
pub const V2_MARKERS: &[WiringMarker] = &[
    API_IMPORT,
    CONTROLLER_IMPORT,
    SCHEME_REGISTRATION,
    CONTROLLER_SETUP,
    WEBHOOK_SETUP,
];
