//! Structured data recovery from menu source text
//!
//! The remote store holds the menu as a TypeScript-like source file declaring
//! `export const <name> = { ... };`. This module strips source syntax around
//! that declaration, rewrites the object literal into JSON and parses it.
//!
//! This is a best-effort text transformation, not a general parser. It
//! assumes the declared value is a plain object literal: nested functions,
//! computed keys, and string values containing unescaped quote, comma-colon
//! or brace sequences collide with the rewrite rules and are unsupported.
//! Content that is already JSON (as produced by [`serialize_menu_source`])
//! passes through the rewrite rules unchanged.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::MenuData;

/// Errors that can occur while recovering menu data from source text
#[derive(Debug, Error)]
pub enum RecoverError {
    /// The expected declaration or object literal shape was not found
    #[error("Failed to locate menu declaration: {0}")]
    Parse(String),

    /// The parsed structure is missing required fields
    #[error("Invalid menu structure: {0}")]
    Validation(String),
}

// Patterns compiled once; each strips one layer of source syntax so a
// commented-out or imported declaration can never be mistaken for the live
// one. Fragments left behind outside the literal are harmless because only
// the declaration and its balanced literal are consumed downstream.
static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

// Line-anchored so `//` inside string values (https://...) survives.
static LINE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*//[^\n]*").unwrap());

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*import\b[^\n]*").unwrap());

// Flat interface bodies only; nested object types are out of contract.
static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:export\s+)?interface\s+\w+[^{]*\{[^{}]*\}").unwrap());

static TYPE_ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:export\s+)?type\s+\w+[^=\n]*=[^;]*;").unwrap());

static DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+const\s+[A-Za-z_$][\w$]*\s*(?::[^=]*)?=\s*").unwrap());

static SINGLE_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

static BARE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,]\s*)([A-Za-z_$][\w$]*)\s*:").unwrap());

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").unwrap());

static SENTINEL_TRUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bTrue\b").unwrap());
static SENTINEL_FALSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bFalse\b").unwrap());
static SENTINEL_UNDEFINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bundefined\b").unwrap());

/// Recovers a validated [`MenuData`] from menu source text
///
/// Strips comments, import statements and type declarations, isolates the
/// object literal following the `export const` declaration, rewrites it into
/// JSON and parses it.
///
/// # Returns
/// * `Ok(MenuData)` - The recovered menu
/// * `Err(RecoverError::Parse)` - No declaration or balanced literal found,
///   or the rewritten literal is not valid JSON
/// * `Err(RecoverError::Validation)` - The literal lacks a `navigation` array
pub fn recover_menu_data(raw: &str) -> Result<MenuData, RecoverError> {
    let stripped = strip_source_syntax(raw);
    let literal = locate_declared_literal(&stripped)?;
    let rewritten = rewrite_to_json(literal);
    parse_and_validate(&rewritten)
}

/// Renders a menu back into the source-text declaration format
///
/// Emits `export const menuData = <pretty JSON>;` - the same declaration
/// shape the store holds, and valid input to [`recover_menu_data`].
pub fn serialize_menu_source(menu: &MenuData) -> String {
    let json = serde_json::to_string_pretty(menu)
        .unwrap_or_else(|_| r#"{ "navigation": [] }"#.to_string());
    format!("export const menuData = {};\n", json)
}

/// Removes comments, imports and type declarations from the source text
fn strip_source_syntax(raw: &str) -> String {
    let text = BLOCK_COMMENT_RE.replace_all(raw, "");
    let text = LINE_COMMENT_RE.replace_all(&text, "");
    let text = IMPORT_RE.replace_all(&text, "");
    let text = INTERFACE_RE.replace_all(&text, "");
    let text = TYPE_ALIAS_RE.replace_all(&text, "");
    text.into_owned()
}

/// Finds the declared object literal and returns its balanced text
///
/// When the file declares several constants, the first one whose value is an
/// object literal wins.
fn locate_declared_literal(text: &str) -> Result<&str, RecoverError> {
    let mut saw_declaration = false;
    for decl in DECLARATION_RE.find_iter(text) {
        saw_declaration = true;
        let after = &text[decl.end()..];
        if let Some((offset, '{')) = after.char_indices().find(|(_, c)| !c.is_whitespace()) {
            return extract_object_literal(text, decl.end() + offset).ok_or_else(|| {
                RecoverError::Parse("object literal has unbalanced braces".to_string())
            });
        }
    }

    if saw_declaration {
        Err(RecoverError::Parse(
            "declaration is not followed by an object literal".to_string(),
        ))
    } else {
        Err(RecoverError::Parse(
            "no `export const <name> = ...` declaration found".to_string(),
        ))
    }
}

/// Scans from an opening brace to its matching close, skipping string contents
///
/// Returns the literal including both braces, or `None` when the braces never
/// balance. Quote and brace characters are ASCII, so byte-level scanning
/// slices on valid char boundaries.
fn extract_object_literal(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == quote {
                in_string = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => in_string = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrites an object literal into JSON syntax
///
/// Normalizes single quotes to double quotes, quotes bare identifier keys,
/// drops trailing commas and maps the sentinel tokens `True`/`False`/
/// `undefined` to their JSON equivalents. Already-valid JSON is left intact.
fn rewrite_to_json(literal: &str) -> String {
    let text = SINGLE_QUOTED_RE.replace_all(literal, "\"$1\"");
    let text = BARE_KEY_RE.replace_all(&text, "${1}\"${2}\":");
    let text = TRAILING_COMMA_RE.replace_all(&text, "$1");
    let text = SENTINEL_TRUE_RE.replace_all(&text, "true");
    let text = SENTINEL_FALSE_RE.replace_all(&text, "false");
    let text = SENTINEL_UNDEFINED_RE.replace_all(&text, "null");
    text.into_owned()
}

/// Parses the rewritten literal and validates the navigation field
fn parse_and_validate(json: &str) -> Result<MenuData, RecoverError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| RecoverError::Parse(format!("rewritten literal is not valid JSON: {}", e)))?;

    match value.get("navigation") {
        None => {
            return Err(RecoverError::Validation(
                "missing `navigation` field".to_string(),
            ))
        }
        Some(nav) if !nav.is_array() => {
            return Err(RecoverError::Validation(
                "`navigation` is not an array".to_string(),
            ))
        }
        Some(_) => {}
    }

    serde_json::from_value(value)
        .map_err(|e| RecoverError::Validation(format!("navigation entries are malformed: {}", e)))
}
