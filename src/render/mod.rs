//! Script rendering and template injection
//!
//! Builds the `SwaggerUIBundle({...})` bootstrap call (plus an optional
//! `ui.initOAuth({...})` block) and splices it into an HTML template
//! between the call-region marker comments.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::SchemaTable;
use crate::translate::{serialize, TranslateOptions};

/// Opening marker of the replaceable region
pub const START_MARKER: &str = "// Begin Swagger UI call region";

/// Closing marker of the replaceable region
pub const END_MARKER: &str = "// End Swagger UI call region";

/// Template injection errors
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("Failed to access template: {0}")]
    IoError(#[from] io::Error),

    #[error("Template is missing the Swagger UI call region markers")]
    MarkersNotFound,
}

/// Indent lines from `from_line` (1-based) onward by `width` spaces
///
/// Lines before `from_line` are left untouched, so the result can follow
/// text already placed at the right column.
pub fn indent(text: &str, width: usize, from_line: usize) -> String {
    indent_with(text, &" ".repeat(width), from_line)
}

/// Like [`indent`], prefixing each line with `margin` verbatim
pub fn indent_with(text: &str, margin: &str, from_line: usize) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i + 1 >= from_line {
                format!("{}{}", margin, line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options translating the `ui.initOAuth` variables
pub fn oauth_options() -> TranslateOptions {
    TranslateOptions::with_schema(SchemaTable::oauth())
}

/// `ui.initOAuth({...})` for the OAuth variables present, or `""`
pub fn oauth_block(env: &[(String, String)]) -> String {
    let fragment = serialize(pairs(env), &oauth_options());
    if fragment.is_empty() {
        return String::new();
    }
    format!("ui.initOAuth({{\n{}\n}})", indent(&fragment, 2, 0))
}

/// The full bootstrap script for `env`
pub fn render_call(env: &[(String, String)], options: &TranslateOptions) -> String {
    let fragment = serialize(pairs(env), options);
    let mut call = if fragment.is_empty() {
        "window.ui = SwaggerUIBundle({\n})".to_string()
    } else {
        format!(
            "window.ui = SwaggerUIBundle({{\n{}\n}})",
            indent(&fragment, 2, 0)
        )
    };

    let oauth = oauth_block(env);
    if !oauth.is_empty() {
        call.push_str("\n\n");
        call.push_str(&oauth);
    }
    call
}

/// Replace the call region of `template` with the rendered script
///
/// The markers are kept; the script is indented to the start marker's
/// column.
pub fn inject(
    template: &str,
    env: &[(String, String)],
    options: &TranslateOptions,
) -> Result<String, InjectError> {
    let start = template.find(START_MARKER).ok_or(InjectError::MarkersNotFound)?;
    let region_start = start + START_MARKER.len();
    let end = template[region_start..]
        .find(END_MARKER)
        .map(|offset| region_start + offset)
        .ok_or(InjectError::MarkersNotFound)?;

    let line_start = template[..start].rfind('\n').map_or(0, |i| i + 1);
    let margin = &template[line_start..start];
    let margin = if margin.chars().all(char::is_whitespace) {
        margin
    } else {
        ""
    };

    let call = render_call(env, options);
    Ok(format!(
        "{}\n{}\n{}{}",
        &template[..region_start],
        indent_with(&call, margin, 0),
        margin,
        &template[end..]
    ))
}

/// Rewrite a template file in place
pub fn inject_file(
    path: &Path,
    env: &[(String, String)],
    options: &TranslateOptions,
) -> Result<(), InjectError> {
    let template = fs::read_to_string(path)?;
    let rendered = inject(&template, env, options)?;
    fs::write(path, rendered)?;
    Ok(())
}

fn pairs(env: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}
