//! Recovery of article arrays that were cut off mid-stream.
//!
//! Long generations are regularly truncated by output limits. When that
//! happens the text still starts with `[` but stops somewhere inside a record.
//! Everything up to the last record that closed cleanly is kept, and the array
//! is closed behind it.

use gp_core::{Article, Error, Result};

/// Parse a generated article array, repairing a truncated one when possible.
pub fn repair(raw: &str) -> Result<Vec<Article>> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let parse_error = match serde_json::from_str::<Vec<Article>>(text) {
        Ok(articles) => return Ok(articles),
        Err(e) => e,
    };

    if !(text.starts_with('[') && !text.ends_with(']')) {
        return Err(Error::CorruptResponse(format!("response is not an article list: {}", parse_error)));
    }

    tracing::warn!("JSON parse error ({}), attempting to repair truncated response", parse_error);

    let cut = last_complete_record_end(text).ok_or_else(|| {
        Error::CorruptResponse("malformed response without a single complete record".to_string())
    })?;
    let repaired = format!("{}]", &text[..cut]);

    serde_json::from_str::<Vec<Article>>(&repaired).map_err(|e| {
        Error::CorruptResponse(format!("malformed and unrepairable response: {}", e))
    })
}

/// Byte offset just past the last `}` that closes a top-level array element.
fn last_complete_record_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut last = None;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if c == '}' && depth == 1 {
                    last = Some(i + 1);
                }
            }
            _ => {}
        }
    }

    last
}
