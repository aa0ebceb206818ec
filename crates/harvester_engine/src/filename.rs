/// Longest title stem kept in a record file name, in characters.
const MAX_STEM_CHARS: usize = 80;
/// Byte budget for the stem; leaves room for `--{id}.json` under the common
/// 255-byte file name limit.
const MAX_STEM_BYTES: usize = 200;

/// Record file name: `{sanitized_title}--{id}.json`.
///
/// Titles can collide after sanitization; the id suffix keeps every record of
/// a run in its own file.
pub fn record_filename(id: usize, title: &str) -> String {
    format!("{}--{id}.json", sanitize_title(title))
}

/// Replaces characters that are illegal in file names with `_`, collapses
/// underscore runs and trims the result. Never returns an empty string.
pub fn sanitize_title(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let mut stem = String::new();
    for c in compacted
        .trim_matches(&['_', ' ', '.'][..])
        .chars()
        .take(MAX_STEM_CHARS)
    {
        if stem.len() + c.len_utf8() > MAX_STEM_BYTES {
            break;
        }
        stem.push(c);
    }
    // Cutting may expose a trailing separator.
    let stem = stem.trim_end_matches(&['_', ' ', '.'][..]).to_string();
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
