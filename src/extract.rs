//! Turns a free-text request ("I have chicken, rice and tomato") into a list
//! of lower-cased ingredient tokens.

/// Phrases that introduce the ingredient list, in priority order
const MARKERS: [&str; 4] = ["i have", "ingredients:", "i've got", "i got"];

/// Longest token kept, in characters
pub const MAX_TOKEN_CHARS: usize = 30;

/// Extract ingredient tokens from free text.
///
/// Returns an empty vec when nothing usable is found; the caller decides
/// how to report that.
pub fn extract_ingredients(context: &str) -> Vec<String> {
    if context.is_empty() {
        return Vec::new();
    }

    let cleaned = clean(&context.to_lowercase());
    let text = strip_marker(&cleaned);

    let pieces: Vec<&str> = if text.contains(',') {
        text.split(',').collect()
    } else {
        text.split_whitespace().collect()
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && piece.chars().count() <= MAX_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Replace everything except word characters, whitespace and commas with a space
fn clean(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() || c == ',' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Drop everything up to and including the first marker phrase found.
///
/// Markers are compared in their cleaned form since punctuation is gone by
/// the time this runs. The first marker in priority order that occurs
/// anywhere wins, not the one occurring earliest in the text.
fn strip_marker(text: &str) -> &str {
    for marker in MARKERS {
        let marker = clean(marker);
        if let Some(pos) = text.find(&marker) {
            return &text[pos + marker.len()..];
        }
    }
    text
}
