// Output formatting — terminal display and text normalization.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Cap for normalized display text.
const CLEAN_TEXT_MAX: usize = 500;

/// Normalize scraped text for display: collapse whitespace runs, strip
/// everything but word characters, spaces, and hyphens, cap the length.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len().min(CLEAN_TEXT_MAX));
    let mut count = 0usize;
    let mut last_was_space = true;
    for c in text.chars() {
        if count >= CLEAN_TEXT_MAX {
            break;
        }
        if c.is_whitespace() {
            if !last_was_space {
                cleaned.push(' ');
                count += 1;
                last_was_space = true;
            }
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            cleaned.push(c);
            count += 1;
            last_was_space = false;
        }
    }
    cleaned.trim_end().to_string()
}
