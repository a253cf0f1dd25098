//! Small text utilities used when assembling prompts.

/// Maximum prompt length accepted by the image generation endpoint.
pub const MAX_IMAGE_PROMPT_LENGTH: usize = 2_000;

/// Truncate `text` to at most `max_chars` characters, preferring to end
/// on a complete sentence.
///
/// Text that already fits is returned unchanged. Otherwise the text is
/// cut at `max_chars`; if that cut contains a `.` after the first
/// character, everything up to and including the last `.` is kept.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut_at = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let truncated = &text[..cut_at];

    match truncated.rfind('.') {
        Some(pos) if pos > 0 => truncated[..=pos].to_string(),
        _ => truncated.to_string(),
    }
}

/// Whether a quality-check review flags the assets as failing.
///
/// The review is free text, so any mention of "fail" or "error"
/// (case-insensitive) counts.
pub fn quality_check_failed(review: &str) -> bool {
    let lower = review.to_lowercase();
    lower.contains("fail") || lower.contains("error")
}

/// Take the first `n` characters of `text`.
pub fn first_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}
