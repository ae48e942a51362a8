//! Prompt validation, applied before anything is sent upstream.

const MIN_PROMPT_CHARS: usize = 3;
const MAX_PROMPT_CHARS: usize = 2000;

/// Validates a user prompt. Returns the rejection reason, or `None` when
/// the prompt is acceptable. Advisory only; the caller decides whether to
/// reject the request.
///
/// Checks run in order and the first failure wins: emptiness, then the
/// minimum (on the trimmed prompt), then the maximum. The maximum counts
/// the UNTRIMMED prompt, so surrounding whitespace eats into the limit.
/// That asymmetry is long-standing observable behavior; the boundary tests
/// below pin it rather than fixing it silently. The "must be text" check
/// has no runtime counterpart here: the handler deserializes the prompt as
/// a JSON string, so non-textual input is rejected at the transport
/// boundary.
pub fn validate_prompt(prompt: &str) -> Option<&'static str> {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return Some("Prompt cannot be empty");
    }

    if trimmed.chars().count() < MIN_PROMPT_CHARS {
        return Some("Prompt too short (minimum 3 characters)");
    }

    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Some("Prompt too long (maximum 2000 characters)");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_prompt() {
        assert_eq!(validate_prompt("Explain lifetimes in Rust"), None);
    }

    #[test]
    fn test_accepts_minimum_length() {
        assert_eq!(validate_prompt("abc"), None);
    }

    #[test]
    fn test_accepts_prompt_with_surrounding_whitespace() {
        assert_eq!(validate_prompt("  what is axum?  "), None);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_prompt(""), Some("Prompt cannot be empty"));
    }

    #[test]
    fn test_rejects_whitespace_only() {
        assert_eq!(validate_prompt("   \n\t "), Some("Prompt cannot be empty"));
    }

    #[test]
    fn test_rejects_too_short() {
        assert_eq!(
            validate_prompt("ab"),
            Some("Prompt too short (minimum 3 characters)")
        );
    }

    #[test]
    fn test_minimum_applies_to_trimmed_length() {
        assert_eq!(
            validate_prompt("  ab  "),
            Some("Prompt too short (minimum 3 characters)")
        );
    }

    #[test]
    fn test_accepts_exactly_max_length() {
        assert_eq!(validate_prompt(&"a".repeat(2000)), None);
    }

    #[test]
    fn test_rejects_over_max_length() {
        assert_eq!(
            validate_prompt(&"a".repeat(2001)),
            Some("Prompt too long (maximum 2000 characters)")
        );
    }

    #[test]
    fn test_maximum_counts_surrounding_whitespace() {
        // Trimmed length is fine (3 chars) but the untrimmed prompt is 2001
        // chars. The limit is computed pre-trim.
        let prompt = format!("abc{}", " ".repeat(1998));
        assert_eq!(
            validate_prompt(&prompt),
            Some("Prompt too long (maximum 2000 characters)")
        );
    }

    #[test]
    fn test_overlong_whitespace_only_reports_empty() {
        // Emptiness is checked first, so an all-whitespace prompt reports
        // empty even when it also exceeds the length limit.
        assert_eq!(
            validate_prompt(&" ".repeat(2001)),
            Some("Prompt cannot be empty")
        );
    }

    #[test]
    fn test_length_counted_in_chars_not_bytes() {
        // 2000 multibyte chars are within the limit.
        assert_eq!(validate_prompt(&"é".repeat(2000)), None);
    }
}
