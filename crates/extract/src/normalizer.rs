use regex::Regex;
use std::sync::LazyLock;

static PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[.,!?;:'"()]"#).unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a mention for loose equality: lowercase, strip punctuation,
/// collapse whitespace. "Grant's Tomb" and "grants tomb" compare equal.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCT.replace_all(&lowered, "");
    SPACES.replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Jane Austen  "), "jane austen");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize("Grant's Tomb!"), "grants tomb");
    }

    #[test]
    fn collapses_spaces() {
        assert_eq!(normalize("Pride   and\tPrejudice"), "pride and prejudice");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize("  "), "");
    }
}
