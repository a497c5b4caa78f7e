use regex::Regex;
use std::sync::LazyLock;

static JSON_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Pull the first JSON-list-looking region out of a model reply. Models often
/// wrap the list in prose or code fences even when told not to.
pub fn extract_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY.find(text).map(|m| m.as_str())
}

/// Parse entity names out of a free-form key-entity reply.
///
/// Accepts one name per line, with optional "Key Entity:" prefixes and
/// surrounding quotes. Anything that looks like prose rather than a name
/// (long lines, full sentences) is dropped, as is the literal "NONE", so a
/// malformed reply degrades to an empty list instead of an error.
pub fn parse_entity_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        let line = line
            .strip_prefix("Key Entity:")
            .or_else(|| line.strip_prefix("Key entity:"))
            .unwrap_or(line);
        let line = line.trim().trim_matches(|c| c == '"' || c == '\'').trim();

        if line.is_empty() || line.eq_ignore_ascii_case("none") {
            continue;
        }
        // Entity names are short; a long line is the model explaining itself.
        if line.len() > 80 || line.split_whitespace().count() > 8 {
            continue;
        }
        names.push(line.to_string());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_array_surrounded_by_prose() {
        let reply = "Here is the list:\n[{\"question\": \"q\", \"answer\": \"a\"}]\nDone.";
        assert_eq!(
            extract_json_array(reply),
            Some("[{\"question\": \"q\", \"answer\": \"a\"}]")
        );
    }

    #[test]
    fn no_array_means_none() {
        assert_eq!(extract_json_array("I could not parse that."), None);
    }

    #[test]
    fn parses_bare_name() {
        assert_eq!(parse_entity_names("Grant's Tomb"), vec!["Grant's Tomb"]);
    }

    #[test]
    fn strips_prefix_and_quotes() {
        assert_eq!(
            parse_entity_names("Key Entity: \"Battle of Agincourt\""),
            vec!["Battle of Agincourt"]
        );
    }

    #[test]
    fn none_reply_is_empty() {
        assert!(parse_entity_names("NONE").is_empty());
        assert!(parse_entity_names("").is_empty());
    }

    #[test]
    fn prose_reply_is_empty() {
        let reply = "I think the key entity here would probably be related to the novel that \
                     Sally Rooney published in 2024, which takes its title from a chess term.";
        assert!(parse_entity_names(reply).is_empty());
    }

    #[test]
    fn multiline_reply_keeps_order() {
        let reply = "Jeet Kune Do\nBruce Lee";
        assert_eq!(parse_entity_names(reply), vec!["Jeet Kune Do", "Bruce Lee"]);
    }
}
