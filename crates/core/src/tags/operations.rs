use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes a candidate tag: surrounding whitespace trimmed, lowercased.
pub fn normalize_tag(candidate: &str) -> String {
    candidate.trim().to_lowercase()
}

/// Search key for matching: lowercased with diacritics stripped, so "de"
/// finds "Développement".
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Returns the new tag list with `candidate` appended, or `None` when the
/// candidate is empty after normalization, already present, or the list is full.
pub fn add_tag(tags: &[String], candidate: &str, max_tags: usize) -> Option<Vec<String>> {
    let tag = normalize_tag(candidate);
    if tag.is_empty() || tags.contains(&tag) || tags.len() >= max_tags {
        return None;
    }
    let mut next = tags.to_vec();
    next.push(tag);
    Some(next)
}

/// Returns the new tag list without `tag`, or `None` if it was not there.
pub fn remove_tag(tags: &[String], tag: &str) -> Option<Vec<String>> {
    if !tags.iter().any(|t| t == tag) {
        return None;
    }
    Some(tags.iter().filter(|t| *t != tag).cloned().collect())
}

/// Returns the new tag list without its most recent tag, or `None` if empty.
pub fn remove_last(tags: &[String]) -> Option<Vec<String>> {
    let (_, rest) = tags.split_last()?;
    Some(rest.to_vec())
}

/// Suggestions that contain `draft` (ignoring case and accents) and are not
/// selected yet. Matches are returned as written.
pub fn filter_suggestions<'a>(
    suggestions: &'a [String],
    draft: &str,
    tags: &[String],
) -> Vec<&'a str> {
    let needle = fold(draft);
    suggestions
        .iter()
        .filter(|s| fold(s).contains(&needle) && !tags.contains(&normalize_tag(s)))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Web Design "), "web design");
        assert_eq!(normalize_tag("   "), "");
    }

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold("Développement"), "developpement");
        assert_eq!(fold("ÉTÉ"), "ete");
        assert_eq!(fold("web"), "web");
    }

    #[test]
    fn test_add_tag_rejects_case_insensitive_duplicate() {
        let once = add_tag(&[], "Web", 10).unwrap();
        assert_eq!(once, tags(&["web"]));
        assert_eq!(add_tag(&once, " web ", 10), None);
    }

    #[test]
    fn test_add_tag_rejects_empty() {
        assert_eq!(add_tag(&tags(&["a"]), "  ", 10), None);
    }

    #[test]
    fn test_add_tag_respects_max() {
        let full = tags(&["a", "b"]);
        assert_eq!(add_tag(&full, "c", 2), None);
        assert_eq!(add_tag(&full, "c", 3), Some(tags(&["a", "b", "c"])));
    }

    #[test]
    fn test_remove_tag_any_position() {
        let current = tags(&["a", "b", "c"]);
        assert_eq!(remove_tag(&current, "b"), Some(tags(&["a", "c"])));
        assert_eq!(remove_tag(&current, "z"), None);
    }

    #[test]
    fn test_remove_last() {
        assert_eq!(remove_last(&tags(&["a", "b"])), Some(tags(&["a"])));
        assert_eq!(remove_last(&[]), None);
    }

    #[test]
    fn test_filter_suggestions_substring_case_insensitive() {
        let suggestions = tags(&["web", "design", "développement"]);
        assert_eq!(
            filter_suggestions(&suggestions, "de", &[]),
            vec!["design", "développement"]
        );
        assert_eq!(
            filter_suggestions(&suggestions, "DE", &[]),
            vec!["design", "développement"]
        );
    }

    #[test]
    fn test_filter_suggestions_accented_draft() {
        let suggestions = tags(&["web", "design", "Développement"]);
        assert_eq!(
            filter_suggestions(&suggestions, "dév", &[]),
            vec!["Développement"]
        );
    }

    #[test]
    fn test_filter_suggestions_excludes_selected() {
        let suggestions = tags(&["Design", "development"]);
        assert_eq!(
            filter_suggestions(&suggestions, "de", &tags(&["design"])),
            vec!["development"]
        );
    }
}
