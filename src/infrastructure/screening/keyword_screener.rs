use crate::domain::moderation::entity::ContentType;

use super::traits::ContentScreener;

/// Flag emitted when an event's age range leaves [0, 18].
pub const FLAG_AGE_RANGE: &str = "age_range_issue";

/// Flag emitted when an event misses title, location or start date.
pub const FLAG_MISSING_FIELDS: &str = "missing_required_fields";

/// Flag emitted when a comment embeds a URL.
pub const FLAG_CONTAINS_LINK: &str = "contains_link";

const MIN_EVENT_AGE: i64 = 0;
const MAX_EVENT_AGE: i64 = 18;

/// Terms never acceptable in a family-events app, matched against the
/// serialized payload. Single words match on word boundaries, phrases
/// as substrings.
const DISALLOWED_TERMS: &[&str] = &[
    "hate speech",
    "kill yourself",
    "lynch",
    "genocide",
    "terrorist",
    "nude",
    "porn",
    "casino",
    "gambling",
    "free money",
    "crypto giveaway",
    "click here",
];

/// Default [`ContentScreener`]: a disallowed-keyword scan over the
/// serialized content plus a handful of structural checks per content
/// type. Deterministic and side-effect free.
pub struct KeywordScreener {
    terms: Vec<String>,
}

impl Default for KeywordScreener {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl KeywordScreener {
    /// Build a screener with `extra_terms` appended to the built-in
    /// list (see `GovernanceConfig::extra_blocked_keywords`).
    pub fn new(extra_terms: &[String]) -> Self {
        let mut terms: Vec<String> = DISALLOWED_TERMS.iter().map(|t| t.to_string()).collect();
        terms.extend(
            extra_terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty()),
        );
        Self { terms }
    }

    fn keyword_flags(&self, payload: &serde_json::Value, out: &mut Vec<String>) {
        let serialized = payload.to_string();
        let normalized = normalize_text(&serialized);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        for term in &self.terms {
            let hit = if term.contains(' ') {
                normalized.contains(term.as_str())
            } else {
                tokens.iter().any(|token| token == term)
            };
            if hit {
                out.push(format!("contains_{}", term.replace(' ', "_")));
            }
        }
    }

    fn event_flags(payload: &serde_json::Value, out: &mut Vec<String>) {
        let age_out_of_range = ["minAge", "maxAge"].iter().any(|field| {
            payload
                .get(field)
                .and_then(serde_json::Value::as_i64)
                .is_some_and(|age| !(MIN_EVENT_AGE..=MAX_EVENT_AGE).contains(&age))
        });
        if age_out_of_range {
            out.push(FLAG_AGE_RANGE.to_string());
        }

        let missing_required = ["title", "location", "startDate"].iter().any(|field| {
            match payload.get(field) {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            }
        });
        if missing_required {
            out.push(FLAG_MISSING_FIELDS.to_string());
        }
    }

    fn comment_flags(payload: &serde_json::Value, out: &mut Vec<String>) {
        let text = payload
            .get("text")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        if text.contains("http://") || text.contains("https://") {
            out.push(FLAG_CONTAINS_LINK.to_string());
        }
    }
}

impl ContentScreener for KeywordScreener {
    fn screen(&self, content_type: ContentType, payload: &serde_json::Value) -> Vec<String> {
        let mut flags = Vec::new();
        self.keyword_flags(payload, &mut flags);

        match content_type {
            ContentType::Event => Self::event_flags(payload, &mut flags),
            ContentType::Comment => Self::comment_flags(payload, &mut flags),
            ContentType::Profile | ContentType::Venue => {}
        }

        flags
    }
}

/// Lowercase, strip everything that is not alphanumeric or whitespace,
/// collapse runs of whitespace. Defeats trivial punctuation evasion.
fn normalize_text(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch.is_whitespace() {
            normalized.push(ch.to_ascii_lowercase());
        } else {
            normalized.push(' ');
        }
    }
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_event_produces_no_flags() {
        let screener = KeywordScreener::default();
        let flags = screener.screen(
            ContentType::Event,
            &json!({
                "title": "Puppet theatre afternoon",
                "location": "Stadtpark",
                "startDate": "2026-09-01T14:00:00Z",
                "minAge": 3,
                "maxAge": 10,
            }),
        );
        assert!(flags.is_empty(), "unexpected flags: {:?}", flags);
    }

    #[test]
    fn keyword_hits_flag_once_per_term() {
        let screener = KeywordScreener::default();
        let flags = screener.screen(
            ContentType::Comment,
            &json!({ "text": "CASINO!!! casino, free money" }),
        );
        assert_eq!(
            flags,
            vec!["contains_casino".to_string(), "contains_free_money".to_string()]
        );
    }

    #[test]
    fn missing_fields_and_bad_age_range_both_flag() {
        let screener = KeywordScreener::default();
        let flags = screener.screen(
            ContentType::Event,
            &json!({ "location": "Zoo", "startDate": "2026-09-01", "minAge": -1 }),
        );
        assert!(flags.contains(&FLAG_AGE_RANGE.to_string()));
        assert!(flags.contains(&FLAG_MISSING_FIELDS.to_string()));
    }

    #[test]
    fn blank_required_field_counts_as_missing() {
        let screener = KeywordScreener::default();
        let flags = screener.screen(
            ContentType::Event,
            &json!({ "title": "   ", "location": "Zoo", "startDate": "2026-09-01" }),
        );
        assert_eq!(flags, vec![FLAG_MISSING_FIELDS.to_string()]);
    }

    #[test]
    fn comment_with_url_is_flagged() {
        let screener = KeywordScreener::default();
        let flags = screener.screen(
            ContentType::Comment,
            &json!({ "text": "see https://example.com/deals" }),
        );
        assert_eq!(flags, vec![FLAG_CONTAINS_LINK.to_string()]);
    }

    #[test]
    fn extra_terms_from_config_are_honored() {
        let screener = KeywordScreener::new(&[" Raffle ".to_string()]);
        let flags = screener.screen(
            ContentType::Venue,
            &json!({ "description": "win big at our raffle" }),
        );
        assert_eq!(flags, vec!["contains_raffle".to_string()]);
    }

    #[test]
    fn profiles_get_keyword_scan_but_no_structural_checks() {
        let screener = KeywordScreener::default();
        let flags = screener.screen(ContentType::Profile, &json!({ "bio": "" }));
        assert!(flags.is_empty());
    }
}
