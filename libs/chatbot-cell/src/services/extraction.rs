//! Pulls a doctor's name out of a free-text lookup request.
//!
//! Two patterns are tried in priority order:
//! 1. the words following a title, "dr", "dr." or "doctor" ([`name_after_title`])
//! 2. the words following "find", with any title words removed ([`name_after_find`])
//!
//! Both stop at the first character that is not an ASCII letter or whitespace,
//! so "find Dr. Lee?" yields "Lee".

use std::sync::LazyLock;

use regex::Regex;

use shared_utils::text::contains_any;

static TITLED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:dr\.?\s+|doctor\s+)([a-zA-Z\s]+)").expect("Invalid titled-name regex")
});

static FIND_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)find\s+([a-zA-Z\s]+)").expect("Invalid find-name regex"));

static TITLE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:doctor|dr\.?)\b").expect("Invalid title-word regex"));

/// True when the message asks to find a particular doctor. Expects lowercase.
pub fn is_doctor_lookup(lowered: &str) -> bool {
    lowered.contains("find") && contains_any(lowered, &["doctor", "dr"])
}

/// Pattern 1: "find Dr. John Lee" -> "John Lee".
pub fn name_after_title(text: &str) -> Option<String> {
    TITLED_NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Pattern 2: "find Lee doctor" -> "Lee".
pub fn name_after_find(text: &str) -> Option<String> {
    FIND_NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(&TITLE_WORD_RE.replace_all(m.as_str(), "")))
}

/// First non-empty candidate from the patterns above, in priority order.
pub fn extract_doctor_name(text: &str) -> Option<String> {
    name_after_title(text).or_else(|| name_after_find(text))
}

fn non_empty(candidate: &str) -> Option<String> {
    let collapsed = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}
