//! Keyword classification of free-text chat input.

use folio_core::Topic;

/// Keyword set for a topic. A keyword matches lower-cased input where it
/// starts a word, so "work" matches "working" but not "framework".
pub fn keywords(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::InterviewStyle => &[
            "challenge",
            "weakness",
            "strength",
            "teamwork",
            "team",
            "conflict",
            "failure",
            "mistake",
            "proud",
            "why should we hire",
            "where do you see yourself",
            "motivat",
            "pressure",
        ],
        Topic::Experience => &["experience", "work", "job", "career", "company", "role"],
        Topic::Projects => &["project", "portfolio", "built"],
        Topic::Skills => &["skill", "technolog", "tech stack", "language", "framework"],
        Topic::Contact => &[
            "contact",
            "email",
            "reach you",
            "reach out",
            "get in touch",
            "linkedin",
            "github",
        ],
        Topic::Education => &["education", "study", "degree", "university", "college"],
        Topic::About => &[
            "about you",
            "yourself",
            "who are you",
            "background",
            "interest",
            "hobby",
            "hobbies",
        ],
        Topic::Unknown => &[],
    }
}

/// Classifies input into a topic, first match in [`Topic::PRIORITY`] wins.
pub fn classify(input: &str) -> Topic {
    let input = input.to_lowercase();
    let topic = Topic::PRIORITY
        .into_iter()
        .find(|topic| matches_any(&input, keywords(*topic)))
        .unwrap_or(Topic::Unknown);
    tracing::debug!(%topic, "Classified chat input");
    topic
}

pub(crate) fn matches_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|keyword| contains_at_word_start(lowered, keyword))
}

fn contains_at_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|prev| !prev.is_alphanumeric())
    })
}
