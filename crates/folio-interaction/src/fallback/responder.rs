//! Deterministic single-reply templates for free-text input.
//!
//! Every function here is total: any profile, including an empty one,
//! produces non-empty text.

use folio_core::{ProfileRecord, Topic};

use super::classifier::{classify, matches_any};

/// Interview-style sub-themes, checked in this order.
const WEAKNESS_KEYWORDS: &[&str] = &["weakness", "improve"];
const CHALLENGE_KEYWORDS: &[&str] = &["challenge", "failure", "mistake", "pressure"];
const TEAMWORK_KEYWORDS: &[&str] = &["teamwork", "team", "conflict", "collaborat"];
const STRENGTH_KEYWORDS: &[&str] = &["strength", "proud", "why should we hire"];

/// Fills the template for `topic` from `profile`.
pub fn respond(topic: Topic, profile: &ProfileRecord) -> String {
    match topic {
        Topic::Unknown => introduction(profile),
        Topic::About => about(profile),
        Topic::Experience => experience(profile),
        Topic::Projects => projects(profile),
        Topic::Skills => skills(profile),
        Topic::Contact => contact(profile),
        Topic::Education => education(profile),
        Topic::InterviewStyle => interview_general(profile),
    }
}

/// Classifies `input` and answers it, routing interview-style questions to
/// the narrative that matches their sub-theme.
pub fn respond_to_input(input: &str, profile: &ProfileRecord) -> String {
    match classify(input) {
        Topic::InterviewStyle => respond_to_interview(input, profile),
        topic => respond(topic, profile),
    }
}

fn respond_to_interview(input: &str, profile: &ProfileRecord) -> String {
    let lowered = input.to_lowercase();
    if matches_any(&lowered, WEAKNESS_KEYWORDS) {
        interview_weakness(profile)
    } else if matches_any(&lowered, CHALLENGE_KEYWORDS) {
        interview_challenge(profile)
    } else if matches_any(&lowered, TEAMWORK_KEYWORDS) {
        interview_teamwork(profile)
    } else if matches_any(&lowered, STRENGTH_KEYWORDS) {
        interview_strength(profile)
    } else {
        interview_general(profile)
    }
}

fn introduction(profile: &ProfileRecord) -> String {
    let name = profile.display_name();
    let greeting = if name.is_empty() {
        "Hi there!".to_string()
    } else {
        format!("Hi, I'm {name}.")
    };
    join_sentences(&greeting, &profile.hero.intro)
}

fn about(profile: &ProfileRecord) -> String {
    let interests = &profile.about.interests;
    let mut reply = profile.about.description.trim().to_string();
    if !interests.is_empty() {
        let line = format!(
            "Outside of work, I'm interested in {}.",
            interests.join(", ")
        );
        reply = join_sentences(&reply, &line);
    }
    if reply.is_empty() {
        introduction(profile)
    } else {
        reply
    }
}

fn experience(profile: &ProfileRecord) -> String {
    match profile.current_position() {
        Some(current) => {
            let lead = format!("I'm currently a {} at {}.", current.role, current.company);
            let detail = current
                .responsibilities
                .first()
                .map(String::as_str)
                .unwrap_or_default();
            join_sentences(&lead, detail)
        }
        None => introduction(profile),
    }
}

fn projects(profile: &ProfileRecord) -> String {
    match profile.projects.first() {
        Some(project) => join_sentences(
            &format!("One of my notable projects is {}.", project.title),
            &project.description,
        ),
        None => introduction(profile),
    }
}

fn skills(profile: &ProfileRecord) -> String {
    if profile.skills.is_empty() {
        return introduction(profile);
    }
    let top: Vec<&str> = profile.skills.iter().take(5).map(String::as_str).collect();
    format!("My skills include {}, and more.", top.join(", "))
}

fn contact(profile: &ProfileRecord) -> String {
    let email = profile.contact.email.trim();
    let links: Vec<String> = profile
        .social_links()
        .map(|link| format!("[{}]({})", link.label, link.url))
        .collect();

    let mut reply = if email.is_empty() {
        String::from("You can find me online")
    } else {
        format!("You can reach me at [{email}](mailto:{email})")
    };
    if !links.is_empty() {
        reply.push_str(if email.is_empty() { " at " } else { " or connect with me on " });
        reply.push_str(&join_list(links.as_slice()));
    }
    reply.push('.');
    reply
}

fn education(profile: &ProfileRecord) -> String {
    let education = profile.about.education.trim();
    if education.is_empty() {
        introduction(profile)
    } else {
        education.to_string()
    }
}

fn interview_general(profile: &ProfileRecord) -> String {
    let role = non_empty_or(&profile.hero.role, "engineer");
    let lead = format!(
        "Great question. As a {role}, I try to pair careful engineering with clear communication."
    );
    join_sentences(&lead, &profile.about.description)
}

fn interview_weakness(profile: &ProfileRecord) -> String {
    let mut reply = String::from(
        "I can go too deep on details before stepping back to check priorities. \
         I've learned to timebox investigations and share progress early so the team can weigh in.",
    );
    if let Some(current) = profile.current_position() {
        reply.push_str(&format!(
            " That habit has made a real difference in my work at {}.",
            current.company
        ));
    }
    reply
}

fn interview_challenge(profile: &ProfileRecord) -> String {
    match profile.projects.first() {
        Some(project) => {
            let lead = format!(
                "One of my biggest challenges was building {}.",
                project.title
            );
            let body = join_sentences(&lead, &project.description);
            join_sentences(
                &body,
                "I broke the problem into small milestones, validated each one, and kept iterating until it held up.",
            )
        }
        None => String::from(
            "My biggest challenges have come from ambiguous requirements. \
             I handle them by breaking the problem into small milestones and validating each one early.",
        ),
    }
}

fn interview_teamwork(profile: &ProfileRecord) -> String {
    let lead = match profile.current_position() {
        Some(current) => format!(
            "At {}, I work closely with people across several teams.",
            current.company
        ),
        None => String::from("I enjoy working closely with people across teams."),
    };
    join_sentences(
        &lead,
        "When we disagree, I focus on shared goals, listen first, and back decisions with data.",
    )
}

fn interview_strength(profile: &ProfileRecord) -> String {
    let top: Vec<&str> = profile.skills.iter().take(3).map(String::as_str).collect();
    let mut reply = if top.is_empty() {
        String::from("My biggest strength is learning new tools quickly and applying them well.")
    } else {
        format!(
            "My biggest strength is combining {} to ship reliable work.",
            join_list(top.as_slice())
        )
    };
    if let Some(achievement) = profile.achievements.first() {
        reply = join_sentences(&reply, &format!("I'm especially proud of this: {achievement}"));
    }
    reply
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

/// Joins two sentences with a space, skipping blanks.
fn join_sentences(first: &str, second: &str) -> String {
    match (first.trim(), second.trim()) {
        ("", "") => String::new(),
        (a, "") => a.to_string(),
        ("", b) => b.to_string(),
        (a, b) => format!("{a} {b}"),
    }
}

/// "a", "a and b", "a, b and c".
fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|item| item.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}
