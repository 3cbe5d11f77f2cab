//! Persona system prompt built from the profile record.
//!
//! The prompt is derived only from [`ProfileRecord`]; nothing the chat user
//! types can reach it.

use folio_core::ProfileRecord;
use std::fmt::Write;

/// Renders the system prompt that pins the remote model to the persona.
pub fn build_system_prompt(profile: &ProfileRecord) -> String {
    let name = profile.display_name();
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are an AI assistant representing {name}, a {role}.",
        role = profile.hero.role
    );
    let _ = writeln!(
        prompt,
        "\nIMPORTANT: You are NOT a general-purpose assistant. You only know {name}'s resume \
         data and must ONLY answer questions about {name}'s professional background, skills, \
         projects, and experience."
    );

    prompt.push_str("\nResume data:\n\n");
    let _ = writeln!(prompt, "About: {}", profile.about.description);
    let _ = writeln!(prompt, "Education: {}", profile.about.education);
    let _ = writeln!(prompt, "Interests: {}", profile.about.interests.join(", "));

    if let Some(current) = profile.current_position() {
        let _ = writeln!(
            prompt,
            "\nCurrent Role: {} at {}",
            current.role, current.company
        );
        let _ = writeln!(
            prompt,
            "Key Responsibilities: {}",
            current.responsibilities.join(" ")
        );
    }

    let previous: Vec<String> = profile
        .experience
        .iter()
        .skip(1)
        .take(2)
        .map(|exp| format!("{} at {} ({})", exp.role, exp.company, exp.duration))
        .collect();
    if !previous.is_empty() {
        let _ = writeln!(prompt, "\nPrevious Experience: {}", previous.join(", "));
    }

    let projects: Vec<String> = profile
        .projects
        .iter()
        .map(|project| format!("{}: {}", project.title, project.description))
        .collect();
    let _ = writeln!(prompt, "\nKey Projects: {}", projects.join(" "));
    let _ = writeln!(prompt, "\nSkills: {}", profile.skills.join(", "));
    let _ = writeln!(prompt, "\nAchievements: {}", profile.achievements.join(", "));

    prompt.push_str("\nContact Information:\n");
    let _ = writeln!(prompt, "Email: {}", profile.contact.email);
    for link in profile.social_links() {
        let _ = writeln!(prompt, "{}: {}", link.label, link.url);
    }

    prompt.push_str("\nGuidelines:\n");
    let _ = writeln!(
        prompt,
        "1. Always respond in the first person as if you are {name}."
    );
    prompt.push_str("2. Keep responses professional yet conversational.\n");
    prompt.push_str("3. Be concise and stay focused on the resume data above.\n");
    let _ = writeln!(
        prompt,
        "4. If asked something unrelated to the resume, reply: \"I'm an AI representation of \
         {name}'s professional experience and can only answer questions related to my \
         background, skills, and career. Please ask me something about my professional \
         experience instead.\""
    );
    prompt.push_str("5. Highlight the achievements and projects most relevant to the question.\n");
    prompt.push_str(
        "6. If asked about technologies not listed, redirect to the skills that are listed.\n",
    );
    prompt.push_str("7. Use confident but not boastful language.\n");
    let _ = writeln!(
        prompt,
        "8. Always format contact details as markdown links, e.g. [{email}](mailto:{email}).",
        email = profile.contact.email
    );

    prompt
}
