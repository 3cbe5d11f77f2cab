//! Multi-section markdown replies for the quick navigation categories.
//!
//! Unlike the free-text templates these may randomize presentation (which
//! skills become highlight tags, which interest is featured). The random
//! source is supplied by the caller so tests can seed it.

use folio_core::{Category, ProfileRecord};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt::Write;

const MIN_HIGHLIGHTS: usize = 3;
const MAX_HIGHLIGHTS: usize = 5;
const MAX_FEATURED_PROJECTS: usize = 3;

/// Renders the structured reply for a quick navigation category.
pub fn respond_to_category<R: Rng>(
    category: Category,
    profile: &ProfileRecord,
    rng: &mut R,
) -> String {
    match category {
        Category::Me => me_section(profile),
        Category::Projects => projects_section(profile),
        Category::Skills => skills_section(profile, rng),
        Category::Fun => fun_section(profile, rng),
        Category::Contact => contact_section(profile),
    }
}

/// Picks between three and five distinct skills from the profile.
pub fn pick_highlight_skills<'a, R: Rng>(profile: &'a ProfileRecord, rng: &mut R) -> Vec<&'a str> {
    let available = profile.skills.len();
    if available == 0 {
        return Vec::new();
    }
    let wanted = rng.gen_range(MIN_HIGHLIGHTS..=MAX_HIGHLIGHTS).min(available);
    profile
        .skills
        .choose_multiple(rng, wanted)
        .map(String::as_str)
        .collect()
}

fn me_section(profile: &ProfileRecord) -> String {
    let mut out = String::from("### About Me\n\n");
    let name = profile.display_name();
    if !name.is_empty() {
        let role = non_empty_or(&profile.hero.role, "developer");
        let _ = writeln!(out, "I'm **{name}**, working as a {role}.\n");
    }
    push_paragraph(&mut out, &profile.about.description);

    if let Some(current) = profile.current_position() {
        let _ = writeln!(
            out,
            "**Currently:** {} at {} ({})\n",
            current.role, current.company, current.duration
        );
        if !current.responsibilities.is_empty() {
            out.push_str("#### What I Do\n");
            push_bullets(&mut out, &current.responsibilities);
        }
    }

    if !profile.about.education.trim().is_empty() {
        out.push_str("#### Education\n");
        push_paragraph(&mut out, &profile.about.education);
    }
    finish(out)
}

fn projects_section(profile: &ProfileRecord) -> String {
    let mut out = String::from("### Featured Projects\n\n");
    if profile.projects.is_empty() {
        out.push_str("I'm putting the finishing touches on a few projects. Check back soon!\n");
        return finish(out);
    }

    for project in profile.projects.iter().take(MAX_FEATURED_PROJECTS) {
        let _ = writeln!(out, "#### {}", project.title);
        push_paragraph(&mut out, &project.description);
        if !project.tech.is_empty() {
            let _ = writeln!(out, "**Tech:** {}\n", tag_list(project.tech.iter().map(String::as_str)));
        }
        let mut links = Vec::new();
        if let Some(github) = &project.links.github {
            links.push(format!("[Source]({github})"));
        }
        if let Some(live) = &project.links.live {
            links.push(format!("[Live Demo]({live})"));
        }
        if !links.is_empty() {
            let _ = writeln!(out, "{}\n", links.join(" · "));
        }
    }

    let remaining = profile.projects.len().saturating_sub(MAX_FEATURED_PROJECTS);
    if remaining > 0 {
        let _ = writeln!(out, "_...and {remaining} more on my portfolio._");
    }
    finish(out)
}

fn skills_section<R: Rng>(profile: &ProfileRecord, rng: &mut R) -> String {
    let mut out = String::from("### Skills & Expertise\n\n");
    let highlights = pick_highlight_skills(profile, rng);
    if highlights.is_empty() {
        out.push_str("I'm always picking up new tools; ask me about any technology.\n");
        return finish(out);
    }

    let _ = writeln!(out, "**Highlights:** {}\n", tag_list(highlights.iter().copied()));
    out.push_str("#### Full Toolkit\n");
    push_bullets(&mut out, &profile.skills);

    if !profile.achievements.is_empty() {
        out.push_str("#### Achievements\n");
        push_bullets(&mut out, &profile.achievements);
    }
    finish(out)
}

fn fun_section<R: Rng>(profile: &ProfileRecord, rng: &mut R) -> String {
    let mut out = String::from("### Beyond Work\n\n");
    let interests = &profile.about.interests;
    if interests.is_empty() {
        out.push_str("When I'm not working, I'm usually exploring new technologies.\n");
        return finish(out);
    }

    out.push_str("When I'm not working, you'll find me enjoying:\n");
    push_bullets(&mut out, interests);
    if let Some(featured) = interests.choose(rng) {
        let _ = writeln!(out, "Lately I've been especially into **{featured}**.");
    }
    finish(out)
}

fn contact_section(profile: &ProfileRecord) -> String {
    let mut out = String::from("### Get in Touch\n\n");
    let email = profile.contact.email.trim();
    let mut lines = Vec::new();
    if !email.is_empty() {
        lines.push(format!("**Email:** [{email}](mailto:{email})"));
    }
    lines.extend(
        profile
            .social_links()
            .map(|link| format!("**{}:** [{}]({})", link.label, link.label, link.url)),
    );

    if lines.is_empty() {
        out.push_str("Use the contact form on this site and I'll get back to you.\n");
    } else {
        push_bullets(&mut out, &lines);
        out.push_str("I usually reply within a couple of days.\n");
    }
    finish(out)
}

fn tag_list<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.map(|tag| format!("`{tag}`")).collect::<Vec<_>>().join(" ")
}

fn push_paragraph(out: &mut String, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        out.push_str(text);
        out.push_str("\n\n");
    }
}

fn push_bullets<S: AsRef<str>>(out: &mut String, items: &[S]) {
    for item in items {
        let _ = writeln!(out, "- {}", item.as_ref());
    }
    out.push('\n');
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

fn finish(out: String) -> String {
    out.trim_end().to_string()
}
