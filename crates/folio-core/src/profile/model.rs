//! ProfileRecord domain model.
//!
//! The static biographical document that backs the system prompt and every
//! fallback template. It is loaded once at startup and shared read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static biographical and professional data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub hero: Hero,
    pub about: About,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub contact: Contact,
}

/// Identity fields shown at the top of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    /// Greeting-style name, e.g. "Hi, I'm Jane Doe".
    pub name: String,
    pub role: String,
    pub intro: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub description: String,
    pub education: String,
    pub interests: Vec<String>,
}

/// One position in the work history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    /// Network key (`linkedin`, `github`, ...) to profile URL.
    pub socials: BTreeMap<String, String>,
}

/// A social profile link with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub url: &'a str,
}

impl ProfileRecord {
    /// The person's name without the greeting prefix.
    ///
    /// `"Hi, I'm Jane Doe"` yields `"Jane Doe"`; a bare name is returned
    /// unchanged.
    pub fn display_name(&self) -> &str {
        let name = self.hero.name.as_str();
        match name.split_once("I'm ") {
            Some((_, rest)) if !rest.trim().is_empty() => rest.trim(),
            _ => name.trim(),
        }
    }

    /// The most recent position, if any.
    pub fn current_position(&self) -> Option<&ExperienceEntry> {
        self.experience.first()
    }

    /// Social links in stable key order.
    pub fn social_links(&self) -> impl Iterator<Item = SocialLink<'_>> {
        self.contact.socials.iter().map(|(key, url)| SocialLink {
            key,
            label: social_label(key),
            url,
        })
    }
}

fn social_label(key: &str) -> &str {
    match key.to_ascii_lowercase().as_str() {
        "linkedin" => "LinkedIn",
        "github" => "GitHub",
        "gitlab" => "GitLab",
        "portfolio" | "website" => "Portfolio",
        "twitter" | "x" => "Twitter",
        "medium" => "Medium",
        _ => key,
    }
}
