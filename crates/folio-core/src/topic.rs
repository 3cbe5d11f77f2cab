//! Closed classification buckets for fallback responses.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Classification bucket for free-text input.
///
/// The declaration order is not the matching priority; see
/// [`Topic::PRIORITY`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Topic {
    About,
    Experience,
    Projects,
    Skills,
    Contact,
    Education,
    InterviewStyle,
    Unknown,
}

impl Topic {
    /// Matching order for keyword classification, first match wins.
    ///
    /// Interview-style questions go first: their keywords overlap with the
    /// narrower topics ("teamwork" contains "work").
    pub const PRIORITY: [Topic; 7] = [
        Topic::InterviewStyle,
        Topic::Experience,
        Topic::Projects,
        Topic::Skills,
        Topic::Contact,
        Topic::Education,
        Topic::About,
    ];
}

/// Quick navigation actions offered next to the chat input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Me,
    Projects,
    Skills,
    Fun,
    Contact,
}

impl Category {
    /// The canned question sent to the remote model for this category.
    pub fn prompt(&self) -> &'static str {
        match self {
            Category::Me => "Tell me about your background and current role.",
            Category::Projects => "What are your most significant projects?",
            Category::Skills => "What are your primary technical skills and areas of expertise?",
            Category::Fun => "What are your interests and hobbies outside of work?",
            Category::Contact => "How can someone contact you professionally?",
        }
    }

    /// Button icon shown by the UI.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Me => "👤",
            Category::Projects => "💼",
            Category::Skills => "🛠️",
            Category::Fun => "🎮",
            Category::Contact => "✉️",
        }
    }
}
