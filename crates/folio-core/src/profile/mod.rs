//! Profile domain: the static record behind every persona reply.

pub mod model;
pub mod repository;

pub use model::{
    About, Contact, ExperienceEntry, Hero, ProfileRecord, ProjectEntry, ProjectLinks, SocialLink,
};
pub use repository::ProfileRepository;
