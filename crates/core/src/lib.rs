//! Vitae Core - Shared types library.
//!
//! This crate provides common types used across the Vitae components:
//! - `web` - The résumé builder web client
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`resume`] - The résumé data model with structured section entries
//! - [`sections`] - Serializer/deserializer pair for list-valued sections
//! - [`theme`] - The static PDF theme catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod resume;
pub mod sections;
pub mod theme;
pub mod types;

pub use resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry, Resume,
    SectionTitles,
};
pub use theme::{Palette, Theme};
pub use types::*;
