//! The résumé data model.
//!
//! A résumé has a fixed contact section plus six list-valued sections edited
//! as repeatable sub-forms. Entries are structured records here; the wire
//! format the backend expects (JSON text blobs per section) is handled by
//! [`crate::sections`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ResumeId, UserId};

/// A single work-experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub description: String,
}

/// A single education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub field: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

/// A spoken-language entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub proficiency: String,
}

/// A personal-project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: String,
}

/// A certification entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub year: String,
}

/// Display titles for the rendered PDF sections.
///
/// The backend stores these per résumé; they are preserved round-trip but
/// not edited in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTitles {
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub certifications: String,
    pub languages: String,
}

impl Default for SectionTitles {
    fn default() -> Self {
        Self {
            summary: "PROFILE".to_owned(),
            experience: "EXPERIENCE".to_owned(),
            education: "EDUCATION".to_owned(),
            skills: "SKILLS".to_owned(),
            projects: "PROJECTS".to_owned(),
            certifications: "CERTIFICATIONS".to_owned(),
            languages: "LANGUAGES".to_owned(),
        }
    }
}

/// A résumé record.
///
/// `id`, `user_id`, and `updated_at` are assigned server-side and absent on
/// documents that have not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: Option<ResumeId>,
    pub title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub summary: String,
    pub photo: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<LanguageEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub section_titles: SectionTitles,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: Option<UserId>,
}

impl Resume {
    /// An empty résumé with one blank entry per repeatable section,
    /// ready for the editor form.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            skills: vec![String::new()],
            languages: vec![LanguageEntry::default()],
            projects: vec![ProjectEntry::default()],
            certifications: vec![CertificationEntry::default()],
            ..Self::default()
        }
    }
}
