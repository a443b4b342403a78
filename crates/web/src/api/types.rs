//! Wire types for the résumé backend API and conversions to domain types.
//!
//! The backend stores list-valued sections as JSON text blobs inside the
//! résumé document. `ResumeDoc` is that wire shape; conversions to and from
//! [`vitae_core::Resume`] run through the section codec, which defines the
//! fallback for malformed blobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitae_core::sections::{decode_entries, encode_entries};
use vitae_core::{Resume, SectionTitles};

/// Response from `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Response from `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub id: i32,
    pub email: String,
}

/// Error body returned by the backend (`{"detail": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: String,
}

/// A résumé document as the backend sends and receives it.
///
/// List sections are JSON-array strings; per-section display titles have
/// server-side defaults and may be absent on older documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub city: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    #[serde(default)]
    pub languages: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub certifications: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "default_summary_title")]
    pub summary_title: String,
    #[serde(default = "default_experience_title")]
    pub experience_title: String,
    #[serde(default = "default_education_title")]
    pub education_title: String,
    #[serde(default = "default_skills_title")]
    pub skills_title: String,
    #[serde(default = "default_projects_title")]
    pub projects_title: String,
    #[serde(default = "default_certifications_title")]
    pub certifications_title: String,
    #[serde(default = "default_languages_title")]
    pub languages_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
}

fn default_summary_title() -> String {
    SectionTitles::default().summary
}
fn default_experience_title() -> String {
    SectionTitles::default().experience
}
fn default_education_title() -> String {
    SectionTitles::default().education
}
fn default_skills_title() -> String {
    SectionTitles::default().skills
}
fn default_projects_title() -> String {
    SectionTitles::default().projects
}
fn default_certifications_title() -> String {
    SectionTitles::default().certifications
}
fn default_languages_title() -> String {
    SectionTitles::default().languages
}

impl From<ResumeDoc> for Resume {
    fn from(doc: ResumeDoc) -> Self {
        Self {
            id: doc.id.map(Into::into),
            title: doc.title,
            full_name: doc.full_name,
            email: doc.email,
            phone: doc.phone,
            city: doc.city,
            summary: doc.summary,
            photo: doc.photo,
            experience: decode_entries(&doc.experience),
            education: decode_entries(&doc.education),
            skills: decode_entries(&doc.skills),
            languages: decode_entries(&doc.languages),
            projects: decode_entries(&doc.projects),
            certifications: decode_entries(&doc.certifications),
            section_titles: SectionTitles {
                summary: doc.summary_title,
                experience: doc.experience_title,
                education: doc.education_title,
                skills: doc.skills_title,
                projects: doc.projects_title,
                certifications: doc.certifications_title,
                languages: doc.languages_title,
            },
            updated_at: doc.updated_at,
            user_id: doc.user_id.map(Into::into),
        }
    }
}

impl From<&Resume> for ResumeDoc {
    fn from(resume: &Resume) -> Self {
        Self {
            id: resume.id.map(Into::into),
            title: resume.title.clone(),
            full_name: resume.full_name.clone(),
            email: resume.email.clone(),
            phone: resume.phone.clone(),
            city: resume.city.clone(),
            summary: resume.summary.clone(),
            experience: encode_entries(&resume.experience),
            education: encode_entries(&resume.education),
            skills: encode_entries(&resume.skills),
            languages: encode_entries(&resume.languages),
            projects: encode_entries(&resume.projects),
            certifications: encode_entries(&resume.certifications),
            photo: resume.photo.clone(),
            summary_title: resume.section_titles.summary.clone(),
            experience_title: resume.section_titles.experience.clone(),
            education_title: resume.section_titles.education.clone(),
            skills_title: resume.section_titles.skills.clone(),
            projects_title: resume.section_titles.projects.clone(),
            certifications_title: resume.section_titles.certifications.clone(),
            languages_title: resume.section_titles.languages.clone(),
            updated_at: resume.updated_at,
            user_id: resume.user_id.map(Into::into),
        }
    }
}
