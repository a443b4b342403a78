//! The résumé editor form.
//!
//! The editor is a single form covering the contact block and six
//! repeatable sections. Every submit carries an `action` field: `save`
//! persists the résumé, while `add:<section>` and `remove:<section>:<idx>`
//! reshape the in-progress document and re-render the form without saving.
//! Repeated input names (`exp_title`, `skill`, ...) arrive as one `Vec`
//! per field, which [`ResumeForm::into_resume`] zips back into entries.

use serde::Deserialize;

use vitae_core::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry, Resume,
    SectionTitles,
    sections::{add_entry, remove_entry},
};

/// One of the six repeatable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Languages,
    Projects,
    Certifications,
}

impl Section {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "experience" => Some(Self::Experience),
            "education" => Some(Self::Education),
            "skills" => Some(Self::Skills),
            "languages" => Some(Self::Languages),
            "projects" => Some(Self::Projects),
            "certifications" => Some(Self::Certifications),
            _ => None,
        }
    }
}

/// What a form submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Validate and persist.
    Save,
    /// Append a blank entry to a section; re-render without saving.
    Add(Section),
    /// Remove the entry at an index; re-render without saving.
    Remove(Section, usize),
}

impl FormAction {
    /// Parse the `action` field value.
    ///
    /// Anything unrecognized falls back to `Save`; a malformed add/remove
    /// never drops user input, it just saves it.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("add"), Some(name), None) => match Section::parse(name) {
                Some(section) => Self::Add(section),
                None => Self::Save,
            },
            (Some("remove"), Some(name), Some(index)) => {
                match (Section::parse(name), index.parse::<usize>()) {
                    (Some(section), Ok(index)) => Self::Remove(section, index),
                    _ => Self::Save,
                }
            }
            _ => Self::Save,
        }
    }
}

/// Raw editor form fields.
///
/// Repeatable-section inputs repeat their name once per entry, so those
/// fields deserialize to a `Vec<String>` with one element per row.
#[derive(Debug, Default, Deserialize)]
pub struct ResumeForm {
    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub photo: String,

    #[serde(default)]
    pub exp_title: Vec<String>,
    #[serde(default)]
    pub exp_company: Vec<String>,
    #[serde(default)]
    pub exp_location: Vec<String>,
    #[serde(default)]
    pub exp_start: Vec<String>,
    #[serde(default)]
    pub exp_end: Vec<String>,
    #[serde(default)]
    pub exp_description: Vec<String>,

    #[serde(default)]
    pub edu_degree: Vec<String>,
    #[serde(default)]
    pub edu_school: Vec<String>,
    #[serde(default)]
    pub edu_field: Vec<String>,
    #[serde(default)]
    pub edu_start: Vec<String>,
    #[serde(default)]
    pub edu_end: Vec<String>,

    #[serde(default)]
    pub skill: Vec<String>,

    #[serde(default)]
    pub lang_name: Vec<String>,
    #[serde(default)]
    pub lang_proficiency: Vec<String>,

    #[serde(default)]
    pub proj_name: Vec<String>,
    #[serde(default)]
    pub proj_description: Vec<String>,
    #[serde(default)]
    pub proj_link: Vec<String>,

    #[serde(default)]
    pub cert_name: Vec<String>,
    #[serde(default)]
    pub cert_issuer: Vec<String>,
    #[serde(default)]
    pub cert_year: Vec<String>,
}

/// Validation messages keyed by fixed field, rendered inline next to the
/// inputs.
#[derive(Debug, Default)]
pub struct FormErrors {
    pub title: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FormErrors {
    /// Whether every field passed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

/// Phone numbers may contain digits, spaces, and `+ - ( )`.
fn is_valid_phone(phone: &str) -> bool {
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
}

fn field(values: &[String], index: usize) -> String {
    values.get(index).cloned().unwrap_or_default()
}

fn row_count(lengths: &[usize]) -> usize {
    lengths.iter().copied().max().unwrap_or(0)
}

impl ResumeForm {
    /// The action this submission requests.
    #[must_use]
    pub fn form_action(&self) -> FormAction {
        FormAction::parse(&self.action)
    }

    /// Reassemble the structured résumé from the flat form fields.
    ///
    /// Sections come back with at least one entry each so the editor always
    /// has a row to render, matching the blank-résumé shape.
    #[must_use]
    pub fn into_resume(self) -> Resume {
        let experience: Vec<ExperienceEntry> = (0..row_count(&[
            self.exp_title.len(),
            self.exp_company.len(),
            self.exp_location.len(),
            self.exp_start.len(),
            self.exp_end.len(),
            self.exp_description.len(),
        ]))
            .map(|i| ExperienceEntry {
                title: field(&self.exp_title, i),
                company: field(&self.exp_company, i),
                location: field(&self.exp_location, i),
                start_date: field(&self.exp_start, i),
                end_date: field(&self.exp_end, i),
                description: field(&self.exp_description, i),
            })
            .collect();

        let education: Vec<EducationEntry> = (0..row_count(&[
            self.edu_degree.len(),
            self.edu_school.len(),
            self.edu_field.len(),
            self.edu_start.len(),
            self.edu_end.len(),
        ]))
            .map(|i| EducationEntry {
                degree: field(&self.edu_degree, i),
                school: field(&self.edu_school, i),
                field: field(&self.edu_field, i),
                start_date: field(&self.edu_start, i),
                end_date: field(&self.edu_end, i),
            })
            .collect();

        let languages: Vec<LanguageEntry> = (0..row_count(&[
            self.lang_name.len(),
            self.lang_proficiency.len(),
        ]))
            .map(|i| LanguageEntry {
                name: field(&self.lang_name, i),
                proficiency: field(&self.lang_proficiency, i),
            })
            .collect();

        let projects: Vec<ProjectEntry> = (0..row_count(&[
            self.proj_name.len(),
            self.proj_description.len(),
            self.proj_link.len(),
        ]))
            .map(|i| ProjectEntry {
                name: field(&self.proj_name, i),
                description: field(&self.proj_description, i),
                link: field(&self.proj_link, i),
            })
            .collect();

        let certifications: Vec<CertificationEntry> = (0..row_count(&[
            self.cert_name.len(),
            self.cert_issuer.len(),
            self.cert_year.len(),
        ]))
            .map(|i| CertificationEntry {
                name: field(&self.cert_name, i),
                issuer: field(&self.cert_issuer, i),
                year: field(&self.cert_year, i),
            })
            .collect();

        let mut resume = Resume {
            title: self.title,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            city: self.city,
            summary: self.summary,
            photo: if self.photo.trim().is_empty() {
                None
            } else {
                Some(self.photo)
            },
            experience,
            education,
            skills: self.skill,
            languages,
            projects,
            certifications,
            section_titles: SectionTitles::default(),
            ..Resume::default()
        };

        ensure_min_one(&mut resume);
        resume
    }

    /// Validate the fields that must hold before saving.
    ///
    /// Validation is only a usability aid; the backend re-validates and
    /// its rejections surface through the normal error path.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.title = Some("A resume title is required.".to_owned());
        }
        if self.full_name.trim().is_empty() {
            errors.full_name = Some("Your full name is required.".to_owned());
        }
        if let Err(e) = self.email.parse::<vitae_core::Email>() {
            errors.email = Some(format!("Email address: {e}."));
        }
        if !self.phone.trim().is_empty() && !is_valid_phone(&self.phone) {
            errors.phone =
                Some("Phone number may only contain digits, spaces, and + - ( ).".to_owned());
        }

        errors
    }
}

/// Apply an add/remove action to the in-progress résumé.
pub fn apply_action(resume: &mut Resume, action: FormAction) {
    match action {
        FormAction::Save => {}
        FormAction::Add(section) => match section {
            Section::Experience => add_entry(&mut resume.experience),
            Section::Education => add_entry(&mut resume.education),
            Section::Skills => resume.skills.push(String::new()),
            Section::Languages => add_entry(&mut resume.languages),
            Section::Projects => add_entry(&mut resume.projects),
            Section::Certifications => add_entry(&mut resume.certifications),
        },
        FormAction::Remove(section, index) => {
            match section {
                Section::Experience => remove_entry(&mut resume.experience, index),
                Section::Education => remove_entry(&mut resume.education, index),
                Section::Skills => remove_entry(&mut resume.skills, index),
                Section::Languages => remove_entry(&mut resume.languages, index),
                Section::Projects => remove_entry(&mut resume.projects, index),
                Section::Certifications => remove_entry(&mut resume.certifications, index),
            };
        }
    }
}

fn ensure_min_one(resume: &mut Resume) {
    if resume.experience.is_empty() {
        resume.experience.push(ExperienceEntry::default());
    }
    if resume.education.is_empty() {
        resume.education.push(EducationEntry::default());
    }
    if resume.skills.is_empty() {
        resume.skills.push(String::new());
    }
    if resume.languages.is_empty() {
        resume.languages.push(LanguageEntry::default());
    }
    if resume.projects.is_empty() {
        resume.projects.push(ProjectEntry::default());
    }
    if resume.certifications.is_empty() {
        resume.certifications.push(CertificationEntry::default());
    }
}
