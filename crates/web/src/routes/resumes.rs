//! Résumé route handlers.
//!
//! These routes require authentication. The guard is optimistic: it only
//! checks that a user is stored in the session. The backend remains
//! authoritative, and a rejected bearer token surfaces as a 401 that the
//! session-expiry middleware turns into the login redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use vitae_core::{Resume, ResumeId, Theme, theme::THEMES};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::form::{FormAction, FormErrors, ResumeForm, apply_action};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Résumé display data for the list page.
#[derive(Clone)]
pub struct ResumeCard {
    pub id: ResumeId,
    pub title: String,
    pub full_name: String,
    pub updated_at: String,
}

impl From<Resume> for ResumeCard {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id.unwrap_or(ResumeId::new(0)),
            title: resume.title,
            full_name: resume.full_name,
            updated_at: resume
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the PDF proxy.
#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    pub theme: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Résumé list page template.
#[derive(Template, WebTemplate)]
#[template(path = "resumes/list.html")]
pub struct ListTemplate {
    pub user_email: String,
    pub resumes: Vec<ResumeCard>,
}

/// Résumé editor page template, shared by create and edit.
#[derive(Template, WebTemplate)]
#[template(path = "resumes/form.html")]
pub struct FormTemplate {
    pub user_email: String,
    pub heading: &'static str,
    pub action_path: String,
    pub resume: Resume,
    pub errors: FormErrors,
}

/// Delete confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "resumes/delete.html")]
pub struct DeleteTemplate {
    pub user_email: String,
    pub id: ResumeId,
    pub title: String,
}

/// Theme picker page template.
#[derive(Template, WebTemplate)]
#[template(path = "resumes/themes.html")]
pub struct ThemesTemplate {
    pub user_email: String,
    pub id: ResumeId,
    pub title: String,
    pub themes: &'static [Theme],
}

// =============================================================================
// List
// =============================================================================

/// Display the résumé list.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<ListTemplate, AppError> {
    let resumes = state.api().list_resumes(&user.access_token).await?;

    Ok(ListTemplate {
        user_email: user.email,
        resumes: resumes.into_iter().map(ResumeCard::from).collect(),
    })
}

// =============================================================================
// Create
// =============================================================================

/// Display the editor with a blank résumé.
pub async fn new_page(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    FormTemplate {
        user_email: user.email,
        heading: "New resume",
        action_path: "/resumes/new".to_owned(),
        resume: Resume::blank(),
        errors: FormErrors::default(),
    }
}

/// Handle the editor form on the create path.
///
/// Add/remove actions reshape the in-progress résumé and re-render without
/// persisting anything; save validates and creates it in the backend.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ResumeForm>,
) -> Result<Response, AppError> {
    let action = form.form_action();
    let errors = match action {
        FormAction::Save => form.validate(),
        _ => FormErrors::default(),
    };
    let mut resume = form.into_resume();

    match action {
        FormAction::Save if errors.is_empty() => {
            state.api().create_resume(&user.access_token, &resume).await?;
            Ok(Redirect::to("/resumes").into_response())
        }
        _ => {
            apply_action(&mut resume, action);
            Ok(FormTemplate {
                user_email: user.email,
                heading: "New resume",
                action_path: "/resumes/new".to_owned(),
                resume,
                errors,
            }
            .into_response())
        }
    }
}

// =============================================================================
// Edit
// =============================================================================

/// Display the editor with an existing résumé.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ResumeId>,
) -> Result<FormTemplate, AppError> {
    let resume = state.api().get_resume(&user.access_token, id).await?;

    Ok(FormTemplate {
        user_email: user.email,
        heading: "Edit resume",
        action_path: format!("/resumes/{id}/edit"),
        resume,
        errors: FormErrors::default(),
    })
}

/// Handle the editor form on the edit path.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ResumeId>,
    Form(form): Form<ResumeForm>,
) -> Result<Response, AppError> {
    let action = form.form_action();
    let errors = match action {
        FormAction::Save => form.validate(),
        _ => FormErrors::default(),
    };
    let mut resume = form.into_resume();
    resume.id = Some(id);

    match action {
        FormAction::Save if errors.is_empty() => {
            state
                .api()
                .update_resume(&user.access_token, id, &resume)
                .await?;
            Ok(Redirect::to("/resumes").into_response())
        }
        _ => {
            apply_action(&mut resume, action);
            Ok(FormTemplate {
                user_email: user.email,
                heading: "Edit resume",
                action_path: format!("/resumes/{id}/edit"),
                resume,
                errors,
            }
            .into_response())
        }
    }
}

// =============================================================================
// Delete
// =============================================================================

/// Display the delete confirmation page.
pub async fn delete_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ResumeId>,
) -> Result<DeleteTemplate, AppError> {
    let resume = state.api().get_resume(&user.access_token, id).await?;

    Ok(DeleteTemplate {
        user_email: user.email,
        id,
        title: resume.title,
    })
}

/// Delete a résumé and return to the list.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ResumeId>,
) -> Result<Redirect, AppError> {
    state.api().delete_resume(&user.access_token, id).await?;
    Ok(Redirect::to("/resumes"))
}

// =============================================================================
// PDF Export
// =============================================================================

/// Display the theme picker for PDF export.
pub async fn themes(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ResumeId>,
) -> Result<ThemesTemplate, AppError> {
    let resume = state.api().get_resume(&user.access_token, id).await?;

    Ok(ThemesTemplate {
        user_email: user.email,
        id,
        title: resume.title,
        themes: &THEMES,
    })
}

/// Proxy the rendered PDF from the backend.
///
/// The bearer token never reaches the browser, so the download has to go
/// through us rather than linking to the backend directly. Unknown theme
/// IDs fall back to the default theme.
pub async fn pdf(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ResumeId>,
    Query(query): Query<PdfQuery>,
) -> Result<Response, AppError> {
    let theme = Theme::find_or_default(query.theme.as_deref().unwrap_or_default());

    let resume = state.api().get_resume(&user.access_token, id).await?;
    let bytes = state
        .api()
        .download_pdf(&user.access_token, id, theme.id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", pdf_filename(&resume.title, id)),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Attachment filename derived from the résumé title.
///
/// Restricted to a header-safe character set; an empty result falls back
/// to the résumé ID.
fn pdf_filename(title: &str, id: ResumeId) -> String {
    let slug: String = title
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        format!("resume-{id}.pdf")
    } else {
        format!("{slug}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_filename_from_title() {
        assert_eq!(
            pdf_filename("Backend Engineer CV", ResumeId::new(3)),
            "Backend-Engineer-CV.pdf"
        );
        assert_eq!(pdf_filename("résumé ☃", ResumeId::new(3)), "rsum.pdf");
        assert_eq!(pdf_filename("  ", ResumeId::new(3)), "resume-3.pdf");
    }
}
