//! Submission of the create-experience form.

use karmandia_domain::error::KarmandiaError;
use karmandia_domain::experience::ExperienceDraft;
use karmandia_domain::notice::Notice;
use karmandia_domain::session::Credentials;
use karmandia_domain::validation::FormErrors;

use crate::ports::BackendApi;
use crate::services::resource_service::ResourceService;

/// Shown when the backend accepts the upload without a message of its own.
pub const CREATED_FALLBACK: &str = "Experience created successfully!";
/// Shown when the backend answers with a non-success status.
pub const CREATE_REJECTED: &str = "Experience creation failed";
pub const UNKNOWN_FAILURE: &str = "Something went wrong";

/// Result of one form submission.
#[derive(Debug)]
pub enum CreateOutcome {
    /// Validation failed locally; nothing was sent.
    Invalid {
        draft: ExperienceDraft,
        errors: FormErrors,
    },
    /// The backend stored the experience.
    Created { notice: Notice, redirect_to: String },
    /// The upload failed; the draft is handed back intact.
    Failed { draft: ExperienceDraft, notice: Notice },
}

/// Validates a draft and uploads it.
#[derive(Debug, Clone)]
pub struct CreateExperienceFlow {
    redirect_to: String,
}

impl CreateExperienceFlow {
    /// `redirect_to` is where the browser goes after a successful create.
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
        }
    }

    #[must_use]
    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    pub async fn submit<B: BackendApi>(
        &self,
        service: &ResourceService<B>,
        draft: ExperienceDraft,
        credentials: &Credentials,
    ) -> CreateOutcome {
        let experience = match draft.into_validated() {
            Ok(experience) => experience,
            Err((draft, errors)) => {
                tracing::debug!(%errors, "experience draft rejected");
                return CreateOutcome::Invalid { draft, errors };
            }
        };

        match service.create_experience(&experience, credentials).await {
            Ok(receipt) => {
                let message = receipt
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| CREATED_FALLBACK.to_string());
                tracing::info!(title = experience.title(), "experience created");
                CreateOutcome::Created {
                    notice: Notice::success(message),
                    redirect_to: self.redirect_to.clone(),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "experience upload failed");
                CreateOutcome::Failed {
                    draft: experience.into_draft(),
                    notice: Notice::error(failure_message(&err)),
                }
            }
        }
    }
}

/// User-facing text for a failed upload.
#[must_use]
pub fn failure_message(err: &KarmandiaError) -> String {
    match err {
        KarmandiaError::Rejected { .. } => CREATE_REJECTED.to_string(),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                UNKNOWN_FAILURE.to_string()
            } else {
                text
            }
        }
    }
}
