//! Editing session over one promotion.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{EditorError, EditorResult};
use crate::models::Promotion;
use crate::validation::{
    PROMOTION_SECTIONS, PromotionSection, ValidationContext, ValidationIssue, validate_promotion,
};
use crate::wire::{inbound, outbound};

use super::ports::{Navigator, Notifier, PromotionApi};

/// Whether the session creates a promotion or edits a persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// The draft has never been saved.
    Create,
    /// The draft mirrors the promotion with this identifier.
    Edit {
        /// Backend identifier.
        id: i64,
    },
}

/// Result of [`PromotionEditor::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The backend accepted the promotion.
    Saved {
        /// Identifier of the saved promotion.
        id: i64,
    },
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// The backend reported validation issues.
    Rejected,
    /// The backend could not be reached or failed; the draft is unchanged.
    Failed,
}

/// One editing session.
///
/// The session exclusively owns its draft. `save` and `delete` take
/// `&mut self`, so a session never has two saves in flight.
///
/// # Example
///
/// ```
/// use promotion_editor::editor::{
///     InMemoryPromotionApi, PromotionEditor, RecordingNavigator, RecordingNotifier, SaveOutcome,
/// };
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let api = InMemoryPromotionApi::new();
/// let notifier = RecordingNotifier::new();
/// let navigator = RecordingNavigator::new();
/// let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let mut editor = PromotionEditor::new_draft();
/// let outcome = editor.save(&api, &notifier, &navigator, today).await;
///
/// assert_eq!(outcome, SaveOutcome::Invalid);
/// assert!(!editor.issues().is_empty());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct PromotionEditor {
    draft: Promotion,
    baseline: Promotion,
    mode: EditMode,
    issues: Vec<ValidationIssue>,
}

impl PromotionEditor {
    /// Starts a session on an empty draft.
    pub fn new_draft() -> Self {
        let draft = Promotion::new();
        Self {
            baseline: draft.clone(),
            draft,
            mode: EditMode::Create,
            issues: Vec::new(),
        }
    }

    /// Starts a session on a persisted promotion.
    ///
    /// A missing promotion sends the author back to the listing.
    pub async fn load(
        api: &dyn PromotionApi,
        navigator: &dyn Navigator,
        id: i64,
    ) -> EditorResult<Self> {
        let wire = match api.fetch(id).await {
            Ok(wire) => wire,
            Err(err) => {
                warn!(promotion_id = id, error = %err, "Failed to load promotion");
                if matches!(err, EditorError::PromotionNotFound { .. }) {
                    navigator.to_listing();
                }
                return Err(err);
            }
        };

        let mut draft = inbound(wire)?;
        draft.id = Some(id);
        info!(promotion_id = id, lines = draft.lines.len(), "Loaded promotion");

        Ok(Self {
            baseline: draft.clone(),
            draft,
            mode: EditMode::Edit { id },
            issues: Vec::new(),
        })
    }

    /// The draft being edited.
    pub fn draft(&self) -> &Promotion {
        &self.draft
    }

    /// Mutable access to the draft.
    pub fn draft_mut(&mut self) -> &mut Promotion {
        &mut self.draft
    }

    /// Current mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Whether the draft differs from what was last loaded or saved.
    ///
    /// Drafts are compared in their outbound shape, so whitespace and
    /// data the backend never receives do not count.
    pub fn is_dirty(&self) -> bool {
        outbound(&self.draft) != outbound(&self.baseline)
    }

    /// Issues from the last validation or save.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issues grouped by editor section.
    pub fn issues_by_section(&self) -> BTreeMap<PromotionSection, Vec<&ValidationIssue>> {
        PROMOTION_SECTIONS.group(&self.issues)
    }

    /// Section holding the first issue.
    pub fn first_issue_section(&self) -> Option<PromotionSection> {
        PROMOTION_SECTIONS.first_section(&self.issues)
    }

    fn context(&self, today: NaiveDate) -> ValidationContext {
        match self.mode {
            EditMode::Create => ValidationContext::for_new(today),
            EditMode::Edit { .. } => ValidationContext::for_existing(today),
        }
    }

    /// Validates the draft and keeps the issues. Returns `true` when valid.
    pub fn validate(&mut self, today: NaiveDate) -> bool {
        self.issues = validate_promotion(&self.draft, self.context(today));
        self.issues.is_empty()
    }

    fn merge_issues(&mut self, issues: Vec<ValidationIssue>) {
        for issue in issues {
            if !self.issues.contains(&issue) {
                self.issues.push(issue);
            }
        }
    }

    /// Validates, then creates or updates the promotion.
    ///
    /// Backend validation issues join the issue list. Any other failure
    /// is reported through the notifier and leaves the draft untouched so
    /// the author can retry.
    pub async fn save(
        &mut self,
        api: &dyn PromotionApi,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
        today: NaiveDate,
    ) -> SaveOutcome {
        if !self.validate(today) {
            warn!(issues = self.issues.len(), "Promotion draft is invalid");
            notifier.error("Veuillez corriger les erreurs avant d'enregistrer");
            return SaveOutcome::Invalid;
        }

        let document = outbound(&self.draft);
        let result = match self.mode {
            EditMode::Create => api.create(&document).await,
            EditMode::Edit { id } => api.update(id, &document).await.map(|()| id),
        };

        match result {
            Ok(id) => {
                let created = self.mode == EditMode::Create;
                self.draft.id = Some(id);
                self.mode = EditMode::Edit { id };
                self.baseline = self.draft.clone();
                info!(promotion_id = id, created, code = %document.code, "Promotion saved");
                notifier.success("Promotion enregistrée");
                if created {
                    navigator.to_promotion(id);
                }
                SaveOutcome::Saved { id }
            }
            Err(EditorError::ServerRejected { issues }) => {
                warn!(issues = issues.len(), "Promotion rejected by the server");
                self.merge_issues(issues);
                notifier.error("Le serveur a refusé la promotion");
                SaveOutcome::Rejected
            }
            Err(err) => {
                warn!(error = %err, "Failed to save promotion");
                notifier.error(&format!("Échec de l'enregistrement : {err}"));
                SaveOutcome::Failed
            }
        }
    }

    /// Deletes the persisted promotion and returns to the listing.
    pub async fn delete(
        &mut self,
        api: &dyn PromotionApi,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> EditorResult<()> {
        let EditMode::Edit { id } = self.mode else {
            return Err(EditorError::NotPersisted);
        };

        match api.delete(id).await {
            Ok(()) => {
                info!(promotion_id = id, "Promotion deleted");
                notifier.success("Promotion supprimée");
                navigator.to_listing();
                Ok(())
            }
            Err(err) => {
                warn!(promotion_id = id, error = %err, "Failed to delete promotion");
                notifier.error(&format!("Échec de la suppression : {err}"));
                Err(err)
            }
        }
    }
}
