use serde::{Deserialize, Serialize};

use crate::models::document::DocumentStatus;
use crate::models::profile::ApplicationStatus;
use crate::services::review_rules::ReviewSummary;

/// Consultant-initiated moves through the recruitment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    StartEvaluation,
    Approve,
    RequestUpdate,
    Reject,
    Reopen,
}

impl StatusAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusAction::StartEvaluation => "start_evaluation",
            StatusAction::Approve => "approve",
            StatusAction::RequestUpdate => "request_update",
            StatusAction::Reject => "reject",
            StatusAction::Reopen => "reopen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Profile is not a candidate application")]
    NotAnApplication,

    #[error("Cannot {} an application in {} status", .action.as_str(), .from.label())]
    InvalidTransition {
        from: ApplicationStatus,
        action: StatusAction,
    },

    #[error("Application has no documents to approve")]
    NoDocuments,

    #[error("All documents must be approved before approving the application")]
    DocumentsNotApproved,

    #[error("All documents must be reviewed before requesting an update")]
    DocumentsPendingReview,

    #[error("At least one document must be rejected to request an update")]
    NoRejectedDocuments,

    #[error("A rejection reason is required")]
    MissingRejectionReason,
}

/// Result of a successful guard check: the state to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub rejection_reason: Option<String>,
}

/// Checks `action` against the current status and the application's
/// document review states, returning the status to write.
pub fn plan_transition(
    current: Option<ApplicationStatus>,
    action: StatusAction,
    documents: &[Option<DocumentStatus>],
    reason: Option<&str>,
) -> Result<TransitionPlan, TransitionError> {
    use ApplicationStatus::*;

    let from = current.ok_or(TransitionError::NotAnApplication)?;
    let summary = ReviewSummary::from_statuses(documents.iter().copied());
    let mut rejection_reason = None;

    let to = match (from, action) {
        (NewApplication | UpdateRequired, StatusAction::StartEvaluation) => Evaluation,
        (Evaluation, StatusAction::Approve) => {
            if summary.total == 0 {
                return Err(TransitionError::NoDocuments);
            }
            if !summary.all_approved() {
                return Err(TransitionError::DocumentsNotApproved);
            }
            Approved
        }
        (Evaluation, StatusAction::RequestUpdate) => {
            if !summary.all_reviewed() {
                return Err(TransitionError::DocumentsPendingReview);
            }
            if !summary.any_rejected() {
                return Err(TransitionError::NoRejectedDocuments);
            }
            UpdateRequired
        }
        (Evaluation, StatusAction::Reject) => {
            let reason = reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or(TransitionError::MissingRejectionReason)?;
            rejection_reason = Some(reason.to_string());
            Rejected
        }
        (Approved, StatusAction::Reopen) => UpdateRequired,
        (from, action) => return Err(TransitionError::InvalidTransition { from, action }),
    };

    Ok(TransitionPlan {
        from,
        to,
        rejection_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    const APPROVED: Option<DocumentStatus> = Some(DocumentStatus::Approved);
    const REJECTED: Option<DocumentStatus> = Some(DocumentStatus::Rejected);
    const PENDING: Option<DocumentStatus> = None;

    #[test]
    fn new_application_moves_to_evaluation_without_documents() {
        let plan = plan_transition(Some(NewApplication), StatusAction::StartEvaluation, &[], None)
            .unwrap();
        assert_eq!(plan.to, Evaluation);
        assert_eq!(plan.from, NewApplication);
    }

    #[test]
    fn update_required_returns_to_evaluation() {
        let plan = plan_transition(Some(UpdateRequired), StatusAction::StartEvaluation, &[], None)
            .unwrap();
        assert_eq!(plan.to, Evaluation);
    }

    #[test]
    fn approve_requires_documents() {
        assert_eq!(
            plan_transition(Some(Evaluation), StatusAction::Approve, &[], None),
            Err(TransitionError::NoDocuments)
        );
    }

    #[test]
    fn approve_requires_every_document_approved() {
        assert_eq!(
            plan_transition(Some(Evaluation), StatusAction::Approve, &[APPROVED, PENDING], None),
            Err(TransitionError::DocumentsNotApproved)
        );
        assert_eq!(
            plan_transition(Some(Evaluation), StatusAction::Approve, &[APPROVED, REJECTED], None),
            Err(TransitionError::DocumentsNotApproved)
        );
        let plan =
            plan_transition(Some(Evaluation), StatusAction::Approve, &[APPROVED, APPROVED], None)
                .unwrap();
        assert_eq!(plan.to, Approved);
    }

    #[test]
    fn request_update_requires_all_reviewed() {
        assert_eq!(
            plan_transition(
                Some(Evaluation),
                StatusAction::RequestUpdate,
                &[REJECTED, PENDING],
                None
            ),
            Err(TransitionError::DocumentsPendingReview)
        );
    }

    #[test]
    fn request_update_requires_a_rejection() {
        assert_eq!(
            plan_transition(
                Some(Evaluation),
                StatusAction::RequestUpdate,
                &[APPROVED, APPROVED],
                None
            ),
            Err(TransitionError::NoRejectedDocuments)
        );
        let plan = plan_transition(
            Some(Evaluation),
            StatusAction::RequestUpdate,
            &[APPROVED, REJECTED],
            None,
        )
        .unwrap();
        assert_eq!(plan.to, UpdateRequired);
    }

    #[test]
    fn reject_requires_reason() {
        assert_eq!(
            plan_transition(Some(Evaluation), StatusAction::Reject, &[], None),
            Err(TransitionError::MissingRejectionReason)
        );
        assert_eq!(
            plan_transition(Some(Evaluation), StatusAction::Reject, &[], Some("   ")),
            Err(TransitionError::MissingRejectionReason)
        );
        let plan = plan_transition(
            Some(Evaluation),
            StatusAction::Reject,
            &[PENDING],
            Some(" No driving licence "),
        )
        .unwrap();
        assert_eq!(plan.to, Rejected);
        assert_eq!(plan.rejection_reason.as_deref(), Some("No driving licence"));
    }

    #[test]
    fn approved_can_be_reopened_unconditionally() {
        let plan = plan_transition(Some(Approved), StatusAction::Reopen, &[PENDING], None).unwrap();
        assert_eq!(plan.to, UpdateRequired);
    }

    #[test]
    fn rejects_transitions_outside_the_graph() {
        let cases = [
            (NewApplication, StatusAction::Approve),
            (NewApplication, StatusAction::Reject),
            (Approved, StatusAction::Approve),
            (Rejected, StatusAction::StartEvaluation),
            (Rejected, StatusAction::Reopen),
            (Evaluation, StatusAction::Reopen),
            (UpdateRequired, StatusAction::Approve),
        ];
        for (from, action) in cases {
            assert_eq!(
                plan_transition(Some(from), action, &[APPROVED], Some("reason")),
                Err(TransitionError::InvalidTransition { from, action }),
                "{from:?} --{action:?}-->"
            );
        }
    }

    #[test]
    fn non_candidate_profiles_have_no_transitions() {
        assert_eq!(
            plan_transition(None, StatusAction::StartEvaluation, &[], None),
            Err(TransitionError::NotAnApplication)
        );
    }

    #[test]
    fn invalid_transition_message_names_the_states() {
        let err = TransitionError::InvalidTransition {
            from: Rejected,
            action: StatusAction::Reopen,
        };
        assert_eq!(
            err.to_string(),
            "Cannot reopen an application in REJECTED status"
        );
    }
}
