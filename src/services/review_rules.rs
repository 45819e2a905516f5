use crate::models::document::DocumentStatus;

pub const MIN_REJECTION_NOTES_CHARS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("Review notes must be at least {min} characters long")]
    NotesTooShort { min: usize },
}

/// Outcome a reviewer records against a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { notes: String },
}

impl ReviewDecision {
    /// Builds a rejection, trimming the notes and enforcing the minimum length.
    pub fn reject(notes: &str) -> Result<Self, ReviewError> {
        let trimmed = notes.trim();
        if trimmed.chars().count() < MIN_REJECTION_NOTES_CHARS {
            return Err(ReviewError::NotesTooShort {
                min: MIN_REJECTION_NOTES_CHARS,
            });
        }
        Ok(ReviewDecision::Reject {
            notes: trimmed.to_string(),
        })
    }

    pub fn status(&self) -> DocumentStatus {
        match self {
            ReviewDecision::Approve => DocumentStatus::Approved,
            ReviewDecision::Reject { .. } => DocumentStatus::Rejected,
        }
    }

    /// Notes persisted with the review. Approval clears them.
    pub fn notes(&self) -> Option<&str> {
        match self {
            ReviewDecision::Approve => None,
            ReviewDecision::Reject { notes } => Some(notes.as_str()),
        }
    }
}

/// Tally of document review states for one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

impl ReviewSummary {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Option<DocumentStatus>>,
    {
        statuses
            .into_iter()
            .fold(ReviewSummary::default(), |mut summary, status| {
                summary.total += 1;
                match status {
                    Some(DocumentStatus::Approved) => summary.approved += 1,
                    Some(DocumentStatus::Rejected) => summary.rejected += 1,
                    None => summary.pending += 1,
                }
                summary
            })
    }

    pub fn all_approved(&self) -> bool {
        self.total > 0 && self.approved == self.total
    }

    pub fn all_reviewed(&self) -> bool {
        self.pending == 0
    }

    pub fn any_rejected(&self) -> bool {
        self.rejected > 0
    }
}
