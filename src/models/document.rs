use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Cv,
    Police,
    Residence,
    Kimlik,
    Diploma,
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CV" => Ok(DocumentType::Cv),
            "POLICE" => Ok(DocumentType::Police),
            "RESIDENCE" => Ok(DocumentType::Residence),
            "KIMLIK" => Ok(DocumentType::Kimlik),
            "DIPLOMA" => Ok(DocumentType::Diploma),
            other => Err(format!("Unknown document type: {}", other)),
        }
    }
}

/// Review outcome. A document with no status is pending review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub document_type: DocumentType,
    pub file_path: String,
    pub status: Option<DocumentStatus>,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_type_case_insensitively() {
        assert_eq!("kimlik".parse::<DocumentType>(), Ok(DocumentType::Kimlik));
        assert_eq!(" CV ".parse::<DocumentType>(), Ok(DocumentType::Cv));
        assert!("passport".parse::<DocumentType>().is_err());
    }
}
