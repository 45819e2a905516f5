use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectDocumentPayload {
    pub review_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StorageDownloadQuery {
    pub expires: i64,
    pub signature: String,
}
