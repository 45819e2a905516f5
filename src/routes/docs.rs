use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::routes::{
    applications, assignments, documents, health, job_postings, profiles, sliders, storage,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Courier Staffing API", description = "Candidate applications, document review, job postings and site settings"),
    paths(
        health::health,
        health::ready,
        profiles::create_profile,
        profiles::me,
        profiles::middleman_candidates,
        applications::list_applications,
        applications::application_stats,
        applications::get_application,
        applications::delete_application,
        applications::transition_application,
        applications::application_history,
        documents::list_documents,
        documents::upload_document,
        documents::approve_document,
        documents::reject_document,
        documents::document_url,
        storage::download_document,
        job_postings::quote_job_posting,
        job_postings::create_job_posting,
        job_postings::list_job_postings,
        job_postings::get_job_posting,
        job_postings::update_job_posting_status,
        job_postings::list_assignments,
        job_postings::create_assignment,
        assignments::my_assignments,
        assignments::respond_assignment,
        sliders::list_public_sliders,
        sliders::list_sliders,
        sliders::create_slider,
        sliders::update_slider,
        sliders::delete_slider,
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
