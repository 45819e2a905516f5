pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, assignment_service::AssignmentService,
    audit_service::AuditService, document_service::DocumentService,
    job_posting_service::JobPostingService, profile_service::ProfileService,
    slider_service::SliderService, storage_service::StorageService,
};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub storage: StorageService,
    pub profile_service: ProfileService,
    pub application_service: ApplicationService,
    pub document_service: DocumentService,
    pub job_posting_service: JobPostingService,
    pub assignment_service: AssignmentService,
    pub slider_service: SliderService,
    pub audit_service: AuditService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let storage = StorageService::new(
            config.documents_dir.clone(),
            config.storage_signing_key.clone(),
            config.signed_url_ttl_seconds,
            config.public_base_url.clone(),
        );

        Self {
            profile_service: ProfileService::new(pool.clone()),
            application_service: ApplicationService::new(pool.clone()),
            document_service: DocumentService::new(pool.clone(), storage.clone()),
            job_posting_service: JobPostingService::new(pool.clone()),
            assignment_service: AssignmentService::new(pool.clone()),
            slider_service: SliderService::new(pool.clone()),
            audit_service: AuditService::new(pool.clone()),
            storage,
            pool,
        }
    }
}

/// Routes reachable without a token.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/health/ready", get(routes::health::ready))
        .route("/api-docs/openapi.json", get(routes::docs::openapi_json))
        .route("/api/public/sliders", get(routes::sliders::list_public_sliders))
        .route(
            "/api/storage/documents/*path",
            get(routes::storage::download_document),
        )
}

/// Routes behind bearer authentication. The caller's profile role is checked per handler.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", post(routes::profiles::create_profile))
        .route("/api/profiles/me", get(routes::profiles::me))
        .route(
            "/api/middleman/candidates",
            get(routes::profiles::middleman_candidates),
        )
        .route(
            "/api/applications",
            get(routes::applications::list_applications),
        )
        .route(
            "/api/applications/stats",
            get(routes::applications::application_stats),
        )
        .route(
            "/api/applications/:id",
            get(routes::applications::get_application)
                .delete(routes::applications::delete_application),
        )
        .route(
            "/api/applications/:id/transition",
            post(routes::applications::transition_application),
        )
        .route(
            "/api/applications/:id/history",
            get(routes::applications::application_history),
        )
        .route(
            "/api/profiles/:id/documents",
            get(routes::documents::list_documents).post(routes::documents::upload_document),
        )
        .route(
            "/api/documents/:id/approve",
            post(routes::documents::approve_document),
        )
        .route(
            "/api/documents/:id/reject",
            post(routes::documents::reject_document),
        )
        .route(
            "/api/documents/:id/url",
            get(routes::documents::document_url),
        )
        .route(
            "/api/job-postings/quote",
            post(routes::job_postings::quote_job_posting),
        )
        .route(
            "/api/job-postings",
            get(routes::job_postings::list_job_postings)
                .post(routes::job_postings::create_job_posting),
        )
        .route(
            "/api/job-postings/:id",
            get(routes::job_postings::get_job_posting),
        )
        .route(
            "/api/job-postings/:id/status",
            post(routes::job_postings::update_job_posting_status),
        )
        .route(
            "/api/job-postings/:id/assignments",
            get(routes::job_postings::list_assignments)
                .post(routes::job_postings::create_assignment),
        )
        .route(
            "/api/assignments/me",
            get(routes::assignments::my_assignments),
        )
        .route(
            "/api/assignments/:id/respond",
            post(routes::assignments::respond_assignment),
        )
        .route(
            "/api/admin/settings/sliders",
            get(routes::sliders::list_sliders)
                .post(routes::sliders::create_slider)
                .put(routes::sliders::update_slider)
                .delete(routes::sliders::delete_slider),
        )
        .layer(axum::middleware::from_fn(
            crate::middleware::auth::require_bearer_auth,
        ))
}

/// Full application router with state, tracing, CORS and the upload size limit applied.
pub fn build_router(state: AppState) -> Router {
    let config = crate::config::get_config();

    public_router()
        .merge(api_router())
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(crate::middleware::cors::cors_layer(&config.cors_allowed_origins))
        .layer(axum::extract::DefaultBodyLimit::max(config.max_upload_bytes))
}
