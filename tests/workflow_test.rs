use std::env;

use courier_staffing_backend::{
    dto::job_posting_dto::CreateJobPostingPayload,
    error::Error,
    models::{
        document::{DocumentStatus, DocumentType},
        job_assignment::AssignmentStatus,
        job_posting::JobType,
        profile::{ApplicationStatus, UserRole},
    },
    services::{
        application_service::ApplicationService,
        assignment_service::AssignmentService,
        audit_service::AuditService,
        cost_service::JobBudget,
        document_service::DocumentService,
        job_posting_service::JobPostingService,
        profile_service::ProfileService,
        review_rules::ReviewDecision,
        storage_service::StorageService,
        transition_rules::{StatusAction, TransitionError},
    },
};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

const PDF: &[u8] = b"%PDF-1.4 scanned document";

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at a disposable Postgres database"]
async fn candidate_moves_from_signup_to_assignment() {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let storage = StorageService::new(
        env::temp_dir().join(format!("courier-workflow-{}", Uuid::new_v4())),
        "workflow-key".into(),
        60,
        String::new(),
    );
    let profiles = ProfileService::new(pool.clone());
    let applications = ApplicationService::new(pool.clone());
    let documents = DocumentService::new(pool.clone(), storage);
    let postings = JobPostingService::new(pool.clone());
    let assignments = AssignmentService::new(pool.clone());
    let audit = AuditService::new(pool.clone());

    let candidate = profiles
        .create(Uuid::new_v4(), "Aylin Demir", UserRole::Candidate, None)
        .await
        .expect("candidate");
    assert_eq!(candidate.application_status, Some(ApplicationStatus::NewApplication));
    let consultant = profiles
        .create(Uuid::new_v4(), "Staff Member", UserRole::Consultant, None)
        .await
        .expect("consultant");
    let customer = profiles
        .create(Uuid::new_v4(), "Quick Parcel Ltd", UserRole::Customer, None)
        .await
        .expect("customer");

    // approving with nothing uploaded is refused
    applications
        .transition(candidate.id, consultant.id, StatusAction::StartEvaluation, None)
        .await
        .expect("start evaluation");
    let err = applications
        .transition(candidate.id, consultant.id, StatusAction::Approve, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transition(TransitionError::NoDocuments)));

    let cv = documents
        .upload(candidate.id, DocumentType::Cv, "cv.pdf", PDF)
        .await
        .expect("upload cv");
    assert!(cv.file_path.starts_with(&candidate.id.to_string()));
    assert!(cv.status.is_none());

    let err = applications
        .transition(candidate.id, consultant.id, StatusAction::Approve, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transition(TransitionError::DocumentsNotApproved)));

    let rejected = documents
        .review(
            cv.id,
            consultant.id,
            ReviewDecision::reject("Scan is cut off at the bottom").unwrap(),
        )
        .await
        .expect("reject cv");
    assert_eq!(rejected.status, Some(DocumentStatus::Rejected));

    let profile = applications
        .transition(candidate.id, consultant.id, StatusAction::RequestUpdate, None)
        .await
        .expect("request update");
    assert_eq!(profile.application_status, Some(ApplicationStatus::UpdateRequired));

    let replaced = documents
        .upload(candidate.id, DocumentType::Cv, "cv-v2.pdf", PDF)
        .await
        .expect("re-upload cv");
    assert_eq!(replaced.id, cv.id);
    assert!(replaced.status.is_none());
    assert!(replaced.review_notes.is_none());
    assert!(replaced.reviewed_by.is_none());
    assert!(replaced.reviewed_at.is_none());
    assert_ne!(replaced.file_path, cv.file_path);

    applications
        .transition(candidate.id, consultant.id, StatusAction::StartEvaluation, None)
        .await
        .expect("back to evaluation");
    documents
        .review(cv.id, consultant.id, ReviewDecision::Approve)
        .await
        .expect("approve cv");
    let approved = applications
        .transition(candidate.id, consultant.id, StatusAction::Approve, None)
        .await
        .expect("approve application");
    assert_eq!(approved.application_status, Some(ApplicationStatus::Approved));

    let history = audit
        .history_for_profile(candidate.id)
        .await
        .expect("history");
    assert!(history.iter().any(|entry| entry.action == "application.approve"));
    assert!(history.iter().any(|entry| entry.action == "document.review"));

    let posting = postings
        .create(
            customer.id,
            CreateJobPostingPayload {
                title: "Weekend parcel courier".into(),
                description: None,
                location: Some("Istanbul".into()),
                budget: JobBudget {
                    job_type: JobType::FullTime,
                    required_count: 2,
                    monthly_budget: Some(Decimal::from(1000)),
                    hourly_budget: None,
                    season_months: None,
                    start_date: None,
                    end_date: None,
                    working_hours: None,
                },
            },
        )
        .await
        .expect("posting");
    assert_eq!(posting.total_cost, Decimal::from(2688));

    let assignment = assignments
        .assign(posting.id, candidate.id, consultant.id)
        .await
        .expect("assign");
    let err = assignments
        .assign(posting.id, candidate.id, consultant.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let accepted = assignments
        .respond(assignment.id, candidate.id, true)
        .await
        .expect("accept");
    assert_eq!(accepted.status, AssignmentStatus::Accepted);
    let err = assignments
        .respond(assignment.id, candidate.id, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let removed = profiles
        .delete_application(candidate.id)
        .await
        .expect("delete");
    assert_eq!(removed, vec![replaced.file_path]);
}
