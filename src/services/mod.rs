pub mod application_service;
pub mod assignment_service;
pub mod audit_service;
pub mod cost_service;
pub mod document_service;
pub mod job_posting_service;
pub mod profile_service;
pub mod review_rules;
pub mod slider_service;
pub mod storage_service;
pub mod transition_rules;
