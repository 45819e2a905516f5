pub mod audit_log;
pub mod document;
pub mod job_assignment;
pub mod job_posting;
pub mod profile;
pub mod slider;
