pub mod document_dto;
pub mod job_posting_dto;
pub mod profile_dto;
pub mod slider_dto;
