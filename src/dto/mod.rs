pub mod activity_dto;
pub mod application_dto;
pub mod auth_dto;
pub mod listing_dto;
pub mod resume_dto;
