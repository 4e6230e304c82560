pub mod application_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod file_store;
pub mod intake_service;
pub mod listing_service;
pub mod mailer;
pub mod notification_service;
pub mod resume_service;
