pub mod application;
pub mod listing;
pub mod resume;
