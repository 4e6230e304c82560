pub mod application_repository;
pub mod listing_repository;
pub mod memory;
pub mod resume_repository;

use std::sync::Arc;

use sqlx::PgPool;

pub use application_repository::{ApplicationRepository, PgApplicationRepository};
pub use listing_repository::{ListingRepository, PgListingRepository};
pub use resume_repository::{PgResumeRepository, ResumeRepository};

/// The storage collaborators shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub listings: Arc<dyn ListingRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub resumes: Arc<dyn ResumeRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            listings: Arc::new(PgListingRepository::new(pool.clone())),
            applications: Arc::new(PgApplicationRepository::new(pool.clone())),
            resumes: Arc::new(PgResumeRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            listings: Arc::new(memory::MemoryListingRepository::new()),
            applications: Arc::new(memory::MemoryApplicationRepository::new()),
            resumes: Arc::new(memory::MemoryResumeRepository::new()),
        }
    }
}
