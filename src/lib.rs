pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::repositories::Repositories;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    dashboard_service::DashboardService, file_store::FileStore, intake_service::IntakeService,
    listing_service::ListingService, mailer::Mailer, notification_service::NotificationService,
    resume_service::ResumeService,
};

#[derive(Clone)]
pub struct AppState {
    pub listing_service: ListingService,
    pub application_service: ApplicationService,
    pub intake_service: IntakeService,
    pub resume_service: ResumeService,
    pub dashboard_service: DashboardService,
    pub auth_service: AuthService,
    pub uploads_dir: PathBuf,
    pub public_rps: u32,
    pub site_url: Option<String>,
}

impl AppState {
    pub fn new(config: &Config, repos: Repositories, mailer: Arc<dyn Mailer>) -> Self {
        let files = FileStore::new(config.uploads_dir.clone());
        let listing_service = ListingService::new(repos.listings.clone());
        let application_service = ApplicationService::new(repos.applications.clone());
        let notification_service = NotificationService::new(
            mailer,
            config.admin_email.clone(),
            config.public_base_url.clone(),
        );
        let intake_service = IntakeService::new(
            files.clone(),
            application_service.clone(),
            listing_service.clone(),
            notification_service,
        );
        let resume_service = ResumeService::new(repos.resumes, files);
        let dashboard_service = DashboardService::new(repos.listings, repos.applications);
        let auth_service = AuthService::new(config);

        Self {
            listing_service,
            application_service,
            intake_service,
            resume_service,
            dashboard_service,
            auth_service,
            uploads_dir: config.uploads_dir.clone(),
            public_rps: config.public_rps,
            site_url: config.site_url.clone(),
        }
    }
}
