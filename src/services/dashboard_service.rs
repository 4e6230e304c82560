use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::activity_dto::{Activity, ActivityKind};
use crate::dto::listing_dto::UpcomingListing;
use crate::error::Result;
use crate::repositories::{ApplicationRepository, ListingRepository};
use crate::utils::time::{days_between_ceil, format_time_ago};

const UPCOMING_LIMIT: i64 = 5;
const RECENT_PER_KIND: i64 = 3;
const ACTIVITY_LIMIT: usize = 5;

/// Read-only aggregates for the admin dashboard.
#[derive(Clone)]
pub struct DashboardService {
    listings: Arc<dyn ListingRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl DashboardService {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            listings,
            applications,
        }
    }

    pub async fn listing_count(&self) -> Result<i64> {
        self.listings.count().await
    }

    pub async fn application_count(&self) -> Result<i64> {
        self.applications.count().await
    }

    /// Listings still open at `now`, soonest deadline first.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<UpcomingListing>> {
        let listings = self.listings.upcoming(now, UPCOMING_LIMIT).await?;
        Ok(listings
            .into_iter()
            .map(|listing| UpcomingListing {
                id: listing.id,
                title: listing.title,
                expiry_date: listing.expiry_date,
                days_left: days_between_ceil(now, listing.expiry_date),
            })
            .collect())
    }

    pub async fn recent_activity(&self, now: DateTime<Utc>) -> Result<Vec<Activity>> {
        let mut activities = Vec::new();

        for listing in self.listings.recent(RECENT_PER_KIND).await? {
            activities.push(Activity {
                kind: ActivityKind::Job,
                title: "New job posted".to_string(),
                description: format!("{} at {}", listing.title, listing.company),
                time: String::new(),
                timestamp: listing.created_at,
            });
        }

        for application in self.applications.recent(RECENT_PER_KIND).await? {
            let job_title = match Uuid::parse_str(&application.job_id) {
                Ok(id) => self.listings.get(id).await?.map(|l| l.title),
                Err(_) => None,
            };
            activities.push(Activity {
                kind: ActivityKind::Application,
                title: "New application received".to_string(),
                description: format!(
                    "{} applied for {}",
                    application.full_name(),
                    job_title.as_deref().unwrap_or("Unknown position")
                ),
                time: String::new(),
                timestamp: application.applied_at,
            });
        }

        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        activities.truncate(ACTIVITY_LIMIT);
        for activity in &mut activities {
            activity.time = format_time_ago(activity.timestamp, now);
        }
        Ok(activities)
    }
}
