use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::listing::{EmploymentType, ListingFields, Location};
use crate::utils::time::default_expiry;

/// Body of `POST /jobs` and `PUT /jobs/{id}`. Every field is optional at the
/// serde level so that absent fields surface as a validation error naming
/// them instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingPayload {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub company: Option<String>,
    #[validate(required, length(min = 1))]
    pub company_url: Option<String>,
    #[validate(required, length(min = 1))]
    pub company_logo: Option<String>,
    #[validate(required, length(min = 1))]
    pub industry: Option<String>,
    #[serde(rename = "type")]
    #[validate(required)]
    pub employment_type: Option<EmploymentType>,
    #[validate(required)]
    pub location: Option<Location>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub qualifications: Option<Vec<String>>,
    #[validate(required, length(min = 1))]
    pub education: Option<String>,
    #[validate(required, length(min = 1))]
    pub experience: Option<String>,
    pub date_posted: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub schema: Option<JsonValue>,
}

fn present<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        Error::validation(
            format!("Missing required field: {}", field),
            vec![field.to_string()],
        )
    })
}

impl ListingPayload {
    /// Validates the payload and resolves the dates: an omitted `datePosted`
    /// becomes `now`, an omitted `expiryDate` becomes `now + 30 days`.
    /// Applied identically on create and on update.
    pub fn into_fields(self, now: DateTime<Utc>) -> Result<ListingFields> {
        self.validate()?;
        let location = present(self.location, "location")?;
        location.validate()?;

        Ok(ListingFields {
            title: present(self.title, "title")?,
            company: present(self.company, "company")?,
            company_url: present(self.company_url, "companyUrl")?,
            company_logo: present(self.company_logo, "companyLogo")?,
            industry: present(self.industry, "industry")?,
            employment_type: present(self.employment_type, "type")?,
            location,
            description: present(self.description, "description")?,
            responsibilities: self.responsibilities.unwrap_or_default(),
            qualifications: self.qualifications.unwrap_or_default(),
            education: present(self.education, "education")?,
            experience: present(self.experience, "experience")?,
            date_posted: self.date_posted.unwrap_or(now),
            expiry_date: self.expiry_date.unwrap_or_else(|| default_expiry(now)),
            schema: self.schema,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingListing {
    pub id: Uuid,
    pub title: String,
    pub expiry_date: DateTime<Utc>,
    pub days_left: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingListingsResponse {
    pub jobs: Vec<UpcomingListing>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn payload() -> ListingPayload {
        serde_json::from_value(json!({
            "title": "Backend Engineer",
            "company": "Acme",
            "companyUrl": "https://acme.test",
            "companyLogo": "https://acme.test/logo.png",
            "industry": "Software",
            "type": "Full Time",
            "location": {
                "country": "US",
                "state": "NY",
                "city": "New York",
                "street": "5th Ave",
                "zipCode": "10001"
            },
            "description": "Ship services",
            "responsibilities": ["Design", "Build"],
            "qualifications": ["Rust"],
            "education": "BSc",
            "experience": "3+ years"
        }))
        .unwrap()
    }

    #[test]
    fn fills_default_dates() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let fields = payload().into_fields(now).unwrap();
        assert_eq!(fields.date_posted, now);
        assert_eq!(fields.expiry_date, now + Duration::days(30));
        assert_eq!(fields.responsibilities, vec!["Design", "Build"]);
    }

    #[test]
    fn keeps_explicit_dates_even_if_already_expired() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let posted = now - Duration::days(60);
        let expiry = now - Duration::days(10);
        let mut p = payload();
        p.date_posted = Some(posted);
        p.expiry_date = Some(expiry);
        let fields = p.into_fields(now).unwrap();
        assert_eq!(fields.date_posted, posted);
        assert_eq!(fields.expiry_date, expiry);
    }

    #[test]
    fn missing_fields_are_named() {
        let mut p = payload();
        p.title = None;
        p.description = Some(String::new());
        match p.into_fields(Utc::now()) {
            Err(Error::Validation { fields, .. }) => {
                assert!(fields.contains(&"title".to_string()));
                assert!(fields.contains(&"description".to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn incomplete_location_is_rejected() {
        let mut p = payload();
        if let Some(location) = p.location.as_mut() {
            location.city.clear();
        }
        assert!(matches!(
            p.into_fields(Utc::now()),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn schema_blob_passes_through_untouched() {
        let blob = json!({"@type": "JobPosting", "nested": {"anything": [1, 2, 3]}});
        let mut p = payload();
        p.schema = Some(blob.clone());
        assert_eq!(p.into_fields(Utc::now()).unwrap().schema, Some(blob));
    }
}
