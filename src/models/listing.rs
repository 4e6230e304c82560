use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full Time")]
    FullTime,
    #[serde(rename = "Part Time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Internship")]
    Internship,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full Time",
            EmploymentType::PartTime => "Part Time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full Time" => Ok(EmploymentType::FullTime),
            "Part Time" => Ok(EmploymentType::PartTime),
            "Contract" => Ok(EmploymentType::Contract),
            "Internship" => Ok(EmploymentType::Internship),
            other => Err(format!("unknown employment type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub zip_code: String,
}

/// Mutable fields of a listing with both dates already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub title: String,
    pub company: String,
    pub company_url: String,
    pub company_logo: String,
    pub industry: String,
    pub employment_type: EmploymentType,
    pub location: Location,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub education: String,
    pub experience: String,
    pub date_posted: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub schema: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub company_url: String,
    pub company_logo: String,
    pub industry: String,
    #[serde(rename = "type")]
    pub employment_type: EmploymentType,
    pub location: Location,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub education: String,
    pub experience: String,
    pub date_posted: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobListing {
    pub fn from_fields(
        id: Uuid,
        fields: ListingFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: fields.title,
            company: fields.company,
            company_url: fields.company_url,
            company_logo: fields.company_logo,
            industry: fields.industry,
            employment_type: fields.employment_type,
            location: fields.location,
            description: fields.description,
            responsibilities: fields.responsibilities,
            qualifications: fields.qualifications,
            education: fields.education,
            experience: fields.experience,
            date_posted: fields.date_posted,
            expiry_date: fields.expiry_date,
            schema: fields.schema,
            created_at,
            updated_at,
        }
    }
}
