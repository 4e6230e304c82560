use std::sync::Arc;

use crate::models::application::ApplicantDetails;
use crate::services::mailer::{Mailer, OutgoingEmail};

/// Emails the administrator about new applications. Delivery is best
/// effort: failures are logged and reported as `false`, never as errors.
#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
    public_base_url: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: String, public_base_url: String) -> Self {
        Self {
            mailer,
            admin_email,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn resume_url(&self, resume_reference: &str) -> String {
        format!("{}{}", self.public_base_url, resume_reference)
    }

    pub async fn send_application_notice(
        &self,
        job_title: &str,
        applicant: &ApplicantDetails,
        resume_reference: &str,
    ) -> bool {
        let email = OutgoingEmail {
            to: self.admin_email.clone(),
            subject: format!("New Job Application for {}", job_title),
            html: render_application_email(job_title, applicant, &self.resume_url(resume_reference)),
        };

        match self.mailer.send(email).await {
            Ok(()) => {
                tracing::info!(job_title, applicant = %applicant.email, "Application notice sent");
                true
            }
            Err(e) => {
                tracing::error!(job_title, error = %e, "Error sending application notice");
                false
            }
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const EMAIL_STYLE: &str = r#"
      body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f9fafb; }
      .container { max-width: 600px; margin: 0 auto; padding: 20px; }
      .header { background: #000000; padding: 30px 20px; text-align: center; border-radius: 8px 8px 0 0; }
      .content { background-color: #ffffff; padding: 30px; border-radius: 0 0 8px 8px; }
      .section { background-color: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px; border: 1px solid #e9ecef; }
      .section-title { color: #A9282B; font-size: 18px; font-weight: 600; margin: 0 0 15px; padding-bottom: 10px; border-bottom: 2px solid #A9282B; }
      .info-label { font-weight: 600; color: #4a5568; min-width: 120px; display: inline-block; }
      .cover-letter { white-space: pre-wrap; background-color: #ffffff; padding: 15px; border-radius: 6px; border: 1px solid #e2e8f0; }
      .resume-link { display: inline-block; background-color: #A9282B; color: #ffffff; padding: 10px 20px; border-radius: 6px; text-decoration: none; font-weight: 500; }
      .footer { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #e9ecef; color: #6c757d; font-size: 14px; }
"#;

pub fn render_application_email(
    job_title: &str,
    applicant: &ApplicantDetails,
    resume_url: &str,
) -> String {
    let info = |label: &str, value: &str| {
        format!(
            r#"<div class="info-item"><span class="info-label">{}:</span> <span class="info-value">{}</span></div>"#,
            label,
            escape_html(value)
        )
    };
    let name = format!("{} {}", applicant.first_name, applicant.last_name);

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>New Job Application</title>
    <style>{style}</style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1 style="color: #ffffff; margin: 0; font-size: 24px;">New Job Application Received</h1>
      </div>
      <div class="content">
        <div class="section">
          <h2 class="section-title">Job Details</h2>
          {position}
        </div>
        <div class="section">
          <h2 class="section-title">Applicant Information</h2>
          {name}
          {email}
          {phone}
          {experience}
          {education}
        </div>
        <div class="section">
          <h2 class="section-title">Cover Letter</h2>
          <div class="cover-letter">{cover_letter}</div>
        </div>
        <div class="section">
          <h2 class="section-title">Resume</h2>
          <a href="{resume_url}" class="resume-link">View Resume</a>
        </div>
      </div>
      <div class="footer">
        <p>This is an automated message from the job board. Please do not reply to this email.</p>
      </div>
    </div>
  </body>
</html>
"#,
        style = EMAIL_STYLE,
        position = info("Position", job_title),
        name = info("Name", &name),
        email = info("Email", &applicant.email),
        phone = info("Phone", &applicant.phone),
        experience = info("Experience", &applicant.experience),
        education = info("Education", &applicant.education),
        cover_letter = escape_html(&applicant.cover_letter),
        resume_url = escape_html(resume_url),
    )
}
