use askama::Template;
use boomabrovers_contact::{ContactRow, Notifier};

use crate::{Email, Mailer, NotificationError};

#[derive(Template)]
#[template(path = "contact-admin.html")]
pub struct AdminHtmlTemplate<'a> {
    pub contact: &'a ContactRow,
}

#[derive(Template)]
#[template(path = "contact-admin.txt")]
pub struct AdminPlainTemplate<'a> {
    pub contact: &'a ContactRow,
}

#[derive(Template)]
#[template(path = "contact-acknowledgement.html")]
pub struct AcknowledgementHtmlTemplate<'a> {
    pub contact: &'a ContactRow,
}

#[derive(Template)]
#[template(path = "contact-acknowledgement.txt")]
pub struct AcknowledgementPlainTemplate<'a> {
    pub contact: &'a ContactRow,
}

pub fn admin_email(
    admin_address: &str,
    contact: &ContactRow,
) -> Result<Email, NotificationError> {
    Ok(Email {
        to: admin_address.to_owned(),
        subject: format!("New Contact Form Submission: {}", contact.subject),
        html: AdminHtmlTemplate { contact }.render()?,
        plain: AdminPlainTemplate { contact }.render()?,
    })
}

pub fn acknowledgement_email(contact: &ContactRow) -> Result<Email, NotificationError> {
    Ok(Email {
        to: contact.email.to_owned(),
        subject: "Thank you for contacting Boomabrovers".to_owned(),
        html: AcknowledgementHtmlTemplate { contact }.render()?,
        plain: AcknowledgementPlainTemplate { contact }.render()?,
    })
}

/// Sends the admin summary and the submitter acknowledgement for a stored submission.
pub struct ContactNotifier<M> {
    mailer: M,
    admin_address: String,
}

impl<M: Mailer> ContactNotifier<M> {
    pub fn new(mailer: M, admin_address: impl Into<String>) -> Self {
        Self {
            mailer,
            admin_address: admin_address.into(),
        }
    }

    async fn deliver(
        &self,
        kind: &'static str,
        email: Result<Email, NotificationError>,
    ) -> bool {
        let result = match email {
            Ok(email) => self.mailer.send(email).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(kind, error = %err, "Failed to send contact email");
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl<M: Mailer> Notifier for ContactNotifier<M> {
    #[tracing::instrument(skip_all, fields(id = %contact.id))]
    async fn submitted(&self, contact: &ContactRow) -> anyhow::Result<()> {
        let admin = self
            .deliver("admin", admin_email(&self.admin_address, contact))
            .await;

        let acknowledgement = self
            .deliver("acknowledgement", acknowledgement_email(contact))
            .await;

        if !(admin && acknowledgement) {
            anyhow::bail!("Failed to send email notifications");
        }

        Ok(())
    }
}
