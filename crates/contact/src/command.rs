use std::{str::FromStr, sync::Arc};

use boomabrovers_db::table::ContactSubmission;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, types::Text};
use strum::VariantArray;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{ContactForm, ContactRow, Error, FieldError, Status};

/// Post-commit side effects of a stored submission.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn submitted(&self, contact: &ContactRow) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Command {
    pool: SqlitePool,
    notifier: Arc<dyn Notifier>,
}

impl Command {
    pub fn new(pool: SqlitePool, notifier: Arc<dyn Notifier>) -> Self {
        Self { pool, notifier }
    }

    /// Validates, stores, then notifies. A notification failure never undoes the write.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&self, input: ContactForm) -> crate::Result<ContactRow> {
        let input = input.trimmed();
        let errors = input.field_errors();
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "Contact submission rejected");

            return Err(Error::Validation(errors));
        }

        let contact = ContactRow {
            id: Ulid::new().to_string(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            status: Text(Status::New),
            created_at: (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64,
        };

        let statement = sea_query::Query::insert()
            .into_table(ContactSubmission::Table)
            .columns(crate::query::columns())
            .values_panic([
                contact.id.to_owned().into(),
                contact.name.to_owned().into(),
                contact.email.to_owned().into(),
                contact.phone.to_owned().into(),
                contact.subject.to_owned().into(),
                contact.message.to_owned().into(),
                contact.status.0.to_string().into(),
                contact.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        tracing::info!(id = %contact.id, "Contact submission stored");

        if let Err(err) = self.notifier.submitted(&contact).await {
            tracing::error!(
                id = %contact.id,
                error = %err,
                "Contact notification failed, submission kept"
            );
        }

        Ok(contact)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: &str, status: &str) -> crate::Result<ContactRow> {
        let Ok(status) = Status::from_str(status.trim()) else {
            let allowed = Status::VARIANTS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            return Err(Error::Validation(vec![FieldError::new(
                "status",
                format!("Status must be one of {allowed}"),
            )]));
        };

        let statement = sea_query::Query::update()
            .table(ContactSubmission::Table)
            .values([(ContactSubmission::Status, status.to_string().into())])
            .and_where(Expr::col(ContactSubmission::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(id, status = %status, "Contact status updated");

        crate::query::find(&self.pool, id)
            .await?
            .ok_or(Error::NotFound)
    }
}
