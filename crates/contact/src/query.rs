use boomabrovers_db::table::ContactSubmission;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Serialize, Serializer};
use sqlx::{SqlitePool, prelude::FromRow, types::Text};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::Status;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: Text<Status>,
    /// Unix milliseconds.
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: i64,
}

impl ContactRow {
    pub fn status(&self) -> Status {
        self.status.0
    }
}

fn serialize_status<S: Serializer>(status: &Text<Status>, serializer: S) -> Result<S::Ok, S::Error> {
    status.0.serialize(serializer)
}

fn serialize_timestamp<S: Serializer>(millis: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    let datetime = OffsetDateTime::from_unix_timestamp_nanos(i128::from(*millis) * 1_000_000)
        .map_err(serde::ser::Error::custom)?;
    let formatted = datetime
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;

    serializer.serialize_str(&formatted)
}

pub(crate) fn columns() -> [ContactSubmission; 8] {
    [
        ContactSubmission::Id,
        ContactSubmission::Name,
        ContactSubmission::Email,
        ContactSubmission::Phone,
        ContactSubmission::Subject,
        ContactSubmission::Message,
        ContactSubmission::Status,
        ContactSubmission::CreatedAt,
    ]
}

pub(crate) async fn find(pool: &SqlitePool, id: &str) -> crate::Result<Option<ContactRow>> {
    let statement = sea_query::Query::select()
        .columns(columns())
        .from(ContactSubmission::Table)
        .and_where(Expr::col(ContactSubmission::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ContactRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Full scan, newest first. Equal timestamps fall back to id order.
    pub async fn all(&self) -> crate::Result<Vec<ContactRow>> {
        let statement = sea_query::Query::select()
            .columns(columns())
            .from(ContactSubmission::Table)
            .order_by(ContactSubmission::CreatedAt, Order::Desc)
            .order_by(ContactSubmission::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ContactRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: impl AsRef<str>) -> crate::Result<Option<ContactRow>> {
        find(&self.0, id.as_ref()).await
    }
}
