use std::{str::FromStr, time::Duration};

use anyhow::Result;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use sqlx_migrator::{Migrate, Plan};

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true))
}

/// Single connection so SQLite serializes every write.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    let options = connect_options(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    tracing::info!("Created read-write pool with 1 max connection");

    Ok(pool)
}

/// Must be created after the write pool so the database file exists.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = connect_options(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(max_connections, "Created read-only pool");

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    boomabrovers_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    tracing::info!("Migrations applied");

    Ok(())
}

#[cfg(test)]
mod tests {
    use temp_dir::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_pools_share_migrated_database() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());

        let write_pool = create_write_pool(&url).await.unwrap();
        migrate(&write_pool).await.unwrap();
        let read_pool = create_read_pool(&url, 2).await.unwrap();

        let journal_mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&write_pool)
            .await
            .unwrap();
        assert_eq!(journal_mode.0, "wal");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_submission")
            .fetch_one(&read_pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);

        let insert = sqlx::query("INSERT INTO contact_submission (id) VALUES ('x')")
            .execute(&read_pool)
            .await;
        assert!(insert.is_err());
    }
}
