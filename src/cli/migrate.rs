pub async fn migrate(config: crate::config::Config) -> anyhow::Result<()> {
    tracing::info!(url = %config.database.url, "Running database migrations...");

    let pool = crate::db::create_write_pool(&config.database.url).await?;
    crate::db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}
