use std::sync::Arc;

use boomabrovers_contact::{Error, Status};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_update_status() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let (command, query) =
        helpers::setup_command(&pool, Arc::new(helpers::RecordingNotifier::default()));
    let contact = command.submit(helpers::form("john.doe")).await?;

    let updated = command.update_status(&contact.id, "in-progress").await?;
    assert_eq!(updated.status(), Status::InProgress);
    assert_eq!(updated.created_at, contact.created_at);

    let updated = command.update_status(&contact.id, "resolved").await?;
    assert_eq!(updated.status(), Status::Resolved);

    let loaded = query.find(&contact.id).await?.unwrap();
    assert_eq!(loaded.status(), Status::Resolved);

    Ok(())
}

#[tokio::test]
async fn test_update_status_unknown_id() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let (command, query) =
        helpers::setup_command(&pool, Arc::new(helpers::RecordingNotifier::default()));
    helpers::create_submit_all(&command, vec!["first", "second"]).await?;

    let result = command
        .update_status("01ARZ3NDEKTSV4RRFFQ69G5FAV", "resolved")
        .await;
    assert!(matches!(result, Err(Error::NotFound)));

    let contacts = query.all().await?;
    assert_eq!(contacts.len(), 2);
    for contact in contacts {
        assert_eq!(contact.status(), Status::New);
    }

    Ok(())
}

#[tokio::test]
async fn test_update_status_rejects_unknown_value() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let (command, query) =
        helpers::setup_command(&pool, Arc::new(helpers::RecordingNotifier::default()));
    let contact = command.submit(helpers::form("john.doe")).await?;

    let result = command.update_status(&contact.id, "archived").await;
    let Err(Error::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors[0].field, "status");
    assert_eq!(
        errors[0].message,
        "Status must be one of new, in-progress, resolved"
    );

    let loaded = query.find(&contact.id).await?.unwrap();
    assert_eq!(loaded.status(), Status::New);

    Ok(())
}
