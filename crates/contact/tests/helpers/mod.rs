use std::{
    path::PathBuf,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use boomabrovers_contact::{Command, ContactForm, ContactRow, Notifier, Query};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    boomabrovers_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn submitted(&self, _contact: &ContactRow) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

impl RecordingNotifier {
    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[allow(dead_code)]
pub struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn submitted(&self, _contact: &ContactRow) -> anyhow::Result<()> {
        anyhow::bail!("smtp relay unreachable")
    }
}

pub fn setup_command(pool: &SqlitePool, notifier: Arc<dyn Notifier>) -> (Command, Query) {
    (Command::new(pool.clone(), notifier), Query(pool.clone()))
}

pub fn form(name: impl Into<String>) -> ContactForm {
    let name = name.into();

    ContactForm {
        email: format!("{name}@boomabrovers.localhost"),
        name,
        phone: "+1 555 123 4567".to_owned(),
        subject: "Kitchen remodel".to_owned(),
        message: "Looking for a quote".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_submit_all(
    cmd: &Command,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<String>> {
    let mut ids = vec![];
    for name in names.into_iter() {
        let contact = cmd.submit(form(name)).await?;
        ids.push(contact.id);
    }

    Ok(ids)
}
