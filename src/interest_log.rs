use crate::domain::BookInterestSubmission;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const HEADER: [&str; 4] = ["Name", "Email", "Notifications", "Date"];
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the book interest log.
#[derive(Debug, Clone)]
pub struct InterestLogRecord {
    pub name: String,
    pub email: String,
    pub notifications: bool,
    pub recorded_at: DateTime<Local>,
}

impl InterestLogRecord {
    pub fn new(submission: &BookInterestSubmission, recorded_at: DateTime<Local>) -> Self {
        Self {
            name: submission.name.as_ref().to_owned(),
            email: submission.email.as_ref().to_owned(),
            notifications: submission.notifications,
            recorded_at,
        }
    }

    fn fields(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.email.clone(),
            if self.notifications { "Yes" } else { "No" }.to_string(),
            self.recorded_at.format(DATE_FORMAT).to_string(),
        ]
    }
}

/// Append-only CSV file of book interest registrations.
///
/// Appends from every handler of the process go through one lock, so the
/// header is written exactly once and rows never interleave. The lock is
/// held by the blocking write itself, so it outlives a cancelled caller.
pub struct InterestLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl InterestLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(
        name = "Append a record to the interest log",
        skip(self, record),
        fields(log_path = %self.path.display())
    )]
    pub async fn append(&self, record: InterestLogRecord) -> Result<(), anyhow::Error> {
        let guard = Arc::clone(&self.lock).lock_owned().await;
        let path = self.path.clone();
        spawn_blocking_with_tracing(move || {
            let _guard = guard;
            append_record(&path, &record)
        })
        .await
        .context("Failed to spawn blocking task.")?
    }
}

fn append_record(path: &Path, record: &InterestLogRecord) -> Result<(), anyhow::Error> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open the interest log at {}", path.display()))?;
    let is_empty = file
        .metadata()
        .context("Failed to read the interest log metadata")?
        .len()
        == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if is_empty {
        writer.write_record(HEADER)?;
    }
    writer.write_record(record.fields())?;
    let bytes = writer.into_inner().map_err(|e| {
        anyhow::anyhow!(
            "Failed to serialize the interest log record: {}",
            e.error()
        )
    })?;

    file.write_all(&bytes)
        .context("Failed to write to the interest log")?;
    file.flush().context("Failed to flush the interest log")?;
    Ok(())
}
