use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ApplicationPatch, JobApplication, NewApplication};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no application with id '{0}'")]
    NotFound(String),
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("snapshot file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Storage seam between the CLI and whatever holds the records. The two
/// implementations (in-memory and REST-backed) expose identical contracts;
/// callers pick one at startup.
pub trait ApplicationStore {
    /// Snapshot of every record, in no guaranteed order.
    fn list(&self) -> Result<Vec<JobApplication>, StoreError>;

    /// An absent id is `Ok(None)`, not an error.
    fn get(&self, id: &str) -> Result<Option<JobApplication>, StoreError>;

    /// Assigns the id and `last_updated`, returns the stored record.
    fn create(&mut self, new: NewApplication) -> Result<JobApplication, StoreError>;

    /// Merges the patch into an existing record and refreshes `last_updated`.
    fn update(&mut self, id: &str, patch: ApplicationPatch)
        -> Result<JobApplication, StoreError>;

    /// Removes permanently; deleting an already-deleted id is `NotFound`.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Record store over an owned in-memory collection. Ids come from a counter
/// that only moves forward, so an id is never reused even after deletion.
/// When opened from the data directory, the collection is written back as a
/// JSON snapshot after every mutation.
pub struct MemoryStore {
    records: Vec<JobApplication>,
    next_id: u64,
    path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            path: None,
        }
    }

    pub fn with_records(records: Vec<JobApplication>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            records,
            next_id,
            path: None,
        }
    }

    /// Opens the store backed by the snapshot file in the user's data
    /// directory, creating an empty store on first run.
    pub fn open() -> Result<Self, StoreError> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut store = if path.exists() {
            let data = fs::read_to_string(&path)?;
            Self::with_records(serde_json::from_str(&data)?)
        } else {
            Self::new()
        };
        store.path = Some(path);
        Ok(store)
    }

    fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "apptrack") {
            proj_dirs.data_dir().join("applications.json")
        } else {
            PathBuf::from("applications.json")
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, data)?;
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationStore for MemoryStore {
    fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> Result<Option<JobApplication>, StoreError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn create(&mut self, new: NewApplication) -> Result<JobApplication, StoreError> {
        let id = self.next_id.to_string();
        self.next_id += 1;
        let today = Self::today();

        let record = JobApplication {
            id,
            site: new.site,
            position_title: new.position_title,
            company: new.company,
            application_date: new.application_date.or(Some(today)),
            status: new.status,
            response_notes: new.response_notes,
            interview_date: new.interview_date,
            job_posting_text: new.job_posting_text,
            job_url: new.job_url,
            tags: new.tags,
            last_updated: today,
        };
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn update(
        &mut self,
        id: &str,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let record = &mut self.records[idx];
        if let Some(site) = patch.site {
            record.site = site;
        }
        if let Some(title) = patch.position_title {
            record.position_title = title;
        }
        if let Some(company) = patch.company {
            record.company = company;
        }
        if let Some(date) = patch.application_date {
            record.application_date = Some(date);
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(notes) = patch.response_notes {
            record.response_notes = notes;
        }
        if let Some(interview) = patch.interview_date {
            record.interview_date = interview;
        }
        if let Some(text) = patch.job_posting_text {
            record.job_posting_text = text;
        }
        if let Some(url) = patch.job_url {
            record.job_url = Some(url);
        }
        if let Some(tags) = patch.tags {
            record.tags = tags;
        }
        record.last_updated = Self::today();

        let updated = record.clone();
        self.persist()?;
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.records.remove(idx);
        self.persist()?;
        Ok(())
    }
}
