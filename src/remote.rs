use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::models::{ApplicationPatch, JobApplication, NewApplication};
use crate::store::{ApplicationStore, StoreError};

/// REST-backed store. Endpoints follow the collection mapping: GET/POST
/// `/jobs` and GET/PUT/DELETE `/jobs/{id}`. A 404 becomes `NotFound`; any
/// other HTTP or connection failure surfaces as `Transport`.
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/jobs/{}", self.base_url, id)
    }
}

impl ApplicationStore for RemoteStore {
    fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        let resp = self
            .client
            .get(self.collection_url())
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    fn get(&self, id: &str) -> Result<Option<JobApplication>, StoreError> {
        let resp = self.client.get(self.item_url(id)).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?.json()?))
    }

    fn create(&mut self, new: NewApplication) -> Result<JobApplication, StoreError> {
        let resp = self
            .client
            .post(self.collection_url())
            .json(&new)
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    fn update(
        &mut self,
        id: &str,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, StoreError> {
        let resp = self.client.put(self.item_url(id)).json(&patch).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(resp.error_for_status()?.json()?)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let resp = self.client.delete(self.item_url(id)).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        resp.error_for_status()?;
        Ok(())
    }
}
