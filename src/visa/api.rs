use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::api::{self, Client};
use crate::state::Listing;

use super::Id;
use super::model::{VisaApplication, VisaDraft, VisaFilter};

#[derive(Clone)]
pub struct VisaApi {
    client: Client,
}

#[derive(Deserialize)]
struct VisaPayload {
    #[serde(rename = "visaApplication")]
    visa_application: VisaApplication,
}

impl VisaApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn find_all(
        &self,
        page: u32,
        filter: &VisaFilter,
    ) -> super::Result<Listing<VisaApplication>> {
        Ok(self.client.get("/api/visa", &filter.to_query(page)).await?)
    }

    pub async fn find_one(&self, id: &Id) -> super::Result<VisaApplication> {
        let payload: VisaPayload = self.client.get(&format!("/api/visa/{id}"), &[]).await?;
        Ok(payload.visa_application)
    }

    pub async fn create(&self, draft: &VisaDraft) -> super::Result<VisaApplication> {
        let payload: VisaPayload = self.client.post("/api/visa", draft).await?;
        Ok(payload.visa_application)
    }

    pub async fn update(&self, id: &Id, draft: &VisaDraft) -> super::Result<VisaApplication> {
        let payload: VisaPayload = self.client.put(&format!("/api/visa/{id}"), draft).await?;
        Ok(payload.visa_application)
    }

    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        Ok(self.client.delete(&format!("/api/visa/{id}")).await?)
    }

    pub async fn add_documents(&self, id: &Id, documents: &[String]) -> super::Result<VisaApplication> {
        api::validate_urls(documents)?;

        #[derive(Serialize)]
        struct Body<'a> {
            documents: &'a [String],
        }

        let payload: VisaPayload = self
            .client
            .post(&format!("/api/visa/{id}/documents"), &Body { documents })
            .await?;
        Ok(payload.visa_application)
    }

    pub async fn delete_document(&self, id: &Id, index: usize) -> super::Result<VisaApplication> {
        let payload: VisaPayload = self
            .client
            .delete_returning(&format!("/api/visa/{id}/documents/{index}"))
            .await?;
        Ok(payload.visa_application)
    }

    pub async fn upload_images(
        &self,
        id: &Id,
        images: Vec<(String, Vec<u8>)>,
    ) -> super::Result<VisaApplication> {
        let mut form = Form::new();
        for (file_name, bytes) in images {
            form = form.part("images", Part::bytes(bytes).file_name(file_name));
        }

        let payload: VisaPayload = self
            .client
            .post_multipart(&format!("/api/visa/{id}/images"), form)
            .await?;
        Ok(payload.visa_application)
    }
}
