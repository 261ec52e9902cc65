use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::api::Client;
use crate::state::Listing;

use super::Id;
use super::model::{Property, PropertyDraft, PropertyFilter};

#[derive(Clone)]
pub struct PropertyApi {
    client: Client,
}

#[derive(Deserialize)]
struct PropertyPayload {
    property: Property,
}

impl PropertyApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn find_all(
        &self,
        page: u32,
        filter: &PropertyFilter,
    ) -> super::Result<Listing<Property>> {
        let query = filter.to_query(page);
        Ok(self.client.get("/api/real-estate", &query).await?)
    }

    pub async fn find_one(&self, id: &Id) -> super::Result<Property> {
        let payload: PropertyPayload = self
            .client
            .get(&format!("/api/real-estate/{id}"), &[])
            .await?;
        Ok(payload.property)
    }

    pub async fn create(&self, draft: &PropertyDraft) -> super::Result<Property> {
        let payload: PropertyPayload = self.client.post("/api/real-estate", draft).await?;
        Ok(payload.property)
    }

    pub async fn update(&self, id: &Id, draft: &PropertyDraft) -> super::Result<Property> {
        let payload: PropertyPayload = self
            .client
            .put(&format!("/api/real-estate/{id}"), draft)
            .await?;
        Ok(payload.property)
    }

    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        Ok(self.client.delete(&format!("/api/real-estate/{id}")).await?)
    }

    /// Multipart upload; each image becomes one `images` part.
    pub async fn upload_images(
        &self,
        id: &Id,
        images: Vec<(String, Vec<u8>)>,
    ) -> super::Result<Property> {
        let mut form = Form::new();
        for (file_name, bytes) in images {
            form = form.part("images", Part::bytes(bytes).file_name(file_name));
        }

        let payload: PropertyPayload = self
            .client
            .post_multipart(&format!("/api/real-estate/{id}/images"), form)
            .await?;
        Ok(payload.property)
    }

    pub async fn delete_image(&self, id: &Id, index: usize) -> super::Result<Property> {
        let payload: PropertyPayload = self
            .client
            .delete_returning(&format!("/api/real-estate/{id}/images/{index}"))
            .await?;
        Ok(payload.property)
    }
}
