use serde::{Deserialize, Serialize};

use crate::api::{self, Client};
use crate::state::Listing;

use super::Id;
use super::model::{TaxCase, TaxCaseDraft, TaxFilter, TaxStatus};

#[derive(Clone)]
pub struct TaxApi {
    client: Client,
}

#[derive(Deserialize)]
struct TaxCasePayload {
    #[serde(rename = "taxCase")]
    tax_case: TaxCase,
}

impl TaxApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn find_all(&self, page: u32, filter: &TaxFilter) -> super::Result<Listing<TaxCase>> {
        Ok(self.client.get("/api/tax", &filter.to_query(page)).await?)
    }

    pub async fn find_one(&self, id: &Id) -> super::Result<TaxCase> {
        let payload: TaxCasePayload = self.client.get(&format!("/api/tax/{id}"), &[]).await?;
        Ok(payload.tax_case)
    }

    pub async fn create(&self, draft: &TaxCaseDraft) -> super::Result<TaxCase> {
        let payload: TaxCasePayload = self.client.post("/api/tax", draft).await?;
        Ok(payload.tax_case)
    }

    pub async fn update(&self, id: &Id, draft: &TaxCaseDraft) -> super::Result<TaxCase> {
        let payload: TaxCasePayload = self.client.put(&format!("/api/tax/{id}"), draft).await?;
        Ok(payload.tax_case)
    }

    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        Ok(self.client.delete(&format!("/api/tax/{id}")).await?)
    }

    pub async fn change_status(&self, id: &Id, status: TaxStatus) -> super::Result<TaxCase> {
        #[derive(Serialize)]
        struct Body {
            status: TaxStatus,
        }

        let payload: TaxCasePayload = self
            .client
            .put(&format!("/api/tax/{id}/status"), &Body { status })
            .await?;
        Ok(payload.tax_case)
    }

    pub async fn add_documents(&self, id: &Id, documents: &[String]) -> super::Result<TaxCase> {
        api::validate_urls(documents)?;

        #[derive(Serialize)]
        struct Body<'a> {
            documents: &'a [String],
        }

        let payload: TaxCasePayload = self
            .client
            .post(&format!("/api/tax/{id}/documents"), &Body { documents })
            .await?;
        Ok(payload.tax_case)
    }

    pub async fn delete_document(&self, id: &Id, index: usize) -> super::Result<TaxCase> {
        let payload: TaxCasePayload = self
            .client
            .delete_returning(&format!("/api/tax/{id}/documents/{index}"))
            .await?;
        Ok(payload.tax_case)
    }
}
