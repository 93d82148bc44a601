use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::models::RegionInfo;
use crate::registry::{LookupError, RegionLookup};

/// Region lookup backed by the Samsat Firestore document store.
///
/// Documents live at `{base_url}/nopol/{region_code}/belakang/{letter}` and
/// carry a `fields` map of `{ "stringValue": ... }` entries.
#[derive(Debug, Clone)]
pub struct FirestoreRegistry {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl FirestoreRegistry {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn document_url(&self, region_code: &str, suffix_letter: char) -> String {
        format!(
            "{}/nopol/{}/belakang/{}",
            self.base_url, region_code, suffix_letter
        )
    }
}

impl RegionLookup for FirestoreRegistry {
    async fn lookup(
        &self,
        region_code: &str,
        suffix_letter: char,
    ) -> Result<RegionInfo, LookupError> {
        let url = self.document_url(region_code, suffix_letter);
        tracing::debug!(%url, "fetching region document");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "region request failed");
                LookupError::from(e)
            })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound {
                    region_code: region_code.to_string(),
                    suffix_letter,
                })
            }
            status => {
                tracing::warn!(%url, status = status.as_u16(), "unexpected region service status");
                return Err(LookupError::Status(status.as_u16()));
            }
        }

        let data: Value = response.json().await?;
        parse_document(&data)
    }
}

/// Extract [`RegionInfo`] from a Firestore document body.
fn parse_document(data: &Value) -> Result<RegionInfo, LookupError> {
    let fields = data
        .get("fields")
        .and_then(|f| f.as_object())
        .ok_or_else(|| LookupError::Payload("missing `fields` object".to_string()))?;

    let string_field = |name: &str| {
        fields
            .get(name)
            .and_then(|f| f.get("stringValue"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    Ok(RegionInfo {
        province: string_field("Provinsi"),
        city: string_field("Daerah"),
        samsat_office: string_field("Samsat"),
        address: string_field("Alamat"),
    })
}
