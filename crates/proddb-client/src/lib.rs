//! HTTP client for the recommendation/analytics backend.
//!
//! The backend is a collaborator, not part of this workspace: it accepts
//! `{session_id, message}` and replies with scored catalog items, plus a
//! read-only analytics summary. Paths and payload shapes follow the
//! service's v1 API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use proddb_core::error::{Error, Result};
use proddb_core::types::{CatalogStats, ProductRecord};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    session_id: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    results: Vec<RecommendedItem>,
}

/// Wire shape of one recommended item. The service returns typed lists and
/// numeric prices; mapping back onto [`ProductRecord`] re-encodes them in
/// the catalog's raw-text form so downstream filtering and rendering treat
/// remote results exactly like loaded rows.
#[derive(Deserialize)]
struct RecommendedItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
}

impl RecommendedItem {
    fn into_record(self) -> ProductRecord {
        ProductRecord {
            title: self.title,
            description: self.description,
            brand: self.brand,
            price: self.price.map(|p| format!("{p:.2}")),
            categories: join_nonempty(self.categories),
            images: join_nonempty(self.images),
            extra: Default::default(),
        }
    }
}

fn join_nonempty(values: Vec<String>) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

impl ServiceClient {
    /// Build a client against `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("proddb/0.1")
            .build()
            .map_err(|e| Error::Service(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /api/v1/recommend` with `{session_id, message}`.
    pub async fn recommend(&self, session_id: &str, message: &str) -> Result<Vec<ProductRecord>> {
        let url = format!("{}/api/v1/recommend", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RecommendRequest { session_id, message })
            .send()
            .await
            .map_err(|e| Error::Service(format!("recommend request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Service(format!("recommend returned {}", response.status())));
        }
        let body: RecommendResponse = response
            .json()
            .await
            .map_err(|e| Error::Service(format!("cannot parse recommend response: {e}")))?;
        Ok(body.results.into_iter().map(RecommendedItem::into_record).collect())
    }

    /// `GET /api/v1/analytics`.
    pub async fn analytics(&self) -> Result<CatalogStats> {
        let url = format!("{}/api/v1/analytics", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Service(format!("analytics request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Service(format!("analytics returned {}", response.status())));
        }
        response
            .json()
            .await
            .map_err(|e| Error::Service(format!("cannot parse analytics response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_request_shape() {
        let body = serde_json::to_value(RecommendRequest {
            session_id: "demo",
            message: "cozy sofa",
        })
        .expect("serialize");
        assert_eq!(body["session_id"], "demo");
        assert_eq!(body["message"], "cozy sofa");
    }

    #[test]
    fn recommended_item_maps_to_record() {
        let item: RecommendedItem = serde_json::from_value(serde_json::json!({
            "title": "Mid-Century Sofa",
            "brand": "Habitat",
            "price": 499.0,
            "categories": ["Living Room", "Sofas"],
            "images": ["http://img/sofa.png"],
            "material": "walnut"
        }))
        .expect("deserialize");
        let record = item.into_record();
        assert_eq!(record.title, "Mid-Century Sofa");
        assert_eq!(record.price.as_deref(), Some("499.00"));
        assert!(record.categories.as_deref().expect("categories").contains("Sofas"));
        assert_eq!(record.images.as_deref(), Some("http://img/sofa.png"));
    }

    #[test]
    fn missing_fields_stay_absent() {
        let item: RecommendedItem =
            serde_json::from_value(serde_json::json!({ "title": "Bare" })).expect("deserialize");
        let record = item.into_record();
        assert!(record.price.is_none());
        assert!(record.categories.is_none());
        assert!(record.images.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ServiceClient::new("http://localhost:8000/").expect("client");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
