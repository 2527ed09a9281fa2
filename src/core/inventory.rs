use crate::core::{ConfigProvider, InventorySource};
use crate::domain::model::{CollectedItem, Extraction, InventoryItem, InventoryResponse};
use crate::utils::error::{CollectError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Inventory API over HTTP with Basic authentication.
pub struct InventoryClient {
    client: Client,
    url: String,
    login: String,
    password: String,
    timeout: Option<Duration>,
}

impl InventoryClient {
    pub fn new(
        url: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            login: login.into(),
            password: password.into(),
            timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let client = Self::new(config.api_url(), config.api_login(), config.api_password());
        match config.request_timeout_secs() {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl InventorySource for InventoryClient {
    async fn fetch_items(&self, article: &str) -> Result<Vec<InventoryItem>> {
        let mut request = self
            .client
            .get(&self.url)
            .query(&[("article", article)])
            .basic_auth(&self.login, Some(&self.password));

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Requesting items for article {:?} from {}", article, self.url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(CollectError::ApiStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        parse_inventory_response(&body)
    }
}

/// Decodes `{"result": [...]}`; anything else is a data format error.
pub fn parse_inventory_response(body: &str) -> Result<Vec<InventoryItem>> {
    let response: InventoryResponse = serde_json::from_str(body)
        .map_err(|e| CollectError::data_format(format!("cannot decode item list: {}", e)))?;
    Ok(response.result)
}

/// Queries the source once per required article, in order, and tags every
/// returned item with the article that produced it.
pub async fn fetch_all_items<I>(source: &I, required_articles: &[String]) -> Result<Extraction>
where
    I: InventorySource + ?Sized,
{
    let mut items = Vec::new();

    for required_article in required_articles {
        let fetched = source.fetch_items(required_article).await?;
        tracing::info!(
            "📦 {} items for required article {:?}",
            fetched.len(),
            required_article
        );
        items.extend(
            fetched
                .into_iter()
                .map(|item| CollectedItem::new(required_article.clone(), item)),
        );
    }

    let barcodes = items.iter().map(|i| i.barcode().to_string()).collect();

    Ok(Extraction {
        required_articles: required_articles.to_vec(),
        items,
        barcodes,
    })
}
