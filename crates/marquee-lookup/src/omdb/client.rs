use crate::error::LookupError;
use crate::omdb::api;
use crate::traits::MovieLookup;
use async_trait::async_trait;
use marquee_config::OmdbConfig;
use marquee_models::{Movie, SearchCandidate};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Arc::new(api::create_omdb_client()),
            base_url,
            api_key,
        }
    }

    pub fn from_config(config: &OmdbConfig) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self::new(api_key, config.base_url.clone()))
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        api::search_movies(&self.client, &self.base_url, &self.api_key, title).await
    }

    async fn details(&self, imdb_id: &str) -> Result<Movie, LookupError> {
        api::get_movie(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        let mut config = OmdbConfig::default();
        assert!(OmdbClient::from_config(&config).is_err());

        config.api_key = "k".to_string();
        let client = OmdbClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, marquee_config::DEFAULT_OMDB_BASE_URL);
    }

    #[tokio::test]
    async fn test_blank_title_never_hits_network() {
        // Unroutable base URL: reaching the network would surface as Transport, not EmptyQuery
        let client = OmdbClient::new("k".to_string(), "http://127.0.0.1:9/".to_string());
        let err = client.search("   ").await.unwrap_err();
        assert!(matches!(err, LookupError::EmptyQuery));
    }
}
