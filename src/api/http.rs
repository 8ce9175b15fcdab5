use super::types::{
    ChatReply, ChatRequest, ContentResponse, DiscoverRequest, InteractionAck, InteractionRecord,
    RecommendationRequest, RecommendationResponse, SearchRequest,
};
use super::{RecommenderApi, endpoints};
use crate::error::{ApiError, ApiResult};
use crate::models::{CompleteFilters, ContentItem, UserProfile};
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// reqwest-backed client for the recommendation backend.
#[derive(Clone)]
pub struct HttpApi {
    http_client: HttpClient,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.http_client.post(self.url(endpoint)).json(body);
        self.execute(endpoint, request).await
    }

    async fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<R> {
        let request = self.http_client.get(self.url(endpoint));
        self.execute(endpoint, request).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<R> {
        tracing::debug!(endpoint, "Sending request");
        let transport = |source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "Backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl RecommenderApi for HttpApi {
    async fn discover(&self, filters: &CompleteFilters) -> ApiResult<Vec<ContentItem>> {
        let body = DiscoverRequest::from(filters);
        let response: ContentResponse = self.post_json(endpoints::DISCOVER, &body).await?;
        Ok(response.content)
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<ContentItem>> {
        let response: ContentResponse = self
            .post_json(endpoints::SEARCH, &SearchRequest { query })
            .await?;
        Ok(response.content)
    }

    async fn ai_chat(&self, message: &str, context: &serde_json::Value) -> ApiResult<ChatReply> {
        let body = ChatRequest {
            message,
            conversation_history: context,
        };
        self.post_json(endpoints::AI_CHAT, &body).await
    }

    async fn record_interaction(&self, record: &InteractionRecord) -> ApiResult<()> {
        let ack: InteractionAck = self.post_json(endpoints::INTERACTION, record).await?;
        match ack.status.as_deref() {
            None | Some("success") => Ok(()),
            Some(other) => Err(ApiError::Rejected(
                ack.message.unwrap_or_else(|| format!("status '{}'", other)),
            )),
        }
    }

    async fn user_profile(&self, user_id: &str) -> ApiResult<Option<UserProfile>> {
        match self.get_json::<UserProfile>(&endpoints::profile(user_id)).await {
            Ok(profile) if profile.is_empty() => Ok(None),
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> ApiResult<RecommendationResponse> {
        self.post_json(endpoints::RECOMMENDATIONS, request).await
    }

    async fn health(&self) -> ApiResult<()> {
        let _: serde_json::Value = self.get_json(endpoints::HEALTH).await?;
        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
