use api_types::{
    auth::{LoginRequest, RegisterRequest, TokenPair},
    goal::{Goal, GoalCreate, GoalQuery, GoalUpdate},
    transaction::{
        Transaction, TransactionCreate, TransactionDeleted, TransactionQuery, TransactionUpdate,
    },
    user::{UserUpdate, UserView},
};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;

/// Error body shape of the backend (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Server { status: StatusCode, message: String },
}

/// Stateless wrapper around the backend REST API.
///
/// Holds the base URL and, once a session exists, the bearer token attached
/// to every request. All real computation (persistence, capital, token
/// issuance) happens on the server; methods only translate non-2xx responses
/// into [`ApiError`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send_json<T: for<'de> Deserialize<'de>>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::server_error(status, resp).await)
    }

    async fn send_unit(&self, req: RequestBuilder) -> Result<(), ApiError> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::server_error(status, resp).await)
    }

    async fn server_error(status: StatusCode, resp: reqwest::Response) -> ApiError {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("server error")
                .to_string(),
        };
        ApiError::Server { status, message }
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<TokenPair, ApiError> {
        self.send_json(self.http.post(self.url("/auth/login")).json(payload))
            .await
    }

    pub async fn signup(&self, payload: &RegisterRequest) -> Result<TokenPair, ApiError> {
        self.send_json(self.http.post(self.url("/auth/signup")).json(payload))
            .await
    }

    pub async fn me(&self) -> Result<UserView, ApiError> {
        self.send_json(self.http.get(self.url("/users/me"))).await
    }

    pub async fn update_me(&self, payload: &UserUpdate) -> Result<UserView, ApiError> {
        self.send_json(self.http.patch(self.url("/users/me")).json(payload))
            .await
    }

    pub async fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.send_json(self.http.get(self.url("/transactions")).query(query))
            .await
    }

    pub async fn create_transaction(
        &self,
        payload: &TransactionCreate,
    ) -> Result<Transaction, ApiError> {
        self.send_json(self.http.post(self.url("/transactions")).json(payload))
            .await
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        payload: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        self.send_json(
            self.http
                .patch(self.url(&format!("/transactions/{id}")))
                .json(payload),
        )
        .await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<TransactionDeleted, ApiError> {
        self.send_json(self.http.delete(self.url(&format!("/transactions/{id}"))))
            .await
    }

    pub async fn goals(&self, query: &GoalQuery) -> Result<Vec<Goal>, ApiError> {
        self.send_json(self.http.get(self.url("/goals")).query(query))
            .await
    }

    pub async fn create_goal(&self, payload: &GoalCreate) -> Result<Goal, ApiError> {
        self.send_json(self.http.post(self.url("/goals")).json(payload))
            .await
    }

    pub async fn update_goal(&self, id: i64, payload: &GoalUpdate) -> Result<Goal, ApiError> {
        self.send_json(self.http.patch(self.url(&format!("/goals/{id}"))).json(payload))
            .await
    }

    /// The backend answers 204 with no body.
    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.send_unit(self.http.delete(self.url(&format!("/goals/{id}"))))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/api/");
        assert_eq!(
            client.url("/transactions"),
            "http://127.0.0.1:8000/api/transactions"
        );
        assert_eq!(client.url("goals/3"), "http://127.0.0.1:8000/api/goals/3");
    }

    #[test]
    fn token_is_unset_until_login() {
        let mut client = ApiClient::new("http://127.0.0.1:8000/api");
        assert!(client.token().is_none());

        client.set_token(Some("jwt".to_string()));
        assert_eq!(client.token(), Some("jwt"));

        client.set_token(None);
        assert!(client.token().is_none());
    }
}
