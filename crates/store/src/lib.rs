//! Client-side core of the Homiak Finance terminal app: the REST API client,
//! the state slices with their reducers, and the derived aggregates. All
//! persistence and the authoritative balance live on the backend; this crate
//! only mirrors server responses into local state.

use api_types::{
    auth::{LoginRequest, RegisterRequest},
    goal::{GoalCreate, GoalQuery, GoalUpdate},
    transaction::{TransactionCreate, TransactionQuery, TransactionUpdate},
    user::UserUpdate,
};
use chrono::Utc;

pub use aggregate::{Totals, totals};
pub use amount::{Amount, AmountError};
pub use client::{ApiClient, ApiError};
pub use session::{token_expires_at, token_is_expired};
pub use slices::{
    OpPhase, auth::AuthSlice, goals::GoalsSlice, goals::funded_saved,
    transactions::TransactionsSlice,
};

mod aggregate;
mod amount;
mod client;
mod session;
mod slices;

/// The process-wide state container.
///
/// Holds one slice per domain and the API client. Every mutation goes through
/// an async action here: the action flips the slice to pending, performs the
/// request, and applies the fulfilled/rejected reducer. Failures surface as
/// messages in the slice `error` fields; nothing is retried. Two in-flight
/// mutations against the same entity are not serialized: last response wins.
#[derive(Debug)]
pub struct Store {
    pub auth: AuthSlice,
    pub transactions: TransactionsSlice,
    pub goals: GoalsSlice,
    client: ApiClient,
}

impl Store {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            auth: AuthSlice::default(),
            transactions: TransactionsSlice::default(),
            goals: GoalsSlice::default(),
            client: ApiClient::new(base_url),
        }
    }

    /// Session guard: clears all state and reports `false` when the access
    /// token is absent or its expiry claim has passed. The caller redirects
    /// to the login view; no refresh-token exchange is attempted.
    pub fn guard_session(&mut self) -> bool {
        if self.auth.session_expired(Utc::now()) {
            tracing::info!("session expired; forcing re-login");
            self.logout();
            return false;
        }
        true
    }

    pub async fn login(&mut self, email: String, password: String) {
        self.auth.pending();
        let payload = LoginRequest { email, password };
        let outcome = async {
            let tokens = self.client.login(&payload).await?;
            self.client.set_token(Some(tokens.access_token.clone()));
            let user = self.client.me().await?;
            Ok::<_, ApiError>((user, tokens))
        }
        .await;

        match outcome {
            Ok((user, tokens)) => {
                tracing::info!(user = %user.username, "signed in");
                self.transactions.set_capital(user.capital);
                self.auth.login_fulfilled(user, tokens);
            }
            Err(err) => {
                tracing::warn!("login failed: {err}");
                self.client.set_token(None);
                self.auth.login_rejected(err.to_string());
            }
        }
    }

    pub async fn register(&mut self, payload: RegisterRequest) {
        self.auth.pending();
        let outcome = async {
            let tokens = self.client.signup(&payload).await?;
            self.client.set_token(Some(tokens.access_token.clone()));
            let user = self.client.me().await?;
            Ok::<_, ApiError>((user, tokens))
        }
        .await;

        match outcome {
            Ok((user, tokens)) => {
                tracing::info!(user = %user.username, "account created");
                self.transactions.set_capital(user.capital);
                self.auth.login_fulfilled(user, tokens);
            }
            Err(err) => {
                tracing::warn!("registration failed: {err}");
                self.client.set_token(None);
                self.auth.login_rejected(err.to_string());
            }
        }
    }

    /// Destroys the session and every cached list.
    pub fn logout(&mut self) {
        self.client.set_token(None);
        self.auth.logout();
        self.transactions.clear();
        self.goals.clear();
    }

    pub async fn update_profile(&mut self, payload: UserUpdate) {
        self.auth.pending();
        match self.client.update_me(&payload).await {
            Ok(user) => {
                self.transactions.set_capital(user.capital);
                self.auth.profile_fulfilled(user);
            }
            Err(err) => self.auth.rejected(err.to_string()),
        }
    }

    /// Re-reads the `/users/me` snapshot, adopting the server capital.
    pub async fn refresh_profile(&mut self) {
        self.auth.pending();
        match self.client.me().await {
            Ok(user) => {
                self.transactions.set_capital(user.capital);
                self.auth.profile_fulfilled(user);
            }
            Err(err) => self.auth.rejected(err.to_string()),
        }
    }

    pub async fn fetch_transactions(&mut self, query: TransactionQuery) {
        self.transactions.pending();
        match self.client.transactions(&query).await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "transactions fetched");
                self.transactions.fetch_fulfilled(items);
            }
            Err(err) => self.transactions.rejected(err.to_string()),
        }
    }

    pub async fn create_transaction(&mut self, payload: TransactionCreate) {
        self.transactions.pending();
        match self.client.create_transaction(&payload).await {
            Ok(tx) => self.transactions.create_fulfilled(tx),
            Err(err) => self.transactions.rejected(err.to_string()),
        }
    }

    pub async fn update_transaction(&mut self, id: i64, payload: TransactionUpdate) {
        self.transactions.pending();
        match self.client.update_transaction(id, &payload).await {
            Ok(tx) => self.transactions.update_fulfilled(tx),
            Err(err) => self.transactions.rejected(err.to_string()),
        }
    }

    pub async fn delete_transaction(&mut self, id: i64) {
        self.transactions.pending();
        match self.client.delete_transaction(id).await {
            Ok(deleted) => self.transactions.delete_fulfilled(&deleted),
            Err(err) => self.transactions.rejected(err.to_string()),
        }
    }

    pub async fn fetch_goals(&mut self, query: GoalQuery) {
        self.goals.pending();
        match self.client.goals(&query).await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "goals fetched");
                self.goals.fetch_fulfilled(items);
            }
            Err(err) => self.goals.rejected(err.to_string()),
        }
    }

    pub async fn create_goal(&mut self, payload: GoalCreate) {
        self.goals.pending();
        match self.client.create_goal(&payload).await {
            Ok(goal) => self.goals.create_fulfilled(goal),
            Err(err) => self.goals.rejected(err.to_string()),
        }
    }

    pub async fn update_goal(&mut self, id: i64, payload: GoalUpdate) {
        self.goals.pending();
        match self.client.update_goal(id, &payload).await {
            Ok(goal) => self.goals.update_fulfilled(goal),
            Err(err) => self.goals.rejected(err.to_string()),
        }
    }

    /// Funds a goal: clamps `saved + amount` at the target *before* the PATCH
    /// goes out, so the server never sees an over-funded value.
    pub async fn fund_goal(&mut self, id: i64, amount: Amount) {
        let saved = match self.goals.by_id(id) {
            Some(goal) => funded_saved(goal, amount),
            None => {
                self.goals.rejected("Goal not found".to_string());
                return;
            }
        };
        let payload = GoalUpdate {
            saved: Some(saved.to_wire()),
            ..GoalUpdate::default()
        };
        self.update_goal(id, payload).await;
    }

    pub async fn delete_goal(&mut self, id: i64) {
        self.goals.pending();
        match self.client.delete_goal(id).await {
            Ok(()) => self.goals.delete_fulfilled(id),
            Err(err) => self.goals.rejected(err.to_string()),
        }
    }
}
