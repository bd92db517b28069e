use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serde helpers for the backend's datetime strings.
///
/// The server emits ISO-8601 timestamps that may or may not carry an offset
/// depending on how the row was created; naive values are treated as UTC.
/// Outgoing values are always RFC 3339.
pub mod wire_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid datetime {raw:?}: {err}"))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|raw| super::parse(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub username: String,
        pub email: String,
        pub password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub default_currency: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub timezone: Option<String>,
    }

    /// Response of both `/auth/login` and `/auth/signup`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TokenPair {
        pub access_token: String,
        pub refresh_token: String,
    }
}

pub mod user {
    use super::*;

    /// Account role as stored by the backend (integer-coded enum).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(into = "u8", try_from = "u8")]
    pub enum UserRole {
        #[default]
        User,
        Admin,
    }

    impl From<UserRole> for u8 {
        fn from(value: UserRole) -> Self {
            match value {
                UserRole::User => 0,
                UserRole::Admin => 1,
            }
        }
    }

    impl TryFrom<u8> for UserRole {
        type Error = String;

        fn try_from(value: u8) -> Result<Self, Self::Error> {
            match value {
                0 => Ok(Self::User),
                1 => Ok(Self::Admin),
                other => Err(format!("invalid user role: {other}")),
            }
        }
    }

    /// Snapshot returned by `GET /users/me`.
    ///
    /// `capital` is the server-authoritative running balance.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id_: i64,
        pub username: String,
        pub email: String,
        pub default_currency: String,
        pub timezone: Option<String>,
        pub capital: f64,
        pub role: UserRole,
    }

    /// Request body for `PATCH /users/me`; unset fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub username: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub default_currency: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub timezone: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    /// Transaction polarity, integer-coded on the wire.
    ///
    /// The aggregation only distinguishes income and expense; transfers are
    /// carried for wire compatibility and ignored by the totals.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(into = "u8", try_from = "u8")]
    pub enum TransactionKind {
        #[default]
        Expense,
        Income,
        Transfer,
    }

    impl TransactionKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Expense => "expense",
                Self::Income => "income",
                Self::Transfer => "transfer",
            }
        }
    }

    impl From<TransactionKind> for u8 {
        fn from(value: TransactionKind) -> Self {
            match value {
                TransactionKind::Expense => 0,
                TransactionKind::Income => 1,
                TransactionKind::Transfer => 2,
            }
        }
    }

    impl TryFrom<u8> for TransactionKind {
        type Error = String;

        fn try_from(value: u8) -> Result<Self, Self::Error> {
            match value {
                0 => Ok(Self::Expense),
                1 => Ok(Self::Income),
                2 => Ok(Self::Transfer),
                other => Err(format!("invalid transaction kind: {other}")),
            }
        }
    }

    /// A transaction as returned by the backend.
    ///
    /// `new_capital` is only populated on create responses, where the server
    /// reports the updated running balance alongside the stored row.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Transaction {
        pub id_: i64,
        pub amount: f64,
        pub kind: TransactionKind,
        pub category_name: String,
        pub currency: Option<String>,
        #[serde(with = "wire_datetime")]
        pub date: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub new_capital: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        pub amount: f64,
        pub kind: TransactionKind,
        pub category_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub currency: Option<String>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "wire_datetime::option"
        )]
        pub date: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub currency: Option<String>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "wire_datetime::option"
        )]
        pub date: Option<DateTime<Utc>>,
    }

    /// Response of `DELETE /transactions/:id`.
    ///
    /// The body also echoes the deleted row; the client only needs the id and
    /// the updated balance.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionDeleted {
        pub id_: i64,
        pub new_capital: f64,
    }

    /// Query parameters of `GET /transactions`.
    #[derive(Debug, Default, Serialize)]
    pub struct TransactionQuery {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub offset: Option<u32>,
    }
}

pub mod goal {
    use super::*;

    /// A savings goal: `summ` is the target, `saved` the funded amount.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Goal {
        pub id_: i64,
        pub name: String,
        pub summ: f64,
        pub saved: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalCreate {
        pub name: String,
        pub summ: f64,
        pub saved: f64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GoalUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub summ: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub saved: Option<f64>,
    }

    /// Query parameters of `GET /goals`.
    #[derive(Debug, Default, Serialize)]
    pub struct GoalQuery {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub q: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub offset: Option<u32>,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::{Transaction, TransactionKind};
    use super::user::UserRole;

    #[test]
    fn transaction_kind_is_integer_coded() {
        assert_eq!(serde_json::to_string(&TransactionKind::Expense).unwrap(), "0");
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), "1");
        assert_eq!(
            serde_json::from_str::<TransactionKind>("2").unwrap(),
            TransactionKind::Transfer
        );
        assert!(serde_json::from_str::<TransactionKind>("7").is_err());
    }

    #[test]
    fn user_role_is_integer_coded() {
        assert_eq!(serde_json::from_str::<UserRole>("0").unwrap(), UserRole::User);
        assert_eq!(serde_json::from_str::<UserRole>("1").unwrap(), UserRole::Admin);
    }

    #[test]
    fn transaction_accepts_naive_and_offset_dates() {
        let naive = r#"{"id_":1,"amount":12.5,"kind":1,"category_name":"salary",
            "currency":"USD","date":"2025-03-01T10:00:00"}"#;
        let tx: Transaction = serde_json::from_str(naive).unwrap();
        assert_eq!(tx.kind, TransactionKind::Income);
        assert!(tx.new_capital.is_none());

        let offset = r#"{"id_":2,"amount":3.0,"kind":0,"category_name":"food",
            "currency":null,"date":"2025-03-01T10:00:00+02:00","new_capital":96.5}"#;
        let tx: Transaction = serde_json::from_str(offset).unwrap();
        assert_eq!(tx.new_capital, Some(96.5));
    }
}
