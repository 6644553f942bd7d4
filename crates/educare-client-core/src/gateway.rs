//! The seam between the flows and the remote data service.
//!
//! Flows only ever see [`DataGateway`]. The production implementation is
//! [`crate::GatewayClient`], tests substitute their own.

use educare_shared::{errors::GatewayError, uac::Email};
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Serialize};

/// Tables of the data service the clients read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Content,
    ActivityLogs,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Content => "content",
            Table::ActivityLogs => "activity_logs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
}

impl FilterOp {
    fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: &'static str,
    pub op: FilterOp,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

/// Row selection for a table. All conditions must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq<V: Into<String>>(self, column: &'static str, value: V) -> Self {
        self.with_condition(column, FilterOp::Eq, value.into())
    }

    pub fn gte<V: Into<String>>(self, column: &'static str, value: V) -> Self {
        self.with_condition(column, FilterOp::Gte, value.into())
    }

    pub fn order_desc(mut self, column: &'static str) -> Self {
        self.order = Some(Order {
            column,
            descending: true,
        });
        self
    }

    pub fn order_asc(mut self, column: &'static str) -> Self {
        self.order = Some(Order {
            column,
            descending: false,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn order(&self) -> Option<Order> {
        self.order
    }

    pub fn max_rows(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the value required for `column` by an equality condition
    pub fn eq_value(&self, column: &str) -> Option<&str> {
        self.conditions
            .iter()
            .find(|c| c.op == FilterOp::Eq && c.column == column)
            .map(|c| c.value.as_str())
    }

    /// Query string pairs in the form the REST interface of the data service
    /// expects (`column=op.value`)
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut result = vec![("select".to_string(), "*".to_string())];
        result.extend(
            self.conditions
                .iter()
                .map(|c| (c.column.to_string(), format!("{}.{}", c.op.as_str(), c.value))),
        );
        if let Some(order) = self.order {
            let direction = if order.descending { "desc" } else { "asc" };
            result.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        if let Some(limit) = self.limit {
            result.push(("limit".to_string(), limit.to_string()));
        }
        result
    }

    fn with_condition(mut self, column: &'static str, op: FilterOp, value: String) -> Self {
        self.conditions.push(Condition { column, op, value });
        self
    }
}

/// Operations the flows need from the remote data service.
///
/// Every failure, whether the service could not be reached or it answered
/// with an error, comes back as a [`GatewayError`] so callers can tell them
/// apart from "no such row".
#[allow(async_fn_in_trait)] // Only driven from the single threaded UI event loop
pub trait DataGateway {
    async fn query_rows<T>(&self, table: Table, filter: &Filter) -> Result<Vec<T>, GatewayError>
    where
        T: DeserializeOwned + Send + 'static;

    /// Like [`Self::query_rows`] but for lookups that must match at most one
    /// row. More than one match is reported as [`GatewayError::MultipleRows`].
    async fn query_row<T>(&self, table: Table, filter: &Filter) -> Result<Option<T>, GatewayError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        // Two rows are enough to detect the ambiguity
        let filter = filter.clone().limit(2);
        let mut rows = self.query_rows::<T>(table, &filter).await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            count => Err(GatewayError::MultipleRows { count }),
        }
    }

    /// Inserts `record` and returns the row as stored
    async fn insert_row<R, T>(&self, table: Table, record: &R) -> Result<T, GatewayError>
    where
        R: Serialize + Sync,
        T: DeserializeOwned + Send + 'static;

    async fn count_rows(&self, table: Table, filter: &Filter) -> Result<u64, GatewayError>;

    /// Checks the credentials with the service's authentication primitive.
    /// Wrong credentials are `Ok(false)`, not an error.
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<bool, GatewayError>;

    /// Creates the credentials for a new account. An email that is already
    /// registered is reported as [`GatewayError::Conflict`].
    async fn register_credentials(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), GatewayError>;

    /// Drops any credentials held for the current user. Does not wait for the
    /// service to acknowledge.
    fn sign_out(&self) {}
}
