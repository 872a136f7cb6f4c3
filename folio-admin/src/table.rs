use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::Backend;
use crate::error::{BackendError, Result};

/// Row filter, rendered as a `column=eq.value` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(String, String),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    fn param(&self) -> (String, String) {
        match self {
            Filter::Eq(column, value) => (column.clone(), format!("eq.{value}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    fn param(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column, direction)
    }
}

/// Tabular store: select / insert / update / delete by table name
pub struct TableClient<'a> {
    backend: &'a Backend,
    token: Option<&'a str>,
}

impl<'a> TableClient<'a> {
    pub(crate) fn new(backend: &'a Backend, token: Option<&'a str>) -> Self {
        Self { backend, token }
    }

    fn path(table: &str) -> String {
        format!("rest/v1/{table}")
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> Result<Vec<T>> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(filters.iter().map(Filter::param));
        if let Some(order) = order {
            query.push(("order".to_string(), order.param()));
        }

        let response = self
            .backend
            .request(Method::GET, &Self::path(table), self.token)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("select", response).await);
        }

        let rows: Vec<T> = response.json().await?;
        log::debug!("Selected {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .backend
            .request(Method::POST, &Self::path(table), self.token)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("insert", response).await);
        }

        let rows: Vec<T> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("inserted {table} row")))
    }

    /// Insert one row without reading it back. Works against tables that
    /// allow insert but not select; an empty 201/204 is success.
    pub async fn insert_minimal<B>(&self, table: &str, row: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .backend
            .request(Method::POST, &Self::path(table), self.token)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("insert", response).await);
        }

        log::debug!("Inserted row into {}", table);
        Ok(())
    }

    /// Patch the row with `id` and return it as stored.
    pub async fn update<B, T>(&self, table: &str, id: &str, patch: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .backend
            .request(Method::PATCH, &Self::path(table), self.token)
            .query(&[Filter::eq("id", id).param()])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("update", response).await);
        }

        let rows: Vec<T> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("{table} {id}")))
    }

    pub async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let response = self
            .backend
            .request(Method::DELETE, &Self::path(table), self.token)
            .query(&[Filter::eq("id", id).param()])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("delete", response).await);
        }

        log::debug!("Deleted {} {}", table, id);
        Ok(())
    }
}
