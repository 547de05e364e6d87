use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::table::sort_newest_first;
use shared::{
    export_url, ApiErrorBody, CreateRecordResponse, EgresoRequest, ExportFormat, IngresoRequest,
    SaldoRow, TableRow, TransferenciaRequest,
};
use thiserror::Error;

/// Shown when a rejection carries no readable `detail`
const FALLBACK_ERROR: &str = "Error";

/// Failure of an API call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Error de red: {0}")]
    Network(String),

    /// The server rejected the request; holds its `detail` verbatim
    #[error("{0}")]
    Rejected(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

/// API client for the bookkeeping server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the origin that served the page
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register an income
    pub async fn create_ingreso(&self, request: &IngresoRequest) -> Result<CreateRecordResponse, ApiError> {
        self.post("/api/ingresos", request).await
    }

    /// Register an expense
    pub async fn create_egreso(&self, request: &EgresoRequest) -> Result<CreateRecordResponse, ApiError> {
        self.post("/api/egresos", request).await
    }

    /// Register a transfer between two accounts
    pub async fn create_transferencia(
        &self,
        request: &TransferenciaRequest,
    ) -> Result<CreateRecordResponse, ApiError> {
        self.post("/api/transferencias", request).await
    }

    /// Fetch every record of a resource, newest first
    pub async fn list<T>(&self) -> Result<Vec<T>, ApiError>
    where
        T: TableRow + DeserializeOwned,
    {
        let url = self.url(&format!("/api/{}", T::RESOURCE));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut rows: Vec<T> = Self::read(response).await?;
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    /// Fetch the current balance of every account
    pub async fn saldos(&self) -> Result<Vec<SaldoRow>, ApiError> {
        self.list::<SaldoRow>().await
    }

    /// Download URL for a filtered export of a resource
    pub fn export_url(&self, resource: &str, format: ExportFormat, filters: &[String]) -> String {
        format!("{}{}", self.base_url, export_url(resource, format, filters))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read(response).await
    }

    async fn read<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        if response.ok() {
            return response
                .json::<R>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected(rejection_message(&text)))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Message to show for a non-2xx body
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}
