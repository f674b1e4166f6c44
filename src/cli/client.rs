use anyhow::{bail, Result};
use reqwest::StatusCode;

use crate::dtos::product::{DeleteProductResponse, ProductResponse, UpdateProductRequest};

/// HTTP client for the product endpoints, authenticated with a bearer token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub async fn list_products(&self) -> Result<Vec<ProductResponse>> {
        let res = self
            .http
            .get(format!("{}/products", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            bail!("{}", error_message(status, &body));
        }
        Ok(res.json().await?)
    }

    pub async fn update_product(
        &self,
        id: &str,
        patch: &UpdateProductRequest,
    ) -> Result<ProductResponse> {
        let res = self
            .http
            .patch(format!("{}/products/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .json(patch)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            bail!("{}", error_message(status, &body));
        }
        Ok(res.json().await?)
    }

    pub async fn delete_product(&self, id: &str) -> Result<String> {
        let res = self
            .http
            .delete(format!("{}/products/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            bail!("{}", error_message(status, &body));
        }
        let confirmation: DeleteProductResponse = res.json().await?;
        Ok(confirmation.message)
    }
}

/// The server reports errors as `{ "error": ..., "code": ... }`; surface the
/// message verbatim, falling back to the raw body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("Error {status}")
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_structured_error_field() {
        let body = r#"{"error":"No se puede eliminar un producto que ya forma parte de un pedido.","code":"conflict"}"#;
        assert_eq!(
            error_message(StatusCode::CONFLICT, body),
            "No se puede eliminar un producto que ya forma parte de un pedido."
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn falls_back_to_status_on_empty_body() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Error 500 Internal Server Error"
        );
    }
}
