// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image: Option<String>,
    pub category_id: String,
}

fn default_available() -> bool {
    true
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.stock < 0 {
            return Err(AppError::validation("El stock no puede ser un número negativo"));
        }
        if self.price < 0.0 {
            return Err(AppError::validation("El precio no puede ser negativo"));
        }
        Ok(())
    }
}

/// Partial update payload. Lists exactly the mutable fields; unknown keys
/// (including `id` and `category`, which cannot be reassigned through this
/// endpoint) are rejected at deserialization.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if matches!(self.stock, Some(s) if s < 0) {
            return Err(AppError::validation("El stock no puede ser un número negativo"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub available: bool,
    pub image: Option<String>,
    pub category_id: String,
    pub created_at: Option<String>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            available: product.available,
            image: product.image,
            category_id: product.category_id,
            created_at: product.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_accepts_partial_payload() {
        let patch: UpdateProductRequest =
            serde_json::from_value(json!({ "stock": 3, "available": false })).unwrap();
        assert_eq!(patch.stock, Some(3));
        assert_eq!(patch.available, Some(false));
        assert!(patch.name.is_none());
        assert!(patch.price.is_none());
    }

    #[test]
    fn patch_rejects_id_key() {
        let result: Result<UpdateProductRequest, _> =
            serde_json::from_value(json!({ "id": "p-1", "stock": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_rejects_category_key() {
        let result: Result<UpdateProductRequest, _> =
            serde_json::from_value(json!({ "category": "c-1" }));
        assert!(result.is_err());

        let result: Result<UpdateProductRequest, _> =
            serde_json::from_value(json!({ "category_id": "c-1" }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_rejects_negative_stock() {
        let patch: UpdateProductRequest =
            serde_json::from_value(json!({ "stock": -1 })).unwrap();
        let err = patch.validate().unwrap_err();
        assert!(matches!(err, crate::error::AppError::Validation(_)));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = UpdateProductRequest { stock: Some(5), ..Default::default() };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "stock": 5 }));
    }

    #[test]
    fn create_rejects_negative_stock() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "name": "Catan",
            "description": "Colonos",
            "price": 39.99,
            "stock": -2,
            "category_id": "c-1"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
