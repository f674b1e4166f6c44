// src/handlers/product.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use sqlx::Error as SqlxError;
use uuid::Uuid;

use crate::dtos::product::{
    CreateProductRequest, DeleteProductResponse, ProductResponse, UpdateProductRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::product::Product;
use crate::state::AppState;
use tracing::{error, instrument};

fn map_foreign_key_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, stock, available, image, category_id, created_at
         FROM products ORDER BY name",
    )
    .fetch_all(&state.db_pool)
    .await
    {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, stock, available, image, category_id, created_at
         FROM products WHERE id = $1",
    )
    .bind(&id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Producto no encontrado"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    // Role gate first; body extraction is deferred so a non-admin never
    // sees a body-shaped response.
    ctx.require_admin()?;
    let Json(payload) = payload.map_err(|rej| AppError::validation(rej.body_text()))?;
    payload.validate()?;

    let id = Uuid::new_v4().to_string();
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, name, description, price, stock, available, image, category_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, name, description, price, stock, available, image, category_id, created_at",
    )
    .bind(&id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(payload.stock)
    .bind(payload.available)
    .bind(&payload.image)
    .bind(&payload.category_id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProductResponse::from(product)))
}

// PATCH /products/:id - Partial update; omitted fields are left unchanged
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    // Role gate first; body extraction is deferred so a non-admin never
    // sees a body-shaped response.
    ctx.require_admin()?;
    let Json(payload) = payload.map_err(|rej| AppError::validation(rej.body_text()))?;
    payload.validate()?;

    // A non-existent id raises RowNotFound and surfaces as a generic 500,
    // indistinguishable from other persistence failures.
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET
         name = COALESCE($1, name),
         description = COALESCE($2, description),
         price = COALESCE($3, price),
         stock = COALESCE($4, stock),
         available = COALESCE($5, available),
         image = COALESCE($6, image)
         WHERE id = $7
         RETURNING id, name, description, price, stock, available, image, category_id, created_at",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.stock)
    .bind(payload.available)
    .bind(payload.image)
    .bind(&id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product, refused while order items reference it
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<DeleteProductResponse>, AppError> {
    ctx.require_admin()?;

    // Existence check and delete run in one transaction so a concurrent
    // order-item insert cannot slip between them. The ON DELETE RESTRICT
    // constraint on order_items.product_id backs this up at the storage
    // level; a violation is reported as the same conflict.
    let mut tx = state.db_pool.begin().await?;

    let order_refs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE product_id = $1")
            .bind(&id)
            .fetch_one(&mut *tx)
            .await?;

    if order_refs > 0 {
        return Err(AppError::conflict(
            "No se puede eliminar un producto que ya forma parte de un pedido.",
        ));
    }

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(&id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(
                e,
                "No se puede eliminar un producto que ya forma parte de un pedido.",
            )
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::internal(format!("Product {id} not found on delete")));
    }

    tx.commit().await?;

    Ok(Json(DeleteProductResponse {
        message: "Producto eliminado".to_string(),
    }))
}
