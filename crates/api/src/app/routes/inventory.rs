use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use stockkeep_core::{Entity, InventoryItemId, ValidationError};
use stockkeep_inventory::{codec, InventoryItem, ItemFilter};

use super::system::method_not_allowed;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/inventories",
            get(list_inventory_items)
                .post(create_inventory_item)
                .fallback(method_not_allowed),
        )
        .route(
            "/inventories/:id",
            get(get_inventory_item)
                .put(update_inventory_item)
                .delete(delete_inventory_item)
                .fallback(method_not_allowed),
        )
        .route(
            "/inventories/:id/in-stock",
            put(mark_in_stock).fallback(method_not_allowed),
        )
        .route(
            "/inventories/:id/out-of-stock",
            put(mark_out_of_stock).fallback(method_not_allowed),
        )
}

pub async fn list_inventory_items(
    Extension(services): Extension<AppServices>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> axum::response::Response {
    let params = match query {
        Ok(Query(pairs)) => dto::ListInventoryQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::error!(error = %rejection, "unreadable query string");
            return errors::json_error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    tracing::info!(?params, "request for inventory list");

    let filter = match params
        .into_item_query()
        .and_then(|query| ItemFilter::from_query(&query))
    {
        Ok(f) => f,
        Err(e) => return errors::validation_error_to_response(e),
    };

    let items = match services.repository().list(&filter).await {
        Ok(items) => items,
        Err(e) => return errors::repository_error_to_response(e),
    };

    let results: Vec<Value> = items.iter().map(codec::encode).collect();
    tracing::info!(%filter, count = results.len(), "returning inventory items");
    (StatusCode::OK, Json(results)).into_response()
}

pub async fn get_inventory_item(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    tracing::info!(item_id = %id, "request to read inventory item");
    let item = match load(&services, &id).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };
    (StatusCode::OK, Json(codec::encode(&item))).into_response()
}

pub async fn create_inventory_item(
    Extension(services): Extension<AppServices>,
    body: Bytes,
) -> axum::response::Response {
    tracing::info!("request to create an inventory item");

    let item = match parse_payload(&body).and_then(|payload| codec::decode(&payload)) {
        Ok(item) => item,
        Err(e) => return errors::validation_error_to_response(e),
    };

    let created = match services.repository().create(item).await {
        Ok(item) => item,
        Err(e) => return errors::repository_error_to_response(e),
    };

    let location = created
        .id()
        .map(|id| format!("/inventories/{id}"))
        .unwrap_or_else(|| "/inventories".to_string());
    tracing::info!(item_id = ?created.id(), sku = %created.sku, "inventory item created");

    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(codec::encode(&created)),
    )
        .into_response()
}

pub async fn update_inventory_item(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    tracing::info!(item_id = %id, "request to update inventory item");

    let mut item = match load(&services, &id).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };

    let applied = parse_payload(&body).and_then(|payload| item.apply_payload(&payload));
    if let Err(e) = applied {
        return errors::validation_error_to_response(e);
    }

    save(&services, item).await
}

pub async fn mark_in_stock(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    set_in_stock(&services, &id, true).await
}

pub async fn mark_out_of_stock(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    set_in_stock(&services, &id, false).await
}

/// Always 204: deleting an absent item is not an error.
pub async fn delete_inventory_item(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    tracing::info!(item_id = %id, "request to delete inventory item");
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repository().find(item_id).await {
        Ok(Some(item)) => {
            if let Err(e) = services.repository().delete(&item).await {
                return errors::repository_error_to_response(e);
            }
        }
        Ok(None) => {}
        Err(e) => return errors::repository_error_to_response(e),
    }

    tracing::info!(item_id = %item_id, "finished deleting inventory item");
    StatusCode::NO_CONTENT.into_response()
}

async fn set_in_stock(
    services: &AppServices,
    id: &str,
    in_stock: bool,
) -> axum::response::Response {
    tracing::info!(item_id = %id, in_stock, "request to update stock status");
    let mut item = match load(services, id).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };
    item.in_stock = in_stock;
    save(services, item).await
}

async fn save(services: &AppServices, item: InventoryItem) -> axum::response::Response {
    if let Err(e) = services.repository().update(&item).await {
        return errors::repository_error_to_response(e);
    }
    tracing::info!(item_id = ?item.id(), "inventory item updated");
    (StatusCode::OK, Json(codec::encode(&item))).into_response()
}

async fn load(services: &AppServices, id: &str) -> Result<InventoryItem, axum::response::Response> {
    let item_id = parse_item_id(id)?;
    match services.repository().find(item_id).await {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(errors::not_found(format!(
            "Inventory item with id '{item_id}' was not found."
        ))),
        Err(e) => Err(errors::repository_error_to_response(e)),
    }
}

fn parse_item_id(id: &str) -> Result<InventoryItemId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, format!("invalid inventory item id: {id}"))
    })
}

/// Malformed JSON is reported like any other unshaped payload.
fn parse_payload(body: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(body).map_err(|_| ValidationError::not_a_mapping())
}
