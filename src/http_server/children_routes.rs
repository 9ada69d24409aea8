//! Children HTTP Routes
//!
//! CRUD, listing, report and tree inspection for one record store. The
//! same router is mounted once per tree variant.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::observability::MetricsSnapshot;
use crate::schema::{ChildRecord, ChildUpdate, DocumentId, NewChild};
use crate::store::{CityGenderReport, RecordStore};
use crate::tree::{SearchTree, TraversalOrder, TreeInfo, TreeKind};

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// One record store behind a lock
pub struct StoreState<T> {
    kind: TreeKind,
    store: RwLock<RecordStore<T>>,
}

impl<T: SearchTree<ChildRecord>> StoreState<T> {
    pub fn new(store: RecordStore<T>) -> Self {
        Self {
            kind: store.kind(),
            store: RwLock::new(store),
        }
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, RecordStore<T>>> {
        self.store
            .read()
            .map_err(|_| ApiError::poisoned(self.kind.as_str()))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, RecordStore<T>>> {
        self.store
            .write()
            .map_err(|_| ApiError::poisoned(self.kind.as_str()))
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChildrenResponse {
    pub total: usize,
    pub order: TraversalOrder,
    pub children: Vec<ChildRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Children Routes
// ==================

/// Create the routes for one store
pub fn children_routes<T>(state: Arc<StoreState<T>>) -> Router
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    Router::new()
        .route("/children", get(list_handler::<T>).post(create_handler::<T>))
        .route("/children/tree/info", get(tree_info_handler::<T>))
        .route(
            "/children/:document",
            get(get_handler::<T>)
                .put(update_handler::<T>)
                .delete(delete_handler::<T>),
        )
        .route("/reports/children-by-city", get(report_handler::<T>))
        .route("/metrics", get(metrics_handler::<T>))
        .with_state(state)
}

fn parse_document(raw: &str) -> ApiResult<DocumentId> {
    raw.parse::<DocumentId>()
        .map_err(|_| ApiError::InvalidDocument(raw.to_string()))
}

// ==================
// Handlers
// ==================

async fn create_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
    body: Result<Json<NewChild>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ChildRecord>)>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    let Json(child) = body?;
    let record = state.write()?.create(child)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<ChildrenResponse>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    let Query(query) = query?;
    let store = state.read()?;
    let listing = store.list_by_param(query.order.as_deref())?;

    Ok(Json(ChildrenResponse {
        total: listing.total,
        order: listing.order,
        children: listing.children.into_iter().cloned().collect(),
    }))
}

async fn get_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
    Path(document): Path<String>,
) -> ApiResult<Json<ChildRecord>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    let document = parse_document(&document)?;
    let store = state.read()?;
    let record = store.get(document)?.clone();
    Ok(Json(record))
}

async fn update_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
    Path(document): Path<String>,
    body: Result<Json<ChildUpdate>, JsonRejection>,
) -> ApiResult<Json<ChildRecord>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    let document = parse_document(&document)?;
    let Json(update) = body?;
    let record = state.write()?.update(document, update)?;
    Ok(Json(record))
}

async fn delete_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
    Path(document): Path<String>,
) -> ApiResult<Json<MessageResponse>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    let document = parse_document(&document)?;
    state.write()?.delete(document)?;
    Ok(Json(MessageResponse {
        message: format!("Child with document {} deleted successfully", document),
    }))
}

async fn tree_info_handler<T>(State(state): State<Arc<StoreState<T>>>) -> ApiResult<Json<TreeInfo>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    Ok(Json(state.read()?.info()))
}

async fn report_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
) -> ApiResult<Json<Vec<CityGenderReport>>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    Ok(Json(state.read()?.report()))
}

async fn metrics_handler<T>(
    State(state): State<Arc<StoreState<T>>>,
) -> ApiResult<Json<MetricsSnapshot>>
where
    T: SearchTree<ChildRecord> + Send + Sync + 'static,
{
    Ok(Json(state.read()?.metrics()))
}
