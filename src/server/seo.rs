//! Sitemap, robots, feed, JSON-LD and breadcrumb endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::error::ApiError;
use super::AppState;
use crate::seo::{
    breadcrumb_items, build_feed, build_sitemap, local_business_schema, offer_catalog_schema,
    organization_schema, render_robots_txt, render_sitemap_xml, robots, BreadcrumbItem,
    SchemaKind,
};

async fn sitemap_entries(state: &AppState) -> Result<Vec<crate::seo::SitemapEntry>, ApiError> {
    let config = state.config.clone();
    let store = state.store.clone();
    let entries = tokio::task::spawn_blocking(move || build_sitemap(&config, &store, Utc::now()))
        .await
        .map_err(|e| {
            tracing::error!("Sitemap task failed: {}", e);
            ApiError::Internal
        })??;
    Ok(entries)
}

pub async fn sitemap_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    let entries = sitemap_entries(&state).await?;
    Ok(Json(entries).into_response())
}

pub async fn sitemap_xml(State(state): State<AppState>) -> Result<Response, ApiError> {
    let entries = sitemap_entries(&state).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap_xml(&entries),
    )
        .into_response())
}

pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let body = render_robots_txt(&robots(state.config.base_url()));
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

pub async fn rss_xml(State(state): State<AppState>) -> Result<Response, ApiError> {
    let config = state.config.clone();
    let store = state.store.clone();
    let feed = tokio::task::spawn_blocking(move || build_feed(&config, &store, Utc::now()))
        .await
        .map_err(|e| {
            tracing::error!("Feed task failed: {}", e);
            ApiError::Internal
        })??;

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        feed,
    )
        .into_response())
}

pub async fn schema(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kind: SchemaKind = kind
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown schema: {kind}")))?;

    let doc = match kind {
        SchemaKind::Organization => organization_schema(&state.config),
        SchemaKind::LocalBusiness => local_business_schema(&state.config),
        SchemaKind::OfferCatalog => {
            let store = state.store.clone();
            let items = tokio::task::spawn_blocking(move || store.price_list())
                .await
                .map_err(|e| {
                    tracing::error!("Price list task failed: {}", e);
                    ApiError::Internal
                })??;
            offer_catalog_schema(&state.config, &items)
        }
    };
    Ok(Json(doc))
}

#[derive(Debug, Deserialize)]
pub struct BreadcrumbQuery {
    pub path: Option<String>,
}

pub async fn breadcrumbs(
    State(state): State<AppState>,
    Query(query): Query<BreadcrumbQuery>,
) -> Result<Json<Vec<BreadcrumbItem>>, ApiError> {
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing path parameter"))?;
    Ok(Json(breadcrumb_items(&state.config.seo.breadcrumbs, &path)))
}
