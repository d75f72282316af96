//! JSON content API

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::content::{BlogPost, CaseStudy, ContentError, ContentStore, Service, ServiceCategory};
use crate::helpers::{messenger_links, MessengerLinks};

/// Run a content read on the blocking pool
async fn read_content<T, F>(state: &AppState, read: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ContentStore) -> Result<T, ContentError> + Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || read(&store))
        .await
        .map_err(|e| {
            tracing::error!("Content task failed: {}", e);
            ApiError::Internal
        })?;
    Ok(result?)
}

fn parse_category(raw: &str) -> Result<ServiceCategory, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown service category: {raw}")))
}

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub category: Option<String>,
}

pub async fn blog_index(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = read_content(&state, move |store| match query.category.as_deref() {
        Some(category) if !category.is_empty() => store.blog_posts_by_category(category),
        _ => store.all_blog_posts(),
    })
    .await?;
    Ok(Json(posts))
}

#[derive(Debug, Serialize)]
pub struct BlogPostResponse {
    pub post: BlogPost,
    pub related: Vec<BlogPost>,
}

pub async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let response = read_content(&state, move |store| {
        let post = store.blog_post(&slug)?;
        let related = store.related_posts(&post.frontmatter.related_posts)?;
        Ok(BlogPostResponse { post, related })
    })
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct CaseQuery {
    pub service: Option<String>,
}

pub async fn case_index(
    State(state): State<AppState>,
    Query(query): Query<CaseQuery>,
) -> Result<Json<Vec<CaseStudy>>, ApiError> {
    let filter = match query.service.as_deref() {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<ServiceCategory>()
                .map_err(ApiError::bad_request)?,
        ),
        _ => None,
    };

    let cases = read_content(&state, move |store| match filter {
        Some(category) => store.cases_by_service_type(category),
        None => store.all_cases(),
    })
    .await?;
    Ok(Json(cases))
}

pub async fn case_study(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CaseStudy>, ApiError> {
    let case = read_content(&state, move |store| store.case_study(&slug)).await?;
    Ok(Json(case))
}

pub async fn service_index(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let category = parse_category(&category)?;
    let services = read_content(&state, move |store| store.services_by_order(category)).await?;
    Ok(Json(services))
}

pub async fn service_page(
    State(state): State<AppState>,
    Path((category, slug)): Path<(String, String)>,
) -> Result<Json<Service>, ApiError> {
    let category = parse_category(&category)?;
    let service = read_content(&state, move |store| store.service(category, &slug)).await?;
    Ok(Json(service))
}

#[derive(Debug, Deserialize)]
pub struct MessengerQuery {
    pub message: Option<String>,
}

pub async fn messenger(
    State(state): State<AppState>,
    Query(query): Query<MessengerQuery>,
) -> Json<MessengerLinks> {
    Json(messenger_links(
        &state.config.messenger,
        query.message.as_deref(),
    ))
}
