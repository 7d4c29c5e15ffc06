use axum::{
    extract::{Path, Query, State},
    Json,
};
use gp_core::Error;
use gp_feed::{CultureSubView, RegionFilter, ViewMode, ViewSelection};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub region: Option<String>,
    pub q: Option<String>,
    pub view: Option<String>,
    pub culture: Option<String>,
}

impl FeedParams {
    fn selection(&self) -> Result<ViewSelection, ApiError> {
        let mut selection = ViewSelection::new();
        if let Some(region) = self.region.as_deref() {
            selection.set_region(region.parse::<RegionFilter>()?);
        }
        if let Some(view) = self.view.as_deref() {
            selection.set_view(view.parse::<ViewMode>()?);
        }
        if let Some(culture) = self.culture.as_deref() {
            selection.set_culture(culture.parse::<CultureSubView>()?);
        }
        if let Some(q) = self.q.as_deref() {
            selection.search(q);
        }
        Ok(selection)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReloadParams {
    pub force: Option<bool>,
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Value>, ApiError> {
    let selection = params.selection()?;
    let projection = state.feed.projection_for(&selection).await;
    let entries = selection.display_list(&projection);

    Ok(Json(json!({
        "cycle": projection.key.cycle,
        "region": selection.region.to_string(),
        "view": selection.view,
        "query": projection.key.query,
        "articles": entries.iter().map(|e| e.as_ref()).collect::<Vec<_>>(),
    })))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Value>, ApiError> {
    let selection = params.selection()?;
    let entry = state
        .feed
        .lookup(&selection, &key)
        .await
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    Ok(Json(json!({
        "article": entry.as_ref(),
        "source_host": entry.article.source_host(),
        "image": entry.article.display_image(),
    })))
}

pub async fn get_featured(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Value>, ApiError> {
    let selection = params.selection()?;
    let projection = state.feed.projection_for(&selection).await;
    Ok(Json(json!({ "featured": projection.featured.as_deref() })))
}

pub async fn get_headlines(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Value>, ApiError> {
    let selection = params.selection()?;
    let projection = state.feed.projection_for(&selection).await;
    Ok(Json(json!({
        "headlines": projection.headlines,
        "ticker": projection.ticker_text(),
    })))
}

pub async fn get_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.feed.status().await))
}

/// Runs one load cycle. Only one may run at a time; a second request while
/// one is in flight is refused rather than raced.
pub async fn reload(
    State(state): State<AppState>,
    Query(params): Query<ReloadParams>,
) -> Result<Json<Value>, ApiError> {
    let Some(_slot) = state.try_claim_reload() else {
        return Err(ApiError::Busy);
    };

    match state.feed.load(params.force.unwrap_or(false)).await {
        Ok(_) => Ok(Json(json!({ "status": state.feed.status().await }))),
        Err(e @ Error::Sync(_)) => {
            tracing::warn!("Reload succeeded but store sync failed: {}", e);
            Ok(Json(json!({
                "status": state.feed.status().await,
                "warning": e.user_message(),
            })))
        }
        Err(e) => Err(e.into()),
    }
}
