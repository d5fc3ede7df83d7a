use crate::calendar::{
    activity_bars, bucket_by_date, build_calendar_grid, counts_for_month, max_daily, YearMonth,
};
use crate::errors::AppError;
use crate::models::{CalendarResponse, Deal};
use crate::route::{Route, Theme};
use crate::state::{AppState, Feed};
use crate::ui::{self, link};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub theme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<i64>,
    pub theme: Option<String>,
}

impl CalendarQuery {
    fn month(&self) -> YearMonth {
        let current = YearMonth::current();
        YearMonth::new(
            self.year.unwrap_or(current.year),
            self.month.unwrap_or(i64::from(current.month)),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct NavQuery {
    pub to: Option<String>,
    pub theme: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let theme = Theme::parse(query.theme.as_deref());
    Html(match state.snapshot().await {
        Feed::Ready(deals) => ui::render_home(&deals, theme),
        feed => render_pending(&feed, Route::Home, theme),
    })
}

pub async fn calendar_page(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Html<String> {
    let theme = Theme::parse(query.theme.as_deref());
    Html(match state.snapshot().await {
        Feed::Ready(deals) => ui::render_calendar(&deals, query.month(), theme),
        feed => render_pending(&feed, Route::Calendar, theme),
    })
}

pub async fn plugin_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> (StatusCode, Html<String>) {
    let theme = Theme::parse(query.theme.as_deref());
    match state.snapshot().await {
        Feed::Ready(deals) => match deals.iter().find(|deal| deal.id == id) {
            Some(deal) => (StatusCode::OK, Html(ui::render_plugin(deal, theme))),
            None => (StatusCode::NOT_FOUND, Html(ui::render_not_found(id, theme))),
        },
        feed => (
            StatusCode::OK,
            Html(render_pending(&feed, Route::PluginDetail(id), theme)),
        ),
    }
}

/// Maps a location fragment onto its page, keeping the theme.
pub async fn navigate(Query(query): Query<NavQuery>) -> Redirect {
    let route = Route::parse(query.to.as_deref().unwrap_or_default());
    let theme = Theme::parse(query.theme.as_deref());
    Redirect::to(&link(route, theme))
}

pub async fn get_deals(State(state): State<AppState>) -> Result<Json<Vec<Deal>>, AppError> {
    Ok(Json(ready_deals(&state).await?))
}

pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deal>, AppError> {
    ready_deals(&state)
        .await?
        .into_iter()
        .find(|deal| deal.id == id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no deal with id {id}")))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let deals = ready_deals(&state).await?;
    let month = query.month();
    let buckets = bucket_by_date(&deals);
    let counts = counts_for_month(&buckets, month);

    Ok(Json(CalendarResponse {
        year: month.year,
        month: month.month,
        label: month.label(),
        max_deals: max_daily(&counts),
        bars: activity_bars(&counts),
        cells: build_calendar_grid(&buckets, month),
        undated: buckets.undated.len(),
        counts,
    }))
}

async fn ready_deals(state: &AppState) -> Result<Vec<Deal>, AppError> {
    match state.snapshot().await {
        Feed::Ready(deals) => Ok(deals),
        Feed::Loading => Err(AppError::loading()),
        Feed::Failed(message) => Err(AppError::upstream(message)),
    }
}

fn render_pending(feed: &Feed, route: Route, theme: Theme) -> String {
    match feed {
        Feed::Failed(message) => ui::render_failed(route, theme, message),
        _ => ui::render_loading(route, theme),
    }
}
