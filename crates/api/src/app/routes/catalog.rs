use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use shelfscan_analytics::{
    CatalogView, EntrySummary, MostBottlesSummary, cheapest_by_unit_price, combined_report,
    exact_price_match, most_bottles as most_bottles_query, most_expensive_by_unit_price,
};
use shelfscan_core::DomainResult;
use shelfscan_infra::CatalogSnapshot;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Validate the requested location, then fetch a fresh snapshot.
async fn load_snapshot(
    services: &AppServices,
    location: DomainResult<Option<&str>>,
) -> Result<CatalogSnapshot, Response> {
    let location = location.map_err(errors::domain_error_to_response)?;
    services
        .snapshot(location)
        .await
        .map_err(errors::fetch_error_to_response)
}

fn single(entry: Option<EntrySummary>) -> Response {
    match entry {
        Some(entry) => (StatusCode::OK, Json(entry)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

pub async fn products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> Response {
    match load_snapshot(&services, query.location()).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot.products)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn cheapest(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> Response {
    let snapshot = match load_snapshot(&services, query.location()).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let view = CatalogView::flatten(&snapshot.products);
    single(cheapest_by_unit_price(view.entries(), services.policy()).map(EntrySummary::from))
}

pub async fn most_expensive(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> Response {
    let snapshot = match load_snapshot(&services, query.location()).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let view = CatalogView::flatten(&snapshot.products);
    single(most_expensive_by_unit_price(view.entries(), services.policy()).map(EntrySummary::from))
}

pub async fn exact_price(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::PriceQuery>,
) -> Response {
    let reference_price = match query.reference_price() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let snapshot = match load_snapshot(&services, query.location()).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let target = services.report_options(reference_price).reference_price;
    let view = CatalogView::flatten(&snapshot.products);
    let items = exact_price_match(view.entries(), target)
        .into_iter()
        .map(EntrySummary::from)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(items)).into_response()
}

pub async fn most_bottles(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> Response {
    let snapshot = match load_snapshot(&services, query.location()).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let view = CatalogView::flatten(&snapshot.products);
    match most_bottles_query(view.entries()).map(MostBottlesSummary::from) {
        Some(summary) => (StatusCode::OK, Json(summary)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

pub async fn all_routes(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::PriceQuery>,
) -> Response {
    let reference_price = match query.reference_price() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let snapshot = match load_snapshot(&services, query.location()).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let view = CatalogView::flatten(&snapshot.products);
    let report = combined_report(view.entries(), &services.report_options(reference_price));

    tracing::info!(
        entries = view.len(),
        exact_matches = report.exact_price.len(),
        "built combined report"
    );

    let body = dto::ReportResponse {
        report,
        source: snapshot.source.clone(),
        fetched_at: snapshot.fetched_at,
    };
    (StatusCode::OK, Json(body)).into_response()
}
