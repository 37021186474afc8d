//! HTTP handler functions for the disaster map API.

use actix_web::{HttpResponse, web};
use disaster_map_server_models::{
    ApiHealth, ApiMessage, ApiVoteResponse, CreateIncidentBody, PointBody, RouteBody, VoteBody,
};

use crate::{ApiError, AppState};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/incidents`
///
/// Lists every incident, newest first.
pub async fn list_incidents(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let incidents = state.service.list_incidents().await?;
    Ok(HttpResponse::Ok().json(incidents))
}

/// `POST /api/incidents`
pub async fn create_incident(
    state: web::Data<AppState>,
    body: web::Json<CreateIncidentBody>,
) -> Result<HttpResponse, ApiError> {
    let report = body.into_inner().resolve()?;
    let incident = state.service.create_incident(report).await?;
    Ok(HttpResponse::Created().json(incident))
}

/// `GET /api/incidents/{id}`
pub async fn get_incident(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let incident = state.service.get_incident(&path).await?;
    Ok(HttpResponse::Ok().json(incident))
}

/// `DELETE /api/incidents/{id}`
pub async fn delete_incident(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.service.delete_incident(&path).await?;
    Ok(HttpResponse::Ok().json(ApiMessage {
        message: "Incident deleted".to_string(),
    }))
}

/// `POST /api/incidents/{id}/vote`
///
/// A repeat vote from the same user is a 200 with status `alreadyVoted`.
pub async fn vote(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<VoteBody>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, action) = body.resolve()?;
    let outcome = state
        .service
        .vote_on_incident(&path, user_id, action)
        .await?;
    Ok(HttpResponse::Ok().json(ApiVoteResponse::new(outcome.status, outcome.incident)))
}

/// `POST /api/risk/check`
pub async fn check_risk(
    state: web::Data<AppState>,
    body: web::Json<PointBody>,
) -> Result<HttpResponse, ApiError> {
    let at = body.resolve()?;
    let report = state.service.check_point_risk(at).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// `POST /api/route/check`
///
/// Density check at evenly spaced samples along the route.
pub async fn check_route(
    state: web::Data<AppState>,
    body: web::Json<RouteBody>,
) -> Result<HttpResponse, ApiError> {
    let (start, end) = body.resolve()?;
    let report = state.service.check_route_density(start, end).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// `POST /api/route/corridor`
///
/// Score from incidents inside the corridor around the route segment.
pub async fn check_corridor(
    state: web::Data<AppState>,
    body: web::Json<RouteBody>,
) -> Result<HttpResponse, ApiError> {
    let (start, end) = body.resolve()?;
    let report = state.service.check_route_corridor(start, end).await?;
    Ok(HttpResponse::Ok().json(report))
}
