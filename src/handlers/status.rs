use std::time::Instant;
use warp::Reply;

use crate::error::ApiError;
use crate::handlers::TokenQuery;
use crate::models::{classify, DeviceId, Liveness, StatusRow};
use crate::state::AppState;
use crate::utils::html::render_dashboard;
use crate::utils::logger::{log_rejected, log_status};

pub const CANARY_DEVICE: &str = "canary";

pub fn device_status(
    state: &AppState,
    device: &str,
    token: Option<&str>,
    now: Instant,
) -> Result<Liveness, ApiError> {
    state.status_token.check(token)?;
    let device = DeviceId::normalize(device).ok_or(ApiError::MalformedRequest)?;

    if state.canary_status && device.as_str() == CANARY_DEVICE {
        return Ok(Liveness::Online);
    }

    let last = state.registry.get(device.as_str())?;
    Ok(classify(last.map(|c| c.at), now, state.ttl))
}

/// One row per configured device, in configured order.
pub fn dashboard(
    state: &AppState,
    token: Option<&str>,
    now: Instant,
) -> Result<Vec<StatusRow>, ApiError> {
    state.status_token.check(token)?;

    let rows = state
        .registry
        .snapshot()
        .into_iter()
        .map(|(device, last)| StatusRow {
            device,
            last_checkin: last.map(|c| c.wall),
            seconds_since: last.map(|c| c.seconds_since(now)),
            liveness: classify(last.map(|c| c.at), now, state.ttl),
        })
        .collect();

    Ok(rows)
}

pub async fn status_handler(
    device: Option<String>,
    query: TokenQuery,
    state: AppState,
) -> Result<warp::reply::Response, warp::Rejection> {
    let now = Instant::now();
    let token = query.token.as_deref();

    let result = match device.as_deref() {
        Some(name) => device_status(&state, name, token, now).map(|liveness| {
            log_status(name, liveness);
            liveness.state().into_response()
        }),
        None => dashboard(&state, token, now)
            .map(|rows| warp::reply::html(render_dashboard(&rows)).into_response()),
    };

    result.map_err(|e| {
        log_rejected("status", device.as_deref(), &e);
        warp::reject::custom(e)
    })
}
