use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use warp::path::Tail;
use warp::{Filter, Rejection};

use crate::error::{handle_rejection, ApiError};
use crate::handlers::{checkin_handler, index_handler, status_handler, TokenQuery};
use crate::state::AppState;
use crate::utils::logger::log_request;

// Dependency injection for shared state
pub fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// The remainder of the path as an optional single, percent-decoded device segment.
/// `/status` and `/status/` yield `None`; deeper paths are not routes.
fn device_segment() -> impl Filter<Extract = (Option<String>,), Error = Rejection> + Clone {
    warp::path::tail().and_then(|tail: Tail| async move {
        match tail.as_str().trim_end_matches('/') {
            "" => Ok(None),
            rest if rest.contains('/') => Err(warp::reject::not_found()),
            rest => decode_segment(rest)
                .map(Some)
                .ok_or_else(|| warp::reject::custom(ApiError::MalformedRequest)),
        }
    })
}

fn decode_segment(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

pub fn routes(
    state: AppState,
    verbose: bool,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    let index_route = warp::path::end()
        .and(with_state(state.clone()))
        .and_then(index_handler);

    let checkin_route = warp::path("checkin")
        .and(device_segment())
        .and(warp::query::<TokenQuery>())
        .and(with_state(state.clone()))
        .and_then(checkin_handler);

    let status_route = warp::path("status")
        .and(device_segment())
        .and(warp::query::<TokenQuery>())
        .and(with_state(state))
        .and_then(status_handler);

    let access_log = warp::log::custom(move |info| {
        if verbose {
            log_request(info);
        }
    });

    index_route
        .or(checkin_route)
        .or(status_route)
        .recover(handle_rejection)
        .with(access_log)
}
