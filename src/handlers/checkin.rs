use crate::error::ApiError;
use crate::handlers::TokenQuery;
use crate::models::{Checkin, DeviceId};
use crate::state::AppState;
use crate::utils::logger::{log_checkin, log_rejected};

/// Records a check-in for `device`. Nothing is written unless every check passes.
pub fn checkin(
    state: &AppState,
    device: Option<&str>,
    token: Option<&str>,
) -> Result<(DeviceId, Checkin), ApiError> {
    let device = device
        .and_then(DeviceId::normalize)
        .ok_or(ApiError::MalformedRequest)?;
    state.checkin_token.check(token)?;
    let checkin = state.registry.touch(device.as_str())?;
    Ok((device, checkin))
}

pub async fn checkin_handler(
    device: Option<String>,
    query: TokenQuery,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    match checkin(&state, device.as_deref(), query.token.as_deref()) {
        Ok((device, _)) => {
            log_checkin(&device);
            Ok("OK")
        }
        Err(e) => {
            log_rejected("checkin", device.as_deref(), &e);
            Err(warp::reject::custom(e))
        }
    }
}
