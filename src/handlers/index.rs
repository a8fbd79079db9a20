use warp::http::header::CONTENT_TYPE;
use warp::http::StatusCode;
use warp::Reply;

use crate::state::AppState;
use crate::utils::logger::log_error_msg;

pub async fn index_handler(state: AppState) -> Result<warp::reply::Response, warp::Rejection> {
    match tokio::fs::read(state.index_html.as_path()).await {
        Ok(body) => Ok(
            warp::reply::with_header(body, CONTENT_TYPE, "text/html; charset=utf-8")
                .into_response(),
        ),
        Err(e) => {
            log_error_msg(
                "index",
                &format!("cannot open {}: {}", state.index_html.display(), e),
            );
            Ok(warp::reply::with_status("Not Found", StatusCode::NOT_FOUND).into_response())
        }
    }
}
