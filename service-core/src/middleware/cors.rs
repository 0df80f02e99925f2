use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Request headers browsers are allowed to send cross-origin.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Attach permissive CORS headers to every response, including errors and
/// preflight replies. `tower_http::cors::CorsLayer` only sends
/// `Access-Control-Allow-Headers` on preflight, so it is not used here.
pub async fn cors_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
