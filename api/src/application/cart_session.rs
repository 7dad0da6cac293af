use axum::{extract::Request, middleware::Next, response::Response};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const CART_SESSION_HEADER: &str = "x-cart-session";

const MAX_SESSION_LEN: usize = 128;

/// Cart session resolved from the request, stored in request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartSession(pub String);

pub fn parse_session(raw: &str) -> Result<String, ApiError> {
    let session = raw.trim();

    if session.is_empty() {
        return Err(ApiError::BadRequest("cart session is empty".to_string()));
    }
    if session.len() > MAX_SESSION_LEN
        || !session
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::BadRequest("cart session is malformed".to_string()));
    }

    Ok(session.to_string())
}

/// Requires an `x-cart-session` header on every cart route.
pub async fn cart_session(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let raw = req
        .headers()
        .get(CART_SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("missing {CART_SESSION_HEADER} header")))?;

    let session = parse_session(raw)?;
    req.extensions_mut().insert(CartSession(session));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        assert_eq!(parse_session(" guest-42 "), Ok("guest-42".to_string()));
        assert!(parse_session("").is_err());
        assert!(parse_session("a b").is_err());
        assert!(parse_session(&"x".repeat(129)).is_err());
    }
}
