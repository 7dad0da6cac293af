use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use storefront_core::domain::catalog::filter_params::FilterParams;

/// Decodes the listing query string into [`FilterParams`].
///
/// Never rejects: unusable values are dropped the same way the codec does.
#[derive(Debug, Clone)]
pub struct FilterQuery(pub FilterParams);

impl<S> FromRequestParts<S> for FilterQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");

        Ok(FilterQuery(FilterParams::decode(query_string)))
    }
}
