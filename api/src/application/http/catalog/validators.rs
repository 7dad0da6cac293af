use serde::{Deserialize, Serialize};
use storefront_core::domain::catalog::filter_params::{FilterDimension, FilterParams};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// One edit of the listing filters, applied to an encoded query string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterAction {
    Add {
        dimension: FilterDimension,
        value: String,
    },
    Remove {
        dimension: FilterDimension,
        value: String,
    },
    Clear {
        dimension: FilterDimension,
    },
    ClearAll,
    SetSort {
        sort: String,
    },
}

impl FilterAction {
    pub fn apply(&self, params: &FilterParams) -> FilterParams {
        match self {
            FilterAction::Add { dimension, value } => params.add_filter(*dimension, value),
            FilterAction::Remove { dimension, value } => params.remove_filter(*dimension, value),
            FilterAction::Clear { dimension } => params.clear_filter(*dimension),
            FilterAction::ClearAll => FilterParams::clear_all(),
            FilterAction::SetSort { sort } => params.set_sort(sort),
        }
    }
}

fn validate_action(action: &FilterAction) -> Result<(), ValidationError> {
    match action {
        FilterAction::Add { value, .. } | FilterAction::Remove { value, .. }
            if value.trim().is_empty() =>
        {
            Err(ValidationError::new("empty_value").with_message("value is required".into()))
        }
        FilterAction::SetSort { sort } if sort.trim().is_empty() => {
            Err(ValidationError::new("empty_sort").with_message("sort is required".into()))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApplyFilterActionValidator {
    /// Current listing query string, with or without the leading `?`
    #[serde(default)]
    #[validate(length(max = 2048, message = "query is too long"))]
    pub query: String,

    #[validate(custom(function = "validate_action"))]
    pub action: FilterAction,
}
