use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddCartItemValidator {
    pub variant_id: Uuid,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 99, message = "quantity must be between 1 and 99"))]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Zero or less removes the line from the cart.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemValidator {
    #[validate(range(max = 99, message = "quantity must be at most 99"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct MigrateCartValidator {
    #[validate(length(min = 1, max = 128, message = "guest_session is required"))]
    pub guest_session: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        let payload: AddCartItemValidator = serde_json::from_value(serde_json::json!({
            "variant_id": Uuid::from_u128(1),
        }))
        .unwrap();
        assert_eq!(payload.quantity, 1);
        assert!(payload.validate().is_ok());

        let payload = AddCartItemValidator {
            variant_id: Uuid::from_u128(1),
            quantity: 0,
        };
        assert!(payload.validate().is_err());

        assert!(UpdateCartItemValidator { quantity: -1 }.validate().is_ok());
        assert!(UpdateCartItemValidator { quantity: 100 }.validate().is_err());
    }

    #[test]
    fn test_guest_session_required() {
        let payload = MigrateCartValidator {
            guest_session: String::new(),
        };
        assert!(payload.validate().is_err());
    }
}
