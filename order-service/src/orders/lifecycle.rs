//! Order input validation

use shared::models::{DEFAULT_ORDER_STATUS, NewOrder, OrderCreate};

use super::OrderError;

pub const MSG_CREATE_REQUIRED: &str = "User ID, Product ID, and Quantity are required";
pub const MSG_STATUS_REQUIRED: &str = "Status is required";

/// Check a create payload and fill in the default status
///
/// `user_id`, `product_id` and `quantity` must all be positive. `total_price`
/// is taken as supplied.
pub fn validate_create(input: OrderCreate) -> Result<NewOrder, OrderError> {
    if input.user_id <= 0 || input.product_id <= 0 || input.quantity <= 0 {
        return Err(OrderError::InvalidInput(MSG_CREATE_REQUIRED.to_string()));
    }

    let status = match input.status {
        Some(status) if !status.trim().is_empty() => status,
        _ => DEFAULT_ORDER_STATUS.to_string(),
    };

    Ok(NewOrder {
        user_id: input.user_id,
        product_id: input.product_id,
        quantity: input.quantity,
        total_price: input.total_price,
        status,
    })
}

/// Check a requested status; any non-empty value is accepted
pub fn validate_status(status: Option<&str>) -> Result<String, OrderError> {
    match status {
        Some(status) if !status.trim().is_empty() => Ok(status.to_string()),
        _ => Err(OrderError::InvalidInput(MSG_STATUS_REQUIRED.to_string())),
    }
}
