use thiserror::Error;

use crate::models::ProductId;

/// Errors surfaced by the remote product service client.
///
/// Every variant carries a message suitable for showing to the operator
/// unchanged; callers prepend the action that failed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response: connection failure,
    /// an unexpected status, or a body that could not be decoded.
    #[error("Network error: {reason}")]
    Network { reason: String },

    /// The server answered 404 for the addressed product.
    #[error("Product {id} not found")]
    NotFound { id: ProductId },

    /// The server rejected the payload with a structured 4xx body.
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// First failure found when validating the staged form fields, checked in
/// field order: name, then price, then stock quantity.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("Product name is required")]
    NameRequired,

    #[error("Price must be a number greater than zero")]
    InvalidPrice,

    #[error("Stock quantity must be an integer greater than or equal to zero")]
    InvalidStockQuantity,
}
