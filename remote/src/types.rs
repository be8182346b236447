//! Record types exchanged with the hosted backend.
//!
//! Field names follow the backend's snake_case columns; statuses are
//! lowercase strings on the wire.

use barwaqo_cart::CartLine;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fulfillment status of an order.
///
/// These are the only values the admin UI writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order received, not yet shipped
    Processing,
    /// Order handed to the courier
    Shipped,
    /// Order delivered
    Completed,
    /// Order cancelled by customer or admin
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Payment state of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment
    Pending,
    /// Payment received
    Paid,
    /// Payment attempt failed
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// How the customer chose to pay.
///
/// Recording the choice is all this system does; actual payment collection
/// happens outside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Waafi mobile money
    Waafi,
    /// Cash on delivery
    Cash,
    /// Card
    Card,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waafi => write!(f, "waafi"),
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
        }
    }
}

/// Optional structured payment information attached to an order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Mobile-money number, when paying by Waafi
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Transaction reference from the payment provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Free-form payment type label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
}

/// A placed order, as stored in the backend's `orders` table.
///
/// `items` is a frozen copy of the cart lines at placement time; price and
/// quantity are no longer mutable. `total_amount` was computed client-side
/// at checkout and is trusted as submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Opaque unique id
    pub id: String,
    /// Customer name at checkout
    pub customer_name: String,
    /// Customer email at checkout
    pub customer_email: String,
    /// Customer phone at checkout
    pub customer_phone: String,
    /// Shipping street address
    pub shipping_address: String,
    /// Shipping city
    pub city: String,
    /// Shipping region
    pub region: String,
    /// Frozen cart lines
    pub items: Vec<CartLine>,
    /// Subtotal + shipping + tax, computed client-side
    pub total_amount: Decimal,
    /// Fulfillment status
    pub order_status: OrderStatus,
    /// Payment state
    pub payment_status: PaymentStatus,
    /// Chosen payment method
    pub payment_method: PaymentMethod,
    /// Optional structured payment info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new order.
///
/// Same shape as [`OrderRecord`]; a separate type keeps the create path
/// explicit about what the client is allowed to set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Client-generated opaque id
    pub id: String,
    /// Customer name
    pub customer_name: String,
    /// Customer email
    pub customer_email: String,
    /// Customer phone
    pub customer_phone: String,
    /// Shipping street address
    pub shipping_address: String,
    /// Shipping city
    pub city: String,
    /// Shipping region
    pub region: String,
    /// Frozen cart lines
    pub items: Vec<CartLine>,
    /// Subtotal + shipping + tax
    pub total_amount: Decimal,
    /// Always `processing` at creation
    pub order_status: OrderStatus,
    /// Always `pending` at creation
    pub payment_status: PaymentStatus,
    /// Chosen payment method
    pub payment_method: PaymentMethod,
    /// Optional structured payment info
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
    /// Placement timestamp
    pub created_at: DateTime<Utc>,
}

/// A catalog product, as stored in the backend's `products` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Image path
    pub image: String,
    /// Category label
    pub category: String,
    /// Average rating, used to pick featured products
    pub rating: Decimal,
    /// Units in stock
    pub stock: u32,
}

/// Insert payload for a new product (the backend assigns the id).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Image path
    pub image: String,
    /// Category label
    pub category: String,
    /// Average rating
    pub rating: Decimal,
    /// Units in stock
    pub stock: u32,
}

/// Partial update for a product; only set fields are written.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New unit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// New image path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// New category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New stock level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}
