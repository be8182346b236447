//! Checkout form validation and order payload assembly.
//!
//! Validation reports every failing field at once so the form can surface
//! all problems in a single pass. Totals are computed from the cart lines
//! with decimal arithmetic; the assembled payload freezes the cart as it
//! stood at submission.

use barwaqo_cart::CartState;
use barwaqo_core::environment::Clock;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{NewOrder, OrderStatus, PaymentDetails, PaymentMethod, PaymentStatus};

/// Pricing knobs applied on top of the cart subtotal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Flat shipping fee added to every order
    pub shipping_fee: Decimal,
    /// Tax rate applied to the subtotal (e.g., `0.05` for 5%)
    pub tax_rate: Decimal,
}

impl CheckoutConfig {
    /// Create a config with the given fee and rate.
    #[must_use]
    pub const fn new(shipping_fee: Decimal, tax_rate: Decimal) -> Self {
        Self {
            shipping_fee,
            tax_rate,
        }
    }

    /// Set the flat shipping fee.
    #[must_use]
    pub const fn with_shipping_fee(mut self, fee: Decimal) -> Self {
        self.shipping_fee = fee;
        self
    }

    /// Set the tax rate.
    #[must_use]
    pub const fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }
}

impl Default for CheckoutConfig {
    /// $5 flat shipping, 5% tax.
    fn default() -> Self {
        Self {
            shipping_fee: Decimal::new(5, 0),
            tax_rate: Decimal::new(5, 2),
        }
    }
}

/// What the customer typed into the checkout form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Customer name
    pub name: String,
    /// Customer email
    pub email: String,
    /// Customer phone
    pub phone: String,
    /// Shipping street address
    pub address: String,
    /// Shipping city
    pub city: String,
    /// Shipping region
    pub region: String,
    /// Chosen payment method
    pub payment_method: PaymentMethod,
    /// Optional structured payment info
    pub payment_details: Option<PaymentDetails>,
}

/// A single failed validation, tied to the form field it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name
    pub field: &'static str,
    /// Human-readable message
    pub message: &'static str,
}

/// Why an order could not be assembled.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more form fields failed validation.
    #[error("checkout form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    /// The cart has no lines; there is nothing to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

fn validate(form: &CheckoutForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "name is required",
        });
    }
    if !form.email.contains('@') {
        errors.push(FieldError {
            field: "email",
            message: "email must contain '@'",
        });
    }
    if form.phone.trim().len() < 7 {
        errors.push(FieldError {
            field: "phone",
            message: "phone must have at least 7 digits",
        });
    }
    if form.address.trim().is_empty() {
        errors.push(FieldError {
            field: "address",
            message: "shipping address is required",
        });
    }
    if form.city.trim().is_empty() {
        errors.push(FieldError {
            field: "city",
            message: "city is required",
        });
    }

    errors
}

/// Assemble an order payload from a validated form and the current cart.
///
/// The cart lines are copied as-is; the total is subtotal plus the flat
/// shipping fee plus subtotal times the tax rate. A fresh random id is
/// generated and the order starts out `processing` / `pending`.
///
/// # Errors
///
/// Returns [`CheckoutError::Invalid`] listing every failing field, or
/// [`CheckoutError::EmptyCart`] when the cart has no lines.
pub fn build_order(
    form: &CheckoutForm,
    cart: &CartState,
    config: &CheckoutConfig,
    clock: &dyn Clock,
) -> Result<NewOrder, CheckoutError> {
    let errors = validate(form);
    if !errors.is_empty() {
        return Err(CheckoutError::Invalid(errors));
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal: Decimal = cart.items.iter().map(barwaqo_cart::CartLine::line_total).sum();
    let total_amount = subtotal + config.shipping_fee + subtotal * config.tax_rate;

    Ok(NewOrder {
        id: Uuid::new_v4().to_string(),
        customer_name: form.name.trim().to_string(),
        customer_email: form.email.trim().to_string(),
        customer_phone: form.phone.trim().to_string(),
        shipping_address: form.address.trim().to_string(),
        city: form.city.trim().to_string(),
        region: form.region.trim().to_string(),
        items: cart.items.clone(),
        total_amount,
        order_status: OrderStatus::Processing,
        payment_status: PaymentStatus::Pending,
        payment_method: form.payment_method,
        payment_details: form.payment_details.clone(),
        created_at: clock.now(),
    })
}
