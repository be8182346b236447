//! Order operations against the backend's `orders` table.
//!
//! Reads retry transient failures; writes are single-attempt so a slow
//! response can never turn into a duplicate order.

use crate::client::RemoteClient;
use crate::error::Result;
use crate::types::{NewOrder, OrderRecord, OrderStatus, PaymentDetails, PaymentStatus};
use serde_json::json;

const ORDERS: &str = "orders";

/// Build the free-text search filter for orders.
///
/// Matches the term case-insensitively against customer name, email,
/// phone, and the order id itself.
fn search_filter(term: &str) -> String {
    let term = sanitize_term(term);
    format!(
        "(customer_name.ilike.*{term}*,customer_email.ilike.*{term}*,customer_phone.ilike.*{term}*,id.ilike.*{term}*)"
    )
}

// Commas, parens, and quotes are structural inside an `or=(...)` filter,
// and `*`/`%` are pattern wildcards; a search term must only ever match as
// a literal substring.
fn sanitize_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '\\' | '*' | '%'))
        .collect()
}

impl RemoteClient {
    /// Place a new order and return the stored record.
    ///
    /// Single attempt. On failure the caller keeps the cart intact and the
    /// customer can retry explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails, the backend
    /// rejects the insert, or the response cannot be decoded.
    pub async fn create_order(&self, order: &NewOrder) -> Result<OrderRecord> {
        tracing::info!(order_id = %order.id, "placing order");
        self.insert_row(ORDERS, order).await
    }

    /// Fetch all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_orders(&self) -> Result<Vec<OrderRecord>> {
        self.get_rows(ORDERS, &[("order", "created_at.desc".to_string())])
            .await
    }

    /// Look up a single order by id.
    ///
    /// Returns `Ok(None)` when no such order exists; absence is an empty
    /// state, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_order(&self, id: &str) -> Result<Option<OrderRecord>> {
        let mut rows: Vec<OrderRecord> = self
            .get_rows(ORDERS, &[("id", format!("eq.{id}"))])
            .await?;
        Ok(rows.pop())
    }

    /// Fetch a customer's orders by email, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_orders_by_customer(&self, email: &str) -> Result<Vec<OrderRecord>> {
        self.get_rows(
            ORDERS,
            &[
                ("customer_email", format!("eq.{email}")),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Fetch orders in a given fulfillment status, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_orders_by_status(&self, status: OrderStatus) -> Result<Vec<OrderRecord>> {
        self.get_rows(
            ORDERS,
            &[
                ("order_status", format!("eq.{status}")),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Free-text order search across name, email, phone, and id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn search_orders(&self, term: &str) -> Result<Vec<OrderRecord>> {
        self.get_rows(
            ORDERS,
            &[
                ("or", search_filter(term)),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Set the fulfillment status of an order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails or the backend
    /// rejects the update.
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        tracing::info!(order_id = %id, %status, "updating order status");
        self.update_rows(
            ORDERS,
            &[("id", format!("eq.{id}"))],
            &json!({ "order_status": status }),
        )
        .await
    }

    /// Set the payment status of an order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails or the backend
    /// rejects the update.
    pub async fn update_payment_status(&self, id: &str, status: PaymentStatus) -> Result<()> {
        tracing::info!(order_id = %id, %status, "updating payment status");
        self.update_rows(
            ORDERS,
            &[("id", format!("eq.{id}"))],
            &json!({ "payment_status": status }),
        )
        .await
    }

    /// Attach or replace the structured payment details of an order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails or the backend
    /// rejects the update.
    pub async fn update_payment_details(&self, id: &str, details: &PaymentDetails) -> Result<()> {
        tracing::info!(order_id = %id, "updating payment details");
        self.update_rows(
            ORDERS,
            &[("id", format!("eq.{id}"))],
            &json!({ "payment_details": details }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filter_covers_all_columns() {
        let filter = search_filter("mango");

        assert!(filter.starts_with('('));
        assert!(filter.ends_with(')'));
        assert!(filter.contains("customer_name.ilike.*mango*"));
        assert!(filter.contains("customer_email.ilike.*mango*"));
        assert!(filter.contains("customer_phone.ilike.*mango*"));
        assert!(filter.contains("id.ilike.*mango*"));
    }

    #[test]
    fn search_filter_embeds_plain_term() {
        assert_eq!(
            search_filter("a1"),
            "(customer_name.ilike.*a1*,customer_email.ilike.*a1*,customer_phone.ilike.*a1*,id.ilike.*a1*)"
        );
    }

    #[test]
    fn search_filter_strips_reserved_characters() {
        // A term carrying filter syntax cannot change the query shape.
        let filter = search_filter("a,b(c)*\"d\\%");

        assert_eq!(
            filter,
            "(customer_name.ilike.*abcd*,customer_email.ilike.*abcd*,customer_phone.ilike.*abcd*,id.ilike.*abcd*)"
        );
    }

    #[test]
    fn search_filter_keeps_email_punctuation() {
        let filter = search_filter("amina@example.com");
        assert!(filter.contains("customer_email.ilike.*amina@example.com*"));
    }
}
