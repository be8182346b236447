//! Product operations against the backend's `products` table.

use crate::client::RemoteClient;
use crate::error::Result;
use crate::types::{NewProduct, Product, ProductPatch};

const PRODUCTS: &str = "products";

impl RemoteClient {
    /// Fetch the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get_rows(PRODUCTS, &[]).await
    }

    /// Look up a single product by id.
    ///
    /// Returns `Ok(None)` when no such product exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_product(&self, id: u64) -> Result<Option<Product>> {
        let mut rows: Vec<Product> = self
            .get_rows(PRODUCTS, &[("id", format!("eq.{id}"))])
            .await?;
        Ok(rows.pop())
    }

    /// Fetch the top-rated products, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails after retries.
    pub async fn fetch_featured_products(&self, limit: u32) -> Result<Vec<Product>> {
        self.get_rows(
            PRODUCTS,
            &[
                ("order", "rating.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Add a product to the catalog and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails, the backend
    /// rejects the insert, or the response cannot be decoded.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        tracing::info!(name = %product.name, "creating product");
        self.insert_row(PRODUCTS, product).await
    }

    /// Apply a partial update to a product. Unset fields are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails or the backend
    /// rejects the update.
    pub async fn update_product(&self, id: u64, patch: &ProductPatch) -> Result<()> {
        tracing::info!(product_id = id, "updating product");
        self.update_rows(PRODUCTS, &[("id", format!("eq.{id}"))], patch)
            .await
    }

    /// Remove a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError`] if the request fails or the backend
    /// rejects the delete.
    pub async fn delete_product(&self, id: u64) -> Result<()> {
        tracing::info!(product_id = id, "deleting product");
        self.delete_rows(PRODUCTS, &[("id", format!("eq.{id}"))])
            .await
    }
}
