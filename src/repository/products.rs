//! Product domain methods on Repository

use sqlx::{postgres::PgRow, Row};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Product, ProductId, ProductStatus},
};

const PRODUCT_COLUMNS: &str = r#"
    id, sku, name, regular_price, sale_price, stock_quantity, manage_stock,
    description, short_description, status, featured,
    date_created, date_modified, date_on_sale_from, date_on_sale_to,
    image_id, gallery, category_ids, tag_ids
"#;

fn product_from_row(row: &PgRow) -> AppResult<Product> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<ProductStatus>()
        .map_err(AppError::Internal)?;

    Ok(Product {
        id: row.try_get("id")?,
        sku: row.try_get("sku")?,
        name: row.try_get("name")?,
        regular_price: row.try_get("regular_price")?,
        sale_price: row.try_get("sale_price")?,
        stock_quantity: row.try_get("stock_quantity")?,
        manage_stock: row.try_get("manage_stock")?,
        description: row.try_get("description")?,
        short_description: row.try_get("short_description")?,
        status,
        featured: row.try_get("featured")?,
        date_created: row.try_get("date_created")?,
        date_modified: row.try_get("date_modified")?,
        date_on_sale_from: row.try_get("date_on_sale_from")?,
        date_on_sale_to: row.try_get("date_on_sale_to")?,
        image_id: row.try_get("image_id")?,
        gallery: row.try_get("gallery")?,
        category_ids: row.try_get("category_ids")?,
        tag_ids: row.try_get("tag_ids")?,
    })
}

impl Repository {
    /// Find the id of the product owning a SKU
    pub async fn products_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE sku = $1")
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Get product by ID
    pub async fn products_get_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    /// Write back every mutable column of a loaded product
    pub async fn products_save(&self, product: &Product) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                sku = $2, name = $3, regular_price = $4, sale_price = $5,
                stock_quantity = $6, manage_stock = $7,
                description = $8, short_description = $9,
                status = $10, featured = $11,
                date_created = $12, date_modified = $13,
                date_on_sale_from = $14, date_on_sale_to = $15,
                image_id = $16, gallery = $17, category_ids = $18, tag_ids = $19
            WHERE id = $1
            "#,
        )
        .bind(product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.regular_price)
        .bind(&product.sale_price)
        .bind(product.stock_quantity)
        .bind(product.manage_stock)
        .bind(&product.description)
        .bind(&product.short_description)
        .bind(product.status.as_str())
        .bind(product.featured)
        .bind(product.date_created)
        .bind(product.date_modified)
        .bind(product.date_on_sale_from)
        .bind(product.date_on_sale_to)
        .bind(product.image_id)
        .bind(&product.gallery)
        .bind(&product.category_ids)
        .bind(&product.tag_ids)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Internal(format!(
                "Product {} vanished before save",
                product.id
            )));
        }
        Ok(())
    }
}
