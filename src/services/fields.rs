//! Field applicators for update-by-SKU items.
//!
//! Scalar fields are driven by [`SCALAR_FIELDS`], an ordered table of
//! `(name, applicator)` pairs. Each applicator copies its field onto the
//! product when the item carries it and reports whether it did.

use crate::models::{update::UpdateRequestItem, Product};

use super::urls::sanitize_url;

pub struct FieldApplicator {
    pub name: &'static str,
    pub apply: fn(&UpdateRequestItem, &mut Product) -> bool,
}

macro_rules! applicator {
    ($field:ident, |$item:ident, $product:ident, $value:ident| $body:expr) => {
        FieldApplicator {
            name: stringify!($field),
            apply: |$item, $product| match &$item.$field {
                Some($value) => {
                    $body;
                    true
                }
                None => false,
            },
        }
    };
}

/// Scalar fields in application order
pub const SCALAR_FIELDS: &[FieldApplicator] = &[
    applicator!(regular_price, |item, product, v| product.set_regular_price(v)),
    applicator!(sale_price, |item, product, v| product.set_sale_price(v)),
    applicator!(stock_quantity, |item, product, v| product.set_stock_quantity(*v)),
    applicator!(manage_stock, |item, product, v| product.set_manage_stock(*v)),
    applicator!(description, |item, product, v| product.set_description(v)),
    applicator!(short_description, |item, product, v| product.set_short_description(v)),
    applicator!(status, |item, product, v| product.set_status(*v)),
    applicator!(featured, |item, product, v| product.set_featured(*v)),
    applicator!(date_created, |item, product, v| product.set_date_created(*v)),
    applicator!(date_modified, |item, product, v| product.set_date_modified(*v)),
    applicator!(date_on_sale_from, |item, product, v| product.set_date_on_sale_from(*v)),
    applicator!(date_on_sale_to, |item, product, v| product.set_date_on_sale_to(*v)),
];

/// Apply every scalar field present on the item, returning the applied names
pub fn apply_scalar_fields(item: &UpdateRequestItem, product: &mut Product) -> Vec<&'static str> {
    SCALAR_FIELDS
        .iter()
        .filter_map(|field| (field.apply)(item, product).then_some(field.name))
        .collect()
}

/// `on_sale: true` prices the product at the explicit sale price, or at its
/// current regular price; `on_sale: false` clears the sale price. The sale
/// window dates are left alone either way.
pub fn apply_on_sale(item: &UpdateRequestItem, product: &mut Product) -> bool {
    match item.on_sale {
        Some(true) => {
            let price = match &item.sale_price {
                Some(explicit) => explicit.clone(),
                None => product.regular_price.clone().unwrap_or_default(),
            };
            product.set_sale_price(&price);
            true
        }
        Some(false) => {
            product.set_sale_price("");
            true
        }
        None => false,
    }
}

/// `image` replaces the whole image set; otherwise a non-empty `images` list
/// replaces the gallery with its usable entries.
pub fn apply_media(item: &UpdateRequestItem, product: &mut Product) -> bool {
    if let Some(image) = item.image.as_deref().filter(|s| !s.is_empty()) {
        product.replace_with_single_image(sanitize_url(image));
        return true;
    }

    let Some(images) = item.images.as_ref().filter(|images| !images.is_empty()) else {
        return false;
    };

    let gallery: Vec<String> = images
        .iter()
        .filter_map(|image| image.src.as_deref())
        .filter(|src| !src.is_empty())
        .map(sanitize_url)
        .filter(|url| !url.is_empty())
        .collect();

    if gallery.is_empty() {
        return false;
    }
    product.set_gallery(gallery);
    true
}

/// A non-empty `categories` list replaces the category set with its ids
pub fn apply_categories(item: &UpdateRequestItem, product: &mut Product) -> bool {
    match item.categories.as_ref().filter(|c| !c.is_empty()) {
        Some(categories) => {
            product.set_category_ids(categories.iter().filter_map(|c| c.id).collect());
            true
        }
        None => false,
    }
}
