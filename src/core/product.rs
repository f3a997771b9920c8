//! Product business logic - catalog CRUD and image URL resolution.
//!
//! All write paths run the image relocation step from [`super::media`] before
//! touching the database, so a stored image always sits at
//! `product_images/<slug>/<filename>` relative to the media root.

use crate::{
    config::MediaConfig,
    core::media,
    entities::{OrderItem, Product, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, Value, prelude::*, sea_query::Expr};
use tracing::{info, instrument, warn};

/// Runs the relocation step for a pending image, if any.
///
/// None or an empty path means "no image" and performs no filesystem action.
fn prepare_image(media: &MediaConfig, name: &str, image: Option<&str>) -> Result<Option<String>> {
    match image {
        Some(path) if !path.is_empty() => {
            Ok(Some(media::relocate_image(&media.root, name, path)?))
        }
        _ => Ok(None),
    }
}

/// Creates a new product, relocating its image first when one is present.
///
/// # Errors
///
/// Returns `Error::Io` if the image folder cannot be created, or
/// `Error::Database` if the insert fails.
#[instrument(skip(db, media))]
pub async fn create_product(
    db: &DatabaseConnection,
    media: &MediaConfig,
    name: &str,
    price: f64,
    digital: bool,
    image: Option<&str>,
) -> Result<product::Model> {
    let image = prepare_image(media, name, image)?;

    let model = product::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        digital: Set(digital),
        image: Set(image),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(
        "Created product '{}' (ID: {}) priced at {}",
        created.name, created.id, created.price
    );
    Ok(created)
}

/// Updates a product, re-running the image relocation on every save.
///
/// The relocation re-derives the folder from the current name: unchanged
/// names yield the same stored path, while a renamed product gets a new path
/// without the old file being moved.
///
/// # Errors
///
/// Returns `Error::ProductNotFound` if no product has the given ID.
#[instrument(skip(db, media))]
pub async fn update_product(
    db: &DatabaseConnection,
    media: &MediaConfig,
    product_id: i64,
    name: &str,
    price: f64,
    digital: bool,
    image: Option<&str>,
) -> Result<product::Model> {
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let image = prepare_image(media, name, image)?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.price = Set(price);
    active.digital = Set(digital);
    active.image = Set(image);
    let updated = active.update(db).await?;
    info!("Updated product '{}' (ID: {})", updated.name, updated.id);
    Ok(updated)
}

/// Retrieves a product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a product, clearing the product link on surviving line items.
///
/// Line items are kept with a null product reference rather than deleted;
/// computing their total afterwards fails with `Error::MissingProduct`.
///
/// # Errors
///
/// Returns `Error::ProductNotFound` if no product has the given ID.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    OrderItem::update_many()
        .col_expr(order_item::Column::ProductId, Expr::value(Value::BigInt(None)))
        .filter(order_item::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    let res = Product::delete_by_id(product_id).exec(&txn).await?;
    if res.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }

    txn.commit().await?;
    info!("Deleted product ID {}", product_id);
    Ok(())
}

/// Resolves the public URL of a product's stored image.
///
/// Returns `None` both when no image is set and when the stored path does not
/// resolve to a file under the media root; the latter is logged so operators
/// can tell the two cases apart even though callers see the same value.
#[must_use]
pub fn image_url(product: &product::Model, media: &MediaConfig) -> Option<String> {
    let image = product.image.as_deref().filter(|path| !path.is_empty())?;
    if !media.root.join(image).is_file() {
        warn!(
            "Stored image path '{}' for product {} does not resolve under media root {:?}",
            image, product.id, media.root
        );
        return None;
    }
    Some(format!(
        "{}/{}",
        media.base_url.trim_end_matches('/'),
        image
    ))
}

/// Display form of [`image_url`]: collapses "no image" and "unresolvable
/// image" to an empty string.
#[must_use]
pub fn image_url_or_empty(product: &product::Model, media: &MediaConfig) -> String {
    image_url(product, media).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_test_tracing, setup_test_db, test_media_config};

    #[tokio::test]
    async fn test_create_product_relocates_image() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let (media_dir, media) = test_media_config()?;

        let created =
            create_product(&db, &media, "Red Hat!", 19.99, false, Some("photo.png")).await?;
        assert_eq!(
            created.image.as_deref(),
            Some("product_images/red-hat/photo.png")
        );
        assert!(media_dir.path().join("product_images/red-hat").is_dir());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_image_touches_nothing() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let (media_dir, media) = test_media_config()?;

        let created = create_product(&db, &media, "E-Book", 4.99, true, None).await?;
        assert_eq!(created.image, None);
        assert!(!media_dir.path().join("product_images").exists());
        assert_eq!(image_url_or_empty(&created, &media), "");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_resave_is_idempotent() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let (_media_dir, media) = test_media_config()?;

        let created =
            create_product(&db, &media, "Red Hat!", 19.99, false, Some("photo.png")).await?;
        let resaved = update_product(
            &db,
            &media,
            created.id,
            "Red Hat!",
            19.99,
            false,
            created.image.as_deref(),
        )
        .await?;
        assert_eq!(resaved.image, created.image);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_rename_derives_new_path_only() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let (media_dir, media) = test_media_config()?;

        let created =
            create_product(&db, &media, "Red Hat!", 19.99, false, Some("photo.png")).await?;
        let old_path = created.image.clone().unwrap();
        std::fs::write(media_dir.path().join(&old_path), b"png")?;

        let renamed = update_product(
            &db,
            &media,
            created.id,
            "Blue Hat!",
            19.99,
            false,
            Some(&old_path),
        )
        .await?;
        assert_eq!(
            renamed.image.as_deref(),
            Some("product_images/blue-hat/photo.png")
        );
        // The physical file stays in the old folder
        assert!(media_dir.path().join(&old_path).is_file());

        Ok(())
    }

    #[tokio::test]
    async fn test_image_url_resolution() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let (media_dir, media) = test_media_config()?;

        let created =
            create_product(&db, &media, "Red Hat!", 19.99, false, Some("photo.png")).await?;

        // Stored path exists in the database but the file is not on disk yet
        assert_eq!(image_url(&created, &media), None);
        assert_eq!(image_url_or_empty(&created, &media), "");

        std::fs::write(
            media_dir.path().join("product_images/red-hat/photo.png"),
            b"png",
        )?;
        assert_eq!(
            image_url(&created, &media).as_deref(),
            Some("/media/product_images/red-hat/photo.png")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_ordered_by_name() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let (_media_dir, media) = test_media_config()?;

        create_product(&db, &media, "Zither", 120.0, false, None).await?;
        create_product(&db, &media, "Accordion", 90.0, false, None).await?;

        let products = list_products(&db).await?;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Accordion");
        assert_eq!(products[1].name, "Zither");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_not_found() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let result = delete_product(&db, 999).await;
        assert!(matches!(result, Err(Error::ProductNotFound { id: 999 })));

        Ok(())
    }
}
