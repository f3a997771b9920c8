//! Media storage helpers for uploaded product images.
//!
//! Uploaded images are filed under `<media-root>/product_images/<slug>/`,
//! where the slug is derived from the product name. The relocation step is
//! invoked explicitly by the product save path rather than through a global
//! pre-save hook, so it can be tested in isolation.

use crate::errors::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Directory under the media root that holds per-product image folders.
pub const PRODUCT_IMAGE_DIR: &str = "product_images";

/// Derives a lowercase, filesystem-safe slug from a human-readable name.
///
/// ASCII alphanumerics are kept (lowercased); every other run of characters
/// collapses to a single `-`, with no leading or trailing separator.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Computes the stored path for a product image and ensures its folder exists.
///
/// Returns `product_images/<slug>/<filename>` where the slug comes from the
/// product name and the filename is the final path component of `image`
/// (so an already-relocated path relocates to itself). The folder is created
/// under `media_root` if absent; `create_dir_all` tolerates concurrent
/// creation.
///
/// If the product name changed since the image was stored, only the new path
/// is computed here; the physical file is not moved out of the old folder.
///
/// # Errors
///
/// Returns `Error::Io` if the folder cannot be created (permissions, disk
/// full).
pub fn relocate_image(media_root: &Path, product_name: &str, image: &str) -> Result<String> {
    let file_name = Path::new(image)
        .file_name()
        .map_or_else(|| image.to_string(), |f| f.to_string_lossy().into_owned());
    let slug = slugify(product_name);

    let folder = media_root.join(PRODUCT_IMAGE_DIR).join(&slug);
    fs::create_dir_all(&folder)?;
    debug!("Ensured product image folder exists at {:?}", folder);

    Ok(format!("{PRODUCT_IMAGE_DIR}/{slug}/{file_name}"))
}
