use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, Shop};
use crate::users::{User, UserRole};
use crate::ConfigError;

/// Users, shops and products the application serves. Loaded from YAML and
/// read-only at runtime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub shops: Vec<Shop>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product joined with the shop that sells it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductWithShop {
    #[serde(flatten)]
    pub product: Product,
    pub shop: Shop,
}

impl AsRef<Product> for ProductWithShop {
    fn as_ref(&self) -> &Product {
        &self.product
    }
}

/// An admin account with its shop and that shop's products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminWithShop {
    #[serde(flatten)]
    pub user: User,
    pub shop: Option<Shop>,
    pub products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn shop_for_owner(&self, owner_id: &str) -> Option<&Shop> {
        self.shops.iter().find(|s| s.owner_id == owner_id)
    }

    #[must_use]
    pub fn products_for_shop(&self, shop_id: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.shop_id == shop_id)
            .cloned()
            .collect()
    }

    /// Every product with its shop, in catalog order. Products whose shop is
    /// missing are skipped; [`validate_catalog`] rejects those at load time.
    #[must_use]
    pub fn products_with_shop(&self) -> Vec<ProductWithShop> {
        self.products
            .iter()
            .filter_map(|product| {
                self.shops
                    .iter()
                    .find(|s| s.id == product.shop_id)
                    .map(|shop| ProductWithShop {
                        product: product.clone(),
                        shop: shop.clone(),
                    })
            })
            .collect()
    }

    /// Every `admin` user with their shop (if they have one) and its products.
    #[must_use]
    pub fn admins_with_shops(&self) -> Vec<AdminWithShop> {
        self.users
            .iter()
            .filter(|u| u.role == UserRole::Admin)
            .map(|user| {
                let shop = self.shop_for_owner(&user.id).cloned();
                let products = shop
                    .as_ref()
                    .map(|s| self.products_for_shop(&s.id))
                    .unwrap_or_default();
                AdminWithShop {
                    user: user.clone(),
                    shop,
                    products,
                }
            })
            .collect()
    }
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content).map_err(ConfigError::CatalogFileParse)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

/// Check ids are unique and every reference resolves.
///
/// # Errors
///
/// Returns [`ConfigError::CatalogValidation`] describing the first problem found.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::CatalogValidation(msg));

    let mut user_ids = HashSet::new();
    for user in &catalog.users {
        if user.id.trim().is_empty() {
            return invalid("user id must be non-empty".to_string());
        }
        if !user_ids.insert(user.id.as_str()) {
            return invalid(format!("duplicate user id '{}'", user.id));
        }
    }

    let mut shop_ids = HashSet::new();
    let mut owners = HashSet::new();
    for shop in &catalog.shops {
        if !shop_ids.insert(shop.id.as_str()) {
            return invalid(format!("duplicate shop id '{}'", shop.id));
        }
        if shop.shop_name.trim().is_empty() {
            return invalid(format!("shop '{}' must have a non-empty name", shop.id));
        }
        if !user_ids.contains(shop.owner_id.as_str()) {
            return invalid(format!(
                "shop '{}' references unknown owner '{}'",
                shop.id, shop.owner_id
            ));
        }
        if !owners.insert(shop.owner_id.as_str()) {
            return invalid(format!("owner '{}' has more than one shop", shop.owner_id));
        }
    }

    let mut product_ids = HashSet::new();
    for product in &catalog.products {
        if !product_ids.insert(product.id.as_str()) {
            return invalid(format!("duplicate product id '{}'", product.id));
        }
        if !shop_ids.contains(product.shop_id.as_str()) {
            return invalid(format!(
                "product '{}' references unknown shop '{}'",
                product.id, product.shop_id
            ));
        }
        if product.price < Decimal::ZERO {
            return invalid(format!("product '{}' has a negative price", product.id));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
