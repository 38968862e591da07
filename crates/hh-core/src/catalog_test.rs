use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;

use super::*;
use crate::products::{ProductType, WeatherSuitability};

fn user(id: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role,
        address: None,
        created_at: Utc::now(),
    }
}

fn shop(id: &str, owner: &str) -> Shop {
    Shop {
        id: id.to_string(),
        owner_id: owner.to_string(),
        shop_name: format!("Warung {id}"),
        open_time: "08:00".to_string(),
        close_time: "21:00".to_string(),
        latitude: -6.2,
        longitude: 106.8,
        created_at: Utc::now(),
    }
}

fn product(id: &str, shop_id: &str) -> Product {
    Product {
        id: id.to_string(),
        shop_id: shop_id.to_string(),
        name: format!("Menu {id}"),
        product_type: ProductType::Makanan,
        price: Decimal::new(12_000, 0),
        description: String::new(),
        weather_suitability: WeatherSuitability::Semua,
        created_at: Utc::now(),
        images: vec![],
        delivery_links: Default::default(),
    }
}

fn sample() -> Catalog {
    Catalog {
        users: vec![
            user("root", UserRole::Superadmin),
            user("admin-1", UserRole::Admin),
            user("admin-2", UserRole::Admin),
            user("buyer", UserRole::User),
        ],
        shops: vec![shop("shop-1", "admin-1")],
        products: vec![product("p1", "shop-1"), product("p2", "shop-1")],
    }
}

#[test]
fn validate_accepts_consistent_catalog() {
    assert!(validate_catalog(&sample()).is_ok());
}

#[test]
fn validate_rejects_duplicate_user() {
    let mut catalog = sample();
    catalog.users.push(user("buyer", UserRole::User));
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("duplicate user id 'buyer'"));
}

#[test]
fn validate_rejects_unknown_owner() {
    let mut catalog = sample();
    catalog.shops.push(shop("shop-2", "ghost"));
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("unknown owner 'ghost'"));
}

#[test]
fn validate_rejects_second_shop_for_owner() {
    let mut catalog = sample();
    catalog.shops.push(shop("shop-2", "admin-1"));
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("more than one shop"));
}

#[test]
fn validate_rejects_dangling_product() {
    let mut catalog = sample();
    catalog.products.push(product("p3", "shop-404"));
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("unknown shop 'shop-404'"));
}

#[test]
fn validate_rejects_negative_price() {
    let mut catalog = sample();
    catalog.products[0].price = Decimal::new(-1, 0);
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("negative price"));
}

#[test]
fn admins_with_shops_lists_every_admin() {
    let admins = sample().admins_with_shops();
    assert_eq!(admins.len(), 2);

    assert_eq!(admins[0].user.id, "admin-1");
    assert_eq!(
        admins[0].shop.as_ref().map(|s| s.id.as_str()),
        Some("shop-1")
    );
    assert_eq!(admins[0].products.len(), 2);

    assert_eq!(admins[1].user.id, "admin-2");
    assert!(admins[1].shop.is_none());
    assert!(admins[1].products.is_empty());
}

#[test]
fn products_with_shop_joins_in_order() {
    let joined = sample().products_with_shop();
    assert_eq!(joined.len(), 2);
    assert_eq!(joined[0].product.id, "p1");
    assert_eq!(joined[0].shop.id, "shop-1");

    let json = serde_json::to_value(&joined[0]).unwrap();
    assert_eq!(json["id"], "p1");
    assert_eq!(json["shop"]["shopName"], "Warung shop-1");
}

#[test]
fn load_catalog_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("catalog.yaml");
    assert!(
        path.exists(),
        "catalog.yaml missing at {path:?}; required for this test"
    );
    let result = load_catalog(&path);
    assert!(result.is_ok(), "failed to load catalog.yaml: {result:?}");
    let catalog = result.unwrap();
    assert!(!catalog.products.is_empty());
    assert!(catalog.users.iter().any(User::is_superadmin));
}

#[test]
fn load_catalog_reports_missing_file() {
    let err = load_catalog(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
}
