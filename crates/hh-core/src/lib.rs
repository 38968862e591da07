pub mod app_config;
pub mod catalog;
pub mod config;
pub mod products;
pub mod recommend;
pub mod requests;
pub mod users;
pub mod weather;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, AdminWithShop, Catalog, ProductWithShop};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{DeliveryLinks, Product, ProductType, Shop, WeatherSuitability};
pub use recommend::{filter_products, FilterMode, RecommendationFilters, Recommendations};
pub use requests::{
    AdminRequest, AdminRequestForm, AdminRequestStatus, CoordinateInput, NewAdminRequest,
};
pub use users::{User, UserRole};
pub use weather::{find_province, Province, WeatherData, PROVINCES};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid request status: {0}")]
    InvalidStatus(String),
    #[error("invalid weather suitability: {0}")]
    InvalidSuitability(String),
    #[error("invalid filter mode: {0}")]
    InvalidFilterMode(String),
    #[error("incomplete request: {0}")]
    IncompleteRequest(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),
    #[error("invalid catalog: {0}")]
    CatalogValidation(String),
}
