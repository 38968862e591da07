//! `recommend` command: the home page's food and drink lists in a terminal.

use anyhow::Context;
use hh_core::{
    filter_products, find_province, recommend::active_bucket, AppConfig, Catalog, FilterMode,
    ProductWithShop, Province, RecommendationFilters, Recommendations, WeatherData,
    WeatherSuitability,
};
use hh_weather::WeatherClient;
use rust_decimal::Decimal;

/// Parse `--temperature`, refusing `NaN` and infinities.
///
/// # Errors
///
/// Returns a message for clap when the value is not a finite number.
pub(crate) fn parse_temperature(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("temperature must be a finite number, got '{raw}'"))
    }
}

/// # Errors
///
/// Returns an error if the province is unknown, the catalog cannot be loaded,
/// or the weather client cannot be built.
pub(crate) async fn run_recommend(
    config: &AppConfig,
    province: Option<&str>,
    temperature: Option<f64>,
    all: bool,
) -> anyhow::Result<()> {
    let province_id = province.unwrap_or(&config.default_province);
    let province = find_province(province_id)
        .with_context(|| format!("unknown province '{province_id}'"))?;
    let catalog = hh_core::load_catalog(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;

    let weather = match temperature {
        Some(t) => Some(WeatherData::manual(t)),
        None => lookup_weather(config, province).await?,
    };
    let mode = if all { FilterMode::All } else { FilterMode::Weather };

    let (bucket, recommendations) = recommend(&catalog, weather.as_ref(), mode);
    print_header(province, weather.as_ref(), bucket);
    print_section("Makanan", &recommendations.makanan);
    print_section("Minuman", &recommendations.minuman);
    Ok(())
}

async fn lookup_weather(
    config: &AppConfig,
    province: &Province,
) -> anyhow::Result<Option<WeatherData>> {
    let client =
        WeatherClient::with_base_url(config.weather_timeout_secs, &config.weather_base_url)?;
    match client.current(province).await {
        Ok(weather) => Ok(Some(weather)),
        Err(e) => {
            tracing::warn!(province = province.id, error = %e, "weather lookup failed; showing all products");
            Ok(None)
        }
    }
}

/// Filter the catalog for `weather` and split it into food and drink.
pub(crate) fn recommend(
    catalog: &Catalog,
    weather: Option<&WeatherData>,
    mode: FilterMode,
) -> (Option<WeatherSuitability>, Recommendations<ProductWithShop>) {
    let filters = RecommendationFilters::default();
    let products = catalog.products_with_shop();
    let filtered = filter_products(&products, weather, mode, filters);
    (
        active_bucket(weather, mode, filters),
        Recommendations::partition(filtered),
    )
}

/// Whole rupiah with `.` as the thousands separator, e.g. `Rp 22.000`.
pub(crate) fn format_rupiah(price: Decimal) -> String {
    let whole = price.round_dp(0).abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if price.is_sign_negative() && !grouped.chars().all(|c| c == '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}Rp {grouped}")
}

fn print_header(
    province: &Province,
    weather: Option<&WeatherData>,
    bucket: Option<WeatherSuitability>,
) {
    match weather {
        Some(w) => println!(
            "{}: {:.1}°C, {} ({})",
            province.name, w.temperature, w.condition, w.suitability()
        ),
        None => println!("{}: weather unavailable", province.name),
    }
    match bucket {
        Some(b) => println!("showing products for {b} weather"),
        None => println!("showing all products"),
    }
}

fn print_section(title: &str, products: &[ProductWithShop]) {
    println!();
    println!("{title} ({})", products.len());
    if products.is_empty() {
        println!("  none");
        return;
    }
    println!("  {:<28}{:<24}{:>12}  WEATHER", "NAME", "SHOP", "PRICE");
    for p in products {
        println!(
            "  {:<28}{:<24}{:>12}  {}",
            p.product.name,
            p.shop.shop_name,
            format_rupiah(p.product.price),
            p.product.weather_suitability.to_string()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::str::FromStr;

    use super::*;

    fn catalog() -> Catalog {
        hh_core::load_catalog(Path::new("../../config/catalog.yaml")).unwrap()
    }

    fn ids(products: &[ProductWithShop]) -> Vec<&str> {
        products.iter().map(|p| p.product.id.as_str()).collect()
    }

    #[test]
    fn cold_weather_keeps_dingin_and_semua() {
        let weather = WeatherData::manual(18.0);
        let (bucket, recs) = recommend(&catalog(), Some(&weather), FilterMode::Weather);
        assert_eq!(bucket, Some(WeatherSuitability::Dingin));
        assert_eq!(ids(&recs.makanan), ["prod-2", "prod-5"]);
        assert_eq!(ids(&recs.minuman), ["prod-4"]);
    }

    #[test]
    fn cool_weather_keeps_sejuk_and_semua() {
        let weather = WeatherData::manual(26.0);
        let (bucket, recs) = recommend(&catalog(), Some(&weather), FilterMode::Weather);
        assert_eq!(bucket, Some(WeatherSuitability::Sejuk));
        assert_eq!(ids(&recs.makanan), ["prod-2", "prod-6"]);
        assert_eq!(ids(&recs.minuman), ["prod-7"]);
    }

    #[test]
    fn all_mode_ignores_weather() {
        let weather = WeatherData::manual(35.0);
        let (bucket, recs) = recommend(&catalog(), Some(&weather), FilterMode::All);
        assert_eq!(bucket, None);
        assert_eq!(recs.len(), 7);
    }

    #[test]
    fn missing_weather_shows_everything() {
        let (bucket, recs) = recommend(&catalog(), None, FilterMode::Weather);
        assert_eq!(bucket, None);
        assert_eq!(recs.len(), 7);
    }

    #[test]
    fn temperature_must_be_finite() {
        assert_eq!(parse_temperature("-2.5"), Ok(-2.5));
        assert_eq!(parse_temperature("31"), Ok(31.0));
        for raw in ["NaN", "inf", "-infinity", "1e999", "warm"] {
            assert!(parse_temperature(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn rupiah_groups_thousands() {
        assert_eq!(format_rupiah(Decimal::from(5000)), "Rp 5.000");
        assert_eq!(format_rupiah(Decimal::from(1_250_000)), "Rp 1.250.000");
        assert_eq!(format_rupiah(Decimal::from(950)), "Rp 950");
        assert_eq!(format_rupiah(Decimal::ZERO), "Rp 0");
        assert_eq!(format_rupiah(Decimal::from_str("22000.00").unwrap()), "Rp 22.000");
    }
}
