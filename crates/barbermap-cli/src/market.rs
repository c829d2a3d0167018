//! Market statistics and map styling command handlers.

use std::path::Path;

use barbermap_core::{
    density_color, filter_barbershops, load_barbershops, population_color, AppConfig,
    Barbershop, BarbershopFilters, MarketStatus, MarketSummary,
};
use clap::{Args, ValueEnum};

/// Shop filters shared by `stats` and `shops`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Minimum average rating
    #[arg(long, default_value = "0")]
    pub min_rating: f64,
    /// Minimum number of reviews
    #[arg(long, default_value = "0")]
    pub min_reviews: u32,
    /// Minimum price in euros
    #[arg(long)]
    pub min_price: Option<f64>,
    /// Maximum price in euros
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Keep shops offering any of these services (repeatable)
    #[arg(long = "service")]
    pub services: Vec<String>,
}

impl From<FilterArgs> for BarbershopFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            min_rating: args.min_rating,
            min_reviews: args.min_reviews,
            min_price: args.min_price,
            max_price: args.max_price,
            services: args.services,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorLayer {
    /// Residents per grid cell
    Population,
    /// Men per barbershop
    Density,
}

fn load_shops(config: &AppConfig, override_path: Option<&Path>) -> anyhow::Result<Vec<Barbershop>> {
    let path = override_path.unwrap_or(config.businesses_path.as_path());
    Ok(load_barbershops(path)?)
}

/// Draw a fixed-width text bar scaled against the tallest bucket.
fn bar(count: usize, max: usize, width: usize) -> String {
    let filled = (count * width).div_ceil(max.max(1));
    "#".repeat(filled.min(width))
}

/// One text row per price bucket, bars scaled to the summary's tallest bucket.
fn price_chart(summary: &MarketSummary) -> Vec<String> {
    summary
        .price_distribution
        .iter()
        .map(|(label, count)| {
            format!(
                "{:<10}{:<8}{}",
                label,
                count,
                bar(*count, summary.max_price_count, 30)
            )
        })
        .collect()
}

/// Print a market summary of the filtered shops.
///
/// # Errors
///
/// Returns an error if the shop data cannot be loaded or serialized.
pub(crate) fn run_stats(
    config: &AppConfig,
    filters: &BarbershopFilters,
    businesses: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let shops = load_shops(config, businesses)?;
    let summary = MarketSummary::build(&shops, filters);
    tracing::info!(
        total = shops.len(),
        selected = summary.shop_count,
        "market summary computed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("shops:          {} of {}", summary.shop_count, shops.len());
    println!("average rating: {:.2}", summary.average_rating);
    println!("average price:  €{:.2}", summary.average_price);
    println!();

    println!("{:<10}{:<8}", "PRICE", "SHOPS");
    for row in price_chart(&summary) {
        println!("{row}");
    }

    if !summary.available_services.is_empty() {
        println!();
        println!("services: {}", summary.available_services.join(", "));
    }
    Ok(())
}

/// List the filtered shops, best rated first.
///
/// # Errors
///
/// Returns an error if the shop data cannot be loaded.
pub(crate) fn run_shops(
    config: &AppConfig,
    filters: &BarbershopFilters,
    businesses: Option<&Path>,
    limit: usize,
) -> anyhow::Result<()> {
    let shops = load_shops(config, businesses)?;
    let mut selected = filter_barbershops(&shops, filters);
    if selected.is_empty() {
        println!("no shops match the current filters");
        return Ok(());
    }
    selected.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then(b.user_ratings_total.cmp(&a.user_ratings_total))
    });

    println!(
        "{:<32}{:<8}{:<9}{:<8}SERVICES",
        "NAME", "RATING", "REVIEWS", "PRICE"
    );
    for shop in selected.iter().take(limit) {
        println!(
            "{:<32}{:<8.1}{:<9}{:<8}{}",
            shop.name,
            shop.rating,
            shop.user_ratings_total,
            shop.price,
            shop.services.join(", ")
        );
        if let Some(url) = config
            .places_api_key
            .as_deref()
            .and_then(|key| shop.photo_url(key))
        {
            println!("    photo: {url}");
        }
    }
    Ok(())
}

/// Print the ramp color (and, for density, the market status) for a value.
pub(crate) fn run_color(layer: ColorLayer, value: f64) {
    match layer {
        ColorLayer::Population => {
            let color = population_color(value);
            println!("{color} {}", color.to_hex());
        }
        ColorLayer::Density => {
            let color = density_color(value);
            let status = MarketStatus::classify(value);
            println!("{color} {}", color.to_hex());
            println!("{} {status}", status.emoji());
        }
    }
}
