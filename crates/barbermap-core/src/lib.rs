//! Opportunity-zone scanning and market analytics for the barbershop map.

pub mod analytics;
pub mod app_config;
pub mod businesses;
pub mod config;
pub mod density;
pub mod error;
pub mod geo;
pub mod grid;
pub mod regions;
pub mod zones;

pub use analytics::{
    available_services, average_price, average_rating, filter_barbershops, BarbershopFilters,
    MarketSummary, PriceBucket, PriceDistribution,
};
pub use app_config::{AppConfig, Environment};
pub use businesses::{
    load_barbershops, load_shop_locations, parse_barbershops, Barbershop, ShopLocation,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use density::{density_color, interpolate_color, population_color, MarketStatus, Rgb};
pub use error::{ConfigError, DataError, ScanError};
pub use geo::{haversine_km, GeoPoint, Located, EARTH_RADIUS_KM};
pub use grid::{GridWalk, RegionBounds};
pub use regions::{load_regions, RegionConfig, RegionsFile};
pub use zones::{scan, CandidateZone, OpportunityZone, ScanConfig};
