//! Market statistics over a filtered set of barbershops.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::businesses::Barbershop;

/// User-facing filter panel state. `Default` is the reset state (matches everything).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarbershopFilters {
    pub min_rating: f64,
    pub min_reviews: u32,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Keep shops offering at least one of these. Empty means no service filter.
    pub services: Vec<String>,
}

impl BarbershopFilters {
    #[must_use]
    pub fn matches(&self, shop: &Barbershop) -> bool {
        if shop.rating < self.min_rating || shop.user_ratings_total < self.min_reviews {
            return false;
        }
        if self.min_price.is_some_and(|min| shop.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| shop.price > max) {
            return false;
        }
        self.services.is_empty() || shop.offers_any(&self.services)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[must_use]
pub fn filter_barbershops<'a>(
    shops: &'a [Barbershop],
    filters: &BarbershopFilters,
) -> Vec<&'a Barbershop> {
    shops.iter().filter(|s| filters.matches(s)).collect()
}

/// Every distinct service across `shops`, sorted.
#[must_use]
pub fn available_services(shops: &[Barbershop]) -> Vec<String> {
    shops
        .iter()
        .flat_map(|s| s.services.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

/// Mean rating; 0 for an empty set.
#[must_use]
pub fn average_rating(shops: &[&Barbershop]) -> f64 {
    mean(shops.iter().map(|s| s.rating))
}

/// Mean effective price; 0 for an empty set.
#[must_use]
pub fn average_price(shops: &[&Barbershop]) -> f64 {
    mean(shops.iter().map(|s| s.price))
}

/// Histogram buckets for the price chart. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    UpTo15,
    From16To20,
    From21To25,
    From26To30,
    From31To35,
    From36,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 6] = [
        PriceBucket::UpTo15,
        PriceBucket::From16To20,
        PriceBucket::From21To25,
        PriceBucket::From26To30,
        PriceBucket::From31To35,
        PriceBucket::From36,
    ];

    #[must_use]
    pub fn for_price(price: f64) -> Self {
        if price <= 15.0 {
            Self::UpTo15
        } else if price <= 20.0 {
            Self::From16To20
        } else if price <= 25.0 {
            Self::From21To25
        } else if price <= 30.0 {
            Self::From26To30
        } else if price <= 35.0 {
            Self::From31To35
        } else {
            Self::From36
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UpTo15 => "€0-15",
            Self::From16To20 => "€16-20",
            Self::From21To25 => "€21-25",
            Self::From26To30 => "€26-30",
            Self::From31To35 => "€31-35",
            Self::From36 => "€36+",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Shop counts per [`PriceBucket`], in bucket order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDistribution {
    counts: [usize; 6],
}

impl PriceDistribution {
    #[must_use]
    pub fn from_shops(shops: &[&Barbershop]) -> Self {
        let mut dist = Self::default();
        for shop in shops {
            dist.counts[PriceBucket::for_price(shop.price).index()] += 1;
        }
        dist
    }

    #[must_use]
    pub fn count(&self, bucket: PriceBucket) -> usize {
        self.counts[bucket.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PriceBucket, usize)> + '_ {
        PriceBucket::ALL.into_iter().map(|b| (b, self.count(b)))
    }

    /// Tallest bar for chart scaling; never below 1.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0).max(1)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Everything the sidebar shows about the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub shop_count: usize,
    pub average_rating: f64,
    pub average_price: f64,
    pub price_distribution: Vec<(String, usize)>,
    /// Tallest price bar, for chart scaling; never below 1.
    pub max_price_count: usize,
    pub available_services: Vec<String>,
}

impl MarketSummary {
    /// Summarize `shops` after applying `filters`. Services are listed from the
    /// unfiltered set so the filter panel can offer all of them.
    #[must_use]
    pub fn build(shops: &[Barbershop], filters: &BarbershopFilters) -> Self {
        let selected = filter_barbershops(shops, filters);
        let distribution = PriceDistribution::from_shops(&selected);
        Self {
            shop_count: selected.len(),
            average_rating: average_rating(&selected),
            average_price: average_price(&selected),
            price_distribution: distribution
                .iter()
                .map(|(b, n)| (b.label().to_string(), n))
                .collect(),
            max_price_count: distribution.max_count(),
            available_services: available_services(shops),
        }
    }
}
