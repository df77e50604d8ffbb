//! Radius search over a [`Catalog`].
//!
//! Every query scans the tile list once and keeps catalog order. Two
//! selection policies exist:
//! - [`SearchPolicy::CornerContainment`]: all four horizontal corners of the
//!   tile must be strictly inside the radius. The corner check runs at the
//!   query altitude, so the tile's vertical extent does not participate.
//! - [`SearchPolicy::CentroidDistance`]: the 3D distance to the box centroid,
//!   altitude included, must be strictly inside the radius.

use foundation::math::combined_distance;
use serde::Serialize;

use crate::{Catalog, ModelTile};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchPolicy {
    CornerContainment,
    CentroidDistance,
}

/// Query point in degrees/meters and search radius in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub url: String,
    pub lowerpos: [f64; 3],
    pub upperpos: [f64; 3],
}

/// Builds `<base>/public/model/<tier>/<filename>` asset URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileUrlBuilder {
    base_url: String,
    tier: String,
}

impl TileUrlBuilder {
    pub fn new(base_url: impl Into<String>, tier: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            tier: tier.into(),
        }
    }

    pub fn tier(&self) -> &str {
        &self.tier
    }

    pub fn url(&self, filename: &str) -> String {
        format!("{}/public/model/{}/{}", self.base_url, self.tier, filename)
    }
}

/// A selection policy paired with the asset tier its matches link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    policy: SearchPolicy,
    urls: TileUrlBuilder,
}

impl SearchEngine {
    pub fn new(policy: SearchPolicy, urls: TileUrlBuilder) -> Self {
        Self { policy, urls }
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    pub fn urls(&self) -> &TileUrlBuilder {
        &self.urls
    }

    pub fn search(&self, catalog: &Catalog, query: &SearchQuery) -> Vec<MatchResult> {
        catalog
            .tiles
            .iter()
            .filter(|tile| self.matches(tile, query))
            .map(|tile| MatchResult {
                url: self.urls.url(&tile.filename),
                lowerpos: tile.bounds.min,
                upperpos: tile.bounds.max,
            })
            .collect()
    }

    pub fn matches(&self, tile: &ModelTile, query: &SearchQuery) -> bool {
        match self.policy {
            SearchPolicy::CornerContainment => {
                tile.bounds.horizontal_corners().iter().all(|&[lat, lon]| {
                    distance_from_query(query, lat, lon, query.altitude) < query.radius
                })
            }
            SearchPolicy::CentroidDistance => {
                let [lat, lon, alt] = tile.bounds.centroid();
                distance_from_query(query, lat, lon, alt) < query.radius
            }
        }
    }
}

fn distance_from_query(query: &SearchQuery, lat: f64, lon: f64, alt: f64) -> f64 {
    combined_distance(
        lat,
        lon,
        alt,
        query.latitude,
        query.longitude,
        query.altitude,
    )
}
