//! Backend-owned entity records
//!
//! Every record here is created through the API and owned by the backend;
//! the client only holds transient copies. Trends and quality reports are
//! immutable analysis snapshots and are never updated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    Crops,
    Livestock,
    Dairy,
    Poultry,
    Seeds,
    Equipment,
    Other,
}

/// Listing lifecycle status. Only `active` listings are shown in the
/// marketplace; everything else is treated uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    #[serde(other)]
    Inactive,
}

/// A product offered for sale by a farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: String,
    pub title: String,
    pub category: ListingCategory,
    pub price: f64,
    /// Pricing unit, e.g. "kg" or "crate"
    pub unit: String,
    #[serde(default)]
    pub quantity_available: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    pub seller_name: String,
    #[serde(default)]
    pub seller_phone: Option<String>,
    #[serde(default)]
    pub seller_email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: ListingStatus,
    pub created_date: DateTime<Utc>,
}

/// Create payload for a [`MarketListing`]
#[derive(Debug, Clone, Serialize)]
pub struct NewMarketListing {
    pub title: String,
    pub category: ListingCategory,
    pub price: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    pub seller_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: ListingStatus,
}

/// Demand or supply intensity reported by a market analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

/// Direction prices are moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Falling,
    Stable,
    Rising,
}

/// An immutable market-analysis snapshot for one produce type and location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub id: String,
    pub produce_type: String,
    pub location: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    pub quality_grade: String,
    pub suggested_price_min: f64,
    pub suggested_price_optimal: f64,
    pub suggested_price_max: f64,
    pub demand_level: MarketLevel,
    pub supply_level: MarketLevel,
    pub price_trend: PriceTrend,
    pub market_analysis: String,
    pub weather_impact: String,
    pub recommendations: Vec<String>,
    /// Analysis confidence, 0-100
    pub confidence_score: f64,
    pub created_date: DateTime<Utc>,
}

/// Create payload for a [`MarketTrend`]
#[derive(Debug, Clone, Serialize)]
pub struct NewMarketTrend {
    pub produce_type: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub quality_grade: String,
    pub suggested_price_min: f64,
    pub suggested_price_optimal: f64,
    pub suggested_price_max: f64,
    pub demand_level: MarketLevel,
    pub supply_level: MarketLevel,
    pub price_trend: PriceTrend,
    pub market_analysis: String,
    pub weather_impact: String,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
}

/// Grade assigned by the image-based quality check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Premium,
    GradeA,
    GradeB,
    GradeC,
    Reject,
}

/// Whether the assessed produce can go to market as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketReadiness {
    Ready,
    NeedsImprovement,
    NotReady,
}

/// An immutable quality-check result for one uploaded product image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub id: String,
    pub product_type: String,
    pub product_name: String,
    pub image_url: String,
    pub quality_grade: QualityGrade,
    /// Quality score, 0-100
    pub quality_score: f64,
    pub visual_assessment: Vec<String>,
    pub defects_detected: Vec<String>,
    pub market_readiness: MarketReadiness,
    pub recommendations: String,
    pub estimated_price_range: String,
    pub shelf_life: String,
    pub created_date: DateTime<Utc>,
}

/// Create payload for a [`QualityReport`]
#[derive(Debug, Clone, Serialize)]
pub struct NewQualityReport {
    pub product_type: String,
    pub product_name: String,
    pub image_url: String,
    pub quality_grade: QualityGrade,
    pub quality_score: f64,
    pub visual_assessment: Vec<String>,
    pub defects_detected: Vec<String>,
    pub market_readiness: MarketReadiness,
    pub recommendations: String,
    pub estimated_price_range: String,
    pub shelf_life: String,
}
