//! Raw-attribute extraction and the dual-channel score composer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use xpick_core::ScoreWeights;

use crate::{aliases, curves, field};

/// The sixteen raw attributes one scoring call extracts from a row.
///
/// Numeric fields default to `0.0` and the size tier to `""` when absent —
/// no dimension is skipped for missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttributes {
    pub price: f64,
    pub price_trend: f64,
    pub asin_sales: f64,
    pub sales_trend: f64,
    pub parent_income: f64,
    pub asin_income: f64,
    pub review_count: f64,
    pub review_rating: f64,
    pub seller_count: f64,
    pub last_year_sales: f64,
    pub yoy_sales: f64,
    pub size_tier: String,
    pub item_weight: f64,
    pub storage_fee_jan_sep: f64,
    pub storage_fee_oct_dec: f64,
    pub listing_age: f64,
    pub image_count: f64,
    pub variant_count: f64,
}

impl RawAttributes {
    /// Extract every scored attribute from a loosely-typed row.
    #[must_use]
    pub fn from_row(row: &Map<String, Value>) -> Self {
        let num = |keys: &[&str]| field::extract_number(row, keys, 0.0);
        Self {
            price: num(aliases::PRICE),
            price_trend: num(aliases::PRICE_TREND),
            asin_sales: num(aliases::ASIN_SALES),
            sales_trend: num(aliases::SALES_TREND),
            parent_income: num(aliases::PARENT_INCOME),
            asin_income: num(aliases::ASIN_INCOME),
            review_count: num(aliases::REVIEW_COUNT),
            review_rating: num(aliases::REVIEW_RATING),
            seller_count: num(aliases::SELLER_COUNT),
            last_year_sales: num(aliases::LAST_YEAR_SALES),
            yoy_sales: num(aliases::YOY_SALES),
            size_tier: field::extract_string(row, aliases::SIZE_TIER, ""),
            item_weight: num(aliases::ITEM_WEIGHT),
            storage_fee_jan_sep: num(aliases::STORAGE_FEE_JAN_SEP),
            storage_fee_oct_dec: num(aliases::STORAGE_FEE_OCT_DEC),
            listing_age: num(aliases::LISTING_AGE),
            image_count: num(aliases::IMAGE_COUNT),
            variant_count: num(aliases::VARIANT_COUNT),
        }
    }
}

/// The per-dimension sub-scores feeding the two weighted sums.
///
/// `price_platform` and `price_independent` are the two price-curve
/// variants; each channel's sum uses its own. `review_final` already folds
/// volume and rating together and enters each sum once.
#[derive(Debug, Clone, PartialEq)]
pub struct SubScores {
    pub price_platform: f64,
    pub price_independent: f64,
    pub price_trend: f64,
    pub asin_sales: f64,
    pub sales_trend: f64,
    pub parent_income: f64,
    pub asin_income: f64,
    pub review_final: f64,
    pub seller_count: f64,
    pub last_year_sales: f64,
    pub yoy_sales: f64,
    pub size_tier: f64,
    pub item_weight: f64,
    pub storage_fee: f64,
    pub listing_age: f64,
    pub image_count: f64,
    pub variant_count: f64,
}

impl SubScores {
    #[must_use]
    pub fn from_attributes(raw: &RawAttributes) -> Self {
        Self {
            price_platform: curves::price_platform(raw.price),
            price_independent: curves::price_independent(raw.price),
            price_trend: curves::price_trend(raw.price_trend),
            asin_sales: curves::asin_sales(raw.asin_sales),
            sales_trend: curves::sales_trend(raw.sales_trend),
            parent_income: curves::parent_income(raw.parent_income),
            asin_income: curves::asin_income(raw.asin_income),
            review_final: curves::review_final(raw.review_count, raw.review_rating),
            seller_count: curves::seller_count(raw.seller_count),
            last_year_sales: curves::last_year_sales(raw.last_year_sales),
            yoy_sales: curves::yoy_trend(raw.yoy_sales),
            size_tier: curves::size_tier(&raw.size_tier),
            item_weight: curves::item_weight(raw.item_weight),
            storage_fee: curves::storage_fee(raw.storage_fee_jan_sep, raw.storage_fee_oct_dec),
            listing_age: curves::listing_age(raw.listing_age),
            image_count: curves::image_count(raw.image_count),
            variant_count: curves::variant_count(raw.variant_count),
        }
    }
}

/// The two composite recommendation scores, clamped to `[0, 100]` and
/// rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub platform_score: f64,
    pub independent_score: f64,
}

/// Compute both channel composites for a row.
///
/// Total over any input mapping: an empty map scores from the zero/empty
/// defaults without error. Deterministic — no I/O, no hidden state.
#[must_use]
pub fn compute_scores(row: &Map<String, Value>, weights: &ScoreWeights) -> ScoreResult {
    let raw = RawAttributes::from_row(row);
    let sub = SubScores::from_attributes(&raw);

    let platform = sub.price_platform * weights.price.platform
        + sub.price_trend * weights.price_trend.platform
        + sub.asin_sales * weights.asin_sales.platform
        + sub.sales_trend * weights.sales_trend.platform
        + sub.parent_income * weights.parent_income.platform
        + sub.asin_income * weights.asin_income.platform
        + sub.review_final * weights.review.platform
        + sub.seller_count * weights.seller_count.platform
        + sub.last_year_sales * weights.last_year_sales.platform
        + sub.yoy_sales * weights.yoy_sales.platform
        + sub.size_tier * weights.size_tier.platform
        + sub.item_weight * weights.item_weight.platform
        + sub.storage_fee * weights.storage_fee.platform
        + sub.listing_age * weights.listing_age.platform
        + sub.image_count * weights.image_count.platform
        + sub.variant_count * weights.variant_count.platform;

    let independent = sub.price_independent * weights.price.independent
        + sub.price_trend * weights.price_trend.independent
        + sub.asin_sales * weights.asin_sales.independent
        + sub.sales_trend * weights.sales_trend.independent
        + sub.parent_income * weights.parent_income.independent
        + sub.asin_income * weights.asin_income.independent
        + sub.review_final * weights.review.independent
        + sub.seller_count * weights.seller_count.independent
        + sub.last_year_sales * weights.last_year_sales.independent
        + sub.yoy_sales * weights.yoy_sales.independent
        + sub.size_tier * weights.size_tier.independent
        + sub.item_weight * weights.item_weight.independent
        + sub.storage_fee * weights.storage_fee.independent
        + sub.listing_age * weights.listing_age.independent
        + sub.image_count * weights.image_count.independent
        + sub.variant_count * weights.variant_count.independent;

    ScoreResult {
        platform_score: round2(platform.clamp(0.0, 100.0)),
        independent_score: round2(independent.clamp(0.0, 100.0)),
    }
}

/// [`compute_scores`] with the documented default weight table.
#[must_use]
pub fn compute_scores_default(row: &Map<String, Value>) -> ScoreResult {
    compute_scores(row, &ScoreWeights::default())
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
