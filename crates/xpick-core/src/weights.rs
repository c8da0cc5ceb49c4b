use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Per-channel weight pair for one scored dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelWeight {
    pub platform: f64,
    pub independent: f64,
}

impl ChannelWeight {
    #[must_use]
    pub const fn new(platform: f64, independent: f64) -> Self {
        Self {
            platform,
            independent,
        }
    }
}

/// The sixteen dimension names, in scoring order.
///
/// These are the canonical keys used by the `score_weights` table, the
/// weights YAML file, and [`ScoreWeights::rows`].
pub const DIMENSIONS: [&str; 16] = [
    "price",
    "price_trend",
    "asin_sales",
    "sales_trend",
    "parent_income",
    "asin_income",
    "review",
    "seller_count",
    "last_year_sales",
    "yoy_sales",
    "size_tier",
    "item_weight",
    "storage_fee",
    "listing_age",
    "image_count",
    "variant_count",
];

/// The two weight vectors driving the dual composite scores.
///
/// Weights are used exactly as supplied: nothing enforces that a channel
/// sums to 1.0 — composites are a weighted sum clamped to `[0, 100]`, not a
/// weighted average. The `review` entry weighs the single combined
/// count-times-rating sub-score for both channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub price: ChannelWeight,
    pub price_trend: ChannelWeight,
    pub asin_sales: ChannelWeight,
    pub sales_trend: ChannelWeight,
    pub parent_income: ChannelWeight,
    pub asin_income: ChannelWeight,
    pub review: ChannelWeight,
    pub seller_count: ChannelWeight,
    pub last_year_sales: ChannelWeight,
    pub yoy_sales: ChannelWeight,
    pub size_tier: ChannelWeight,
    pub item_weight: ChannelWeight,
    pub storage_fee: ChannelWeight,
    pub listing_age: ChannelWeight,
    pub image_count: ChannelWeight,
    pub variant_count: ChannelWeight,
}

impl Default for ScoreWeights {
    /// The documented default table. Each channel sums to 1.0; the platform
    /// vector leans on sales, revenue and competition, the independent
    /// vector on price level, trend momentum and logistics.
    fn default() -> Self {
        Self {
            price: ChannelWeight::new(0.10, 0.14),
            price_trend: ChannelWeight::new(0.04, 0.05),
            asin_sales: ChannelWeight::new(0.12, 0.08),
            sales_trend: ChannelWeight::new(0.06, 0.08),
            parent_income: ChannelWeight::new(0.06, 0.05),
            asin_income: ChannelWeight::new(0.08, 0.06),
            review: ChannelWeight::new(0.16, 0.12),
            seller_count: ChannelWeight::new(0.08, 0.05),
            last_year_sales: ChannelWeight::new(0.06, 0.05),
            yoy_sales: ChannelWeight::new(0.06, 0.08),
            size_tier: ChannelWeight::new(0.04, 0.05),
            item_weight: ChannelWeight::new(0.04, 0.05),
            storage_fee: ChannelWeight::new(0.03, 0.04),
            listing_age: ChannelWeight::new(0.03, 0.04),
            image_count: ChannelWeight::new(0.02, 0.03),
            variant_count: ChannelWeight::new(0.02, 0.03),
        }
    }
}

impl ScoreWeights {
    /// All sixteen `(dimension, weight)` pairs in [`DIMENSIONS`] order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, ChannelWeight); 16] {
        [
            ("price", self.price),
            ("price_trend", self.price_trend),
            ("asin_sales", self.asin_sales),
            ("sales_trend", self.sales_trend),
            ("parent_income", self.parent_income),
            ("asin_income", self.asin_income),
            ("review", self.review),
            ("seller_count", self.seller_count),
            ("last_year_sales", self.last_year_sales),
            ("yoy_sales", self.yoy_sales),
            ("size_tier", self.size_tier),
            ("item_weight", self.item_weight),
            ("storage_fee", self.storage_fee),
            ("listing_age", self.listing_age),
            ("image_count", self.image_count),
            ("variant_count", self.variant_count),
        ]
    }

    /// Overwrite one dimension by name. Returns `false` for unknown names.
    pub fn set(&mut self, dimension: &str, weight: ChannelWeight) -> bool {
        let slot = match dimension {
            "price" => &mut self.price,
            "price_trend" => &mut self.price_trend,
            "asin_sales" => &mut self.asin_sales,
            "sales_trend" => &mut self.sales_trend,
            "parent_income" => &mut self.parent_income,
            "asin_income" => &mut self.asin_income,
            "review" => &mut self.review,
            "seller_count" => &mut self.seller_count,
            "last_year_sales" => &mut self.last_year_sales,
            "yoy_sales" => &mut self.yoy_sales,
            "size_tier" => &mut self.size_tier,
            "item_weight" => &mut self.item_weight,
            "storage_fee" => &mut self.storage_fee,
            "listing_age" => &mut self.listing_age,
            "image_count" => &mut self.image_count,
            "variant_count" => &mut self.variant_count,
            _ => return false,
        };
        *slot = weight;
        true
    }
}

/// On-disk shape of `config/weights.yaml`: a partial per-dimension override
/// map merged onto the defaults.
#[derive(Debug, Deserialize)]
pub struct WeightsFile {
    pub dimensions: BTreeMap<String, ChannelWeight>,
}

/// Load score-weight overrides from a YAML file and merge them onto the
/// default table.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, names an
/// unknown dimension, or carries a negative weight.
pub fn load_weights_file(path: &Path) -> Result<ScoreWeights, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WeightsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: WeightsFile = serde_yaml::from_str(&content)?;
    merge_weights(file)
}

fn merge_weights(file: WeightsFile) -> Result<ScoreWeights, ConfigError> {
    let mut weights = ScoreWeights::default();
    for (name, weight) in file.dimensions {
        if weight.platform < 0.0 || weight.independent < 0.0 {
            return Err(ConfigError::Validation(format!(
                "dimension '{name}' has a negative weight"
            )));
        }
        if !weights.set(&name, weight) {
            return Err(ConfigError::Validation(format!(
                "unknown score dimension: '{name}'"
            )));
        }
    }
    Ok(weights)
}
