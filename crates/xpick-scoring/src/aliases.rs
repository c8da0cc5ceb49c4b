//! Candidate-key tables for every semantic field the engine reads.
//!
//! One ordered list per field: canonical snake_case name first (stored
//! JSONB payloads use it), then the English spreadsheet headers, then the
//! localized ones observed in real exports. Order is precedence — the first
//! present, non-empty key wins.

pub const ASIN: &[&str] = &["asin", "ASIN", "Asin"];

pub const URL: &[&str] = &[
    "url",
    "URL",
    "Url",
    "Product URL",
    "Product Url",
    "Link",
    "产品链接",
    "产品 URL",
    "产品URL",
    "链接",
];

pub const TITLE: &[&str] = &[
    "title",
    "Product Title",
    "Title",
    "Product Name",
    "产品标题",
    "产品名称",
    "标题",
];

pub const IMAGE_URL: &[&str] = &[
    "image_url",
    "image",
    "Image URL",
    "ImageURL",
    "Image Link",
    "图片 URL",
    "图片URL",
    "图片链接",
];

pub const BRAND: &[&str] = &["brand", "Brand", "Brand Name", "品牌", "品牌名称"];

pub const CATEGORY: &[&str] = &[
    "category",
    "Category",
    "Category Name",
    "类目",
    "分类",
    "类别",
];

pub const PRICE: &[&str] = &["price", "Price", "价格", "售价"];

pub const PRICE_TREND: &[&str] = &[
    "price_trend_90d",
    "Price Trend (90d) (%)",
    "Price Trend 90d (%)",
    "价格趋势（90 天） (%)",
    "价格趋势（90天） (%)",
];

pub const ASIN_SALES: &[&str] = &[
    "asin_sales",
    "ASIN Sales",
    "Asin Sales",
    "sales",
    "ASIN 销量",
    "销量",
];

pub const SALES_TREND: &[&str] = &[
    "sales_trend_90d",
    "sales_trend",
    "Sales Trend (90d) (%)",
    "Sales Trend 90d (%)",
    "销量趋势（90 天） (%)",
    "销量趋势（90天） (%)",
];

pub const PARENT_INCOME: &[&str] = &[
    "parent_revenue",
    "Parent Revenue",
    "ParentRevenue",
    "父级收入",
    "父商品收入",
];

pub const ASIN_INCOME: &[&str] = &[
    "asin_revenue",
    "ASIN Revenue",
    "Asin Revenue",
    "ASIN 收入",
    "ASIN收入",
];

pub const REVIEW_COUNT: &[&str] = &[
    "review_count",
    "Review Count",
    "Reviews",
    "评论数量",
    "评价数量",
];

pub const REVIEW_RATING: &[&str] = &[
    "review_rating",
    "Review Rating",
    "Review Score",
    "Rating",
    "rating",
    "评论评分",
    "评分",
];

pub const SELLER_COUNT: &[&str] = &[
    "active_seller_count",
    "Active Seller Count",
    "Active Sellers",
    "跃卖家数量",
    "活跃卖家数",
];

pub const LAST_YEAR_SALES: &[&str] = &[
    "last_year_sales",
    "Last Year Sales",
    "Sales Last Year",
    "去年销量",
    "去年销售量",
];

pub const YOY_SALES: &[&str] = &[
    "yoy_sales_percent",
    "YoY Sales (%)",
    "Sales YoY (%)",
    "销量年同比 (%)",
    "销量年同比(%)",
];

pub const SIZE_TIER: &[&str] = &[
    "size_tier",
    "Size Tier",
    "Size tier",
    "Size",
    "尺寸分级",
    "尺寸等级",
];

pub const ITEM_WEIGHT: &[&str] = &["weight", "Weight", "重量"];

pub const STORAGE_FEE_JAN_SEP: &[&str] = &[
    "storage_fee_jan_sep",
    "Storage Fee (Jan-Sep)",
    "Storage Fee Jan-Sep",
    "仓储费用 (1 月 - 9 月)",
    "仓储费用 (1月-9月)",
];

pub const STORAGE_FEE_OCT_DEC: &[&str] = &[
    "storage_fee_oct_dec",
    "Storage Fee (Oct-Dec)",
    "Storage Fee Oct-Dec",
    "仓储费用 (10 月 - 12 月)",
    "仓储费用 (10月-12月)",
];

pub const LISTING_AGE: &[&str] = &[
    "age_months",
    "Age (Months)",
    "Age Months",
    "Age",
    "年龄（月）",
    "年龄(月)",
];

pub const IMAGE_COUNT: &[&str] = &[
    "image_count",
    "Image Count",
    "Image Qty",
    "图片的数量",
    "图片数量",
];

pub const VARIANT_COUNT: &[&str] = &[
    "variant_count",
    "Variant Count",
    "Variant Qty",
    "变体数量",
    "变体数",
];
