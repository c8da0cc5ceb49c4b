//! Offline unit tests for xpick-db pool configuration and row types.
//! These tests do not require a live database connection.

use xpick_core::{AppConfig, Environment};
use xpick_db::{ImportFileRow, PoolConfig, ProductRow, TrendObservationRow};

use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        weights_path: PathBuf::from("./config/weights.yaml"),
        image_dir: PathBuf::from("./data/images"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        image_request_timeout_secs: 12,
        image_user_agent: "ua".to_string(),
        image_max_concurrent: 5,
        image_max_retries: 3,
        image_retry_backoff_ms: 500,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ImportFileRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn import_file_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = ImportFileRow {
        id: Uuid::new_v4(),
        filename: "blackbox-export.xlsx".to_string(),
        status: "queued".to_string(),
        inserted_count: 0,
        skipped_count: 0,
        invalid_count: 0,
        error_message: None,
        processed_at: None,
        created_at: Utc::now(),
    };

    assert_eq!(row.status, "queued");
    assert_eq!(row.inserted_count, 0);
    assert!(row.processed_at.is_none());
    assert!(row.error_message.is_none());
}

/// Compile-time smoke test: confirm that [`ProductRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn product_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = ProductRow {
        id: 42_i64,
        file_id: Uuid::new_v4(),
        row_index: 2,
        asin: Some("B01EXAMPLE".to_string()),
        url: None,
        title: Some("Desk Lamp".to_string()),
        image_url: None,
        brand: None,
        category: None,
        price: Some(89.99),
        asin_sales: Some(1200.0),
        review_count: Some(1000.0),
        review_rating: Some(4.8),
        data: serde_json::json!({"price": "89.99"}),
        imported_at: Utc::now(),
    };

    assert_eq!(row.id, 42);
    assert_eq!(row.asin.as_deref(), Some("B01EXAMPLE"));
    assert_eq!(row.price, Some(89.99));
    assert!(row.data.is_object());
}

/// Compile-time smoke test: confirm that [`TrendObservationRow`] carries the
/// full logical key plus the fact payload. No database required.
#[test]
fn trend_observation_row_has_expected_fields() {
    use chrono::Utc;

    let row = TrendObservationRow {
        id: 7_i64,
        source_id: "google_trends".to_string(),
        country: "US".to_string(),
        category_key: "tech_electronics".to_string(),
        window_period: "7d".to_string(),
        keyword: "usb hub".to_string(),
        rank: Some(3),
        raw_score: Some(87.5),
        meta: serde_json::json!({}),
        collected_at: Utc::now(),
    };

    assert_eq!(row.source_id, "google_trends");
    assert_eq!(row.window_period, "7d");
    assert_eq!(row.rank, Some(3));
}
