//! Live pipeline tests using `#[sqlx::test]` against a fresh, fully-migrated
//! Postgres database per test.

use serde_json::json;
use xpick_core::{ConflictMode, ScoreWeights, TrendObservation};
use xpick_ingest::{ingest_observations, process_rows, rescore, IngestSummary};

fn observation(keyword: &str) -> TrendObservation {
    TrendObservation {
        source_id: "google_trends".to_string(),
        country: "US".to_string(),
        category_key: "tech_electronics".to_string(),
        window_period: "7d".to_string(),
        keyword: keyword.to_string(),
        rank: Some(1),
        raw_score: Some(90.0),
        meta: json!({"from": "test"}),
        collected_at: None,
        search_geo: None,
        social_region: None,
    }
}

async fn fact_count(pool: &sqlx::PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trend_observations")
        .fetch_one(pool)
        .await
        .expect("count")
}

// ---------------------------------------------------------------------------
// Trend ingestion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn replayed_batch_is_idempotent(pool: sqlx::PgPool) {
    let obs = observation("usb hub");

    let first = ingest_observations(&pool, &[obs.clone()], ConflictMode::InsertOrIgnore)
        .await
        .expect("first batch");
    let second = ingest_observations(&pool, &[obs], ConflictMode::InsertOrIgnore)
        .await
        .expect("second batch");

    // Both calls report success — the desired end state is achieved — while
    // the store holds exactly one fact row.
    assert_eq!(first, IngestSummary { ok: 1, failed: 0 });
    assert_eq!(second, IngestSummary { ok: 1, failed: 0 });
    assert_eq!(fact_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn duplicate_keys_within_one_batch_count_ok(pool: sqlx::PgPool) {
    let obs = observation("desk lamp");
    let summary = ingest_observations(
        &pool,
        &[obs.clone(), obs],
        ConflictMode::InsertOrIgnore,
    )
    .await
    .expect("batch");

    assert_eq!(summary, IngestSummary { ok: 2, failed: 0 });
    assert_eq!(fact_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn failing_row_rolls_back_alone(pool: sqlx::PgPool) {
    // Postgres rejects NUL bytes in TEXT values, making the middle row fail
    // with a non-unique-violation store error inside its transaction.
    let poisoned = observation("bad\u{0}keyword");
    let batch = vec![observation("usb hub"), poisoned, observation("desk lamp")];

    let summary = ingest_observations(&pool, &batch, ConflictMode::InsertOrIgnore)
        .await
        .expect("batch");

    assert_eq!(summary, IngestSummary { ok: 2, failed: 1 });
    assert_eq!(fact_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn replace_mode_refreshes_the_fact(pool: sqlx::PgPool) {
    let mut obs = observation("usb hub");
    ingest_observations(&pool, std::slice::from_ref(&obs), ConflictMode::Replace)
        .await
        .expect("first");

    obs.rank = Some(9);
    obs.raw_score = Some(42.0);
    ingest_observations(&pool, &[obs], ConflictMode::Replace)
        .await
        .expect("second");

    assert_eq!(fact_count(&pool).await, 1);
    let rank: i32 = sqlx::query_scalar("SELECT rank FROM trend_observations")
        .fetch_one(&pool)
        .await
        .expect("rank");
    assert_eq!(rank, 9, "replace mode must keep the fresher collection");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn dimensions_are_upserted_with_defaults(pool: sqlx::PgPool) {
    let mut obs = observation("kettle");
    obs.country = "UK".to_string();
    ingest_observations(&pool, &[obs], ConflictMode::InsertOrIgnore)
        .await
        .expect("batch");

    let (search_geo, social_region): (String, String) =
        sqlx::query_as("SELECT search_geo, social_region FROM country_map WHERE country = 'UK'")
            .fetch_one(&pool)
            .await
            .expect("country row");
    assert_eq!(search_geo, "GB");
    assert_eq!(social_region, "GB");

    let display: String =
        sqlx::query_scalar("SELECT display_name FROM trend_sources WHERE source_id = 'google_trends'")
            .fetch_one(&pool)
            .await
            .expect("source row");
    assert_eq!(display, "Google Trends");
}

// ---------------------------------------------------------------------------
// Spreadsheet import and rescore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn import_classifies_rows(pool: sqlx::PgPool) {
    let file = xpick_db::create_import_file(&pool, "export.xlsx")
        .await
        .expect("file");

    let rows = vec![
        json!({
            "ASIN": "B01EXAMPLE",
            "Product Title": "Desk Lamp",
            "价格": "89.99",
            "ASIN Sales": "1200",
            "Review Count": "1000",
            "Review Rating": "4.8",
            "Active Seller Count": "15",
            "Age (Months)": "3",
        }),
        // Same ASIN again: the partial unique index skips it.
        json!({"ASIN": "B01EXAMPLE", "Product Title": "Desk Lamp (dup)"}),
        // No ASIN, no URL: untrackable.
        json!({"Product Title": "Mystery Item"}),
    ];

    let stats = process_rows(&pool, None, file.id, &rows, &ScoreWeights::default())
        .await
        .expect("process");

    assert_eq!(stats.inserted, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.invalid, 1);

    let record = xpick_db::get_import_file(&pool, file.id).await.expect("get");
    assert_eq!(record.status, "done");
    assert_eq!(record.inserted_count, 1);
    assert_eq!(record.skipped_count, 1);
    assert_eq!(record.invalid_count, 1);

    let (platform, independent): (f64, f64) =
        sqlx::query_as("SELECT platform_score, independent_score FROM product_scores")
            .fetch_one(&pool)
            .await
            .expect("scores");
    assert!((platform - 62.3).abs() < 1e-9, "platform = {platform}");
    assert!(
        (independent - 51.64).abs() < 1e-9,
        "independent = {independent}"
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn rescore_fills_missing_scores(pool: sqlx::PgPool) {
    let file = xpick_db::create_import_file(&pool, "export.xlsx")
        .await
        .expect("file");
    let data = json!({"price": "89.99", "asin_sales": "1200"});
    let row = xpick_db::NewProductRow {
        file_id: file.id,
        row_index: 2,
        asin: Some("B01EXAMPLE"),
        url: None,
        title: Some("Desk Lamp"),
        image_url: None,
        brand: None,
        category: None,
        price: Some(89.99),
        asin_sales: Some(1200.0),
        review_count: None,
        review_rating: None,
        data: &data,
    };
    let row_id = xpick_db::insert_product_row(&pool, &row)
        .await
        .expect("insert")
        .expect("id");

    let processed = rescore(&pool, &ScoreWeights::default(), 500)
        .await
        .expect("rescore");
    assert_eq!(processed, 1);

    let stored: Option<(f64, f64)> = sqlx::query_as(
        "SELECT platform_score, independent_score FROM product_scores WHERE row_id = $1",
    )
    .bind(row_id)
    .fetch_optional(&pool)
    .await
    .expect("fetch");
    let (platform, independent) = stored.expect("scored row");
    assert!(platform > 0.0);
    assert!(independent > 0.0);
}
