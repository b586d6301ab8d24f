//! HTTP-level tests for grilse probability upload and export.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, build_test_app, get, post_text, GATE_ID};
use salmon_core::grilse::MemoryProbabilityStore;

const TABLE: &str = "Weight,June,July\n4,0.25,0\n3,0.5,0.75\n";

fn upload_uri(season: i32, gate: i64) -> String {
    format!("/api/v1/reporting/grilse-probabilities/{season}/{gate}")
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_stores_non_zero_cells() {
    let store = MemoryProbabilityStore::new();
    let app = build_test_app(store.clone());

    let response = post_text(app, &upload_uri(2018, GATE_ID), TABLE).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["season"], 2018);
    assert_eq!(json["data"]["gate_id"], GATE_ID);
    assert_eq!(json["data"]["records"], 3);
    assert_eq!(json["data"]["replaced"], 0);

    let stored = store.snapshot();
    let keys: Vec<_> = stored
        .iter()
        .map(|s| (s.record.mass_lbs, s.record.month))
        .collect();
    assert_eq!(keys, [(3, 6), (3, 7), (4, 6)]);
}

#[tokio::test]
async fn upload_for_unknown_gate_returns_404() {
    let app = build_test_app(MemoryProbabilityStore::new());
    let response = post_text(app, &upload_uri(2018, 999), TABLE).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn header_violations_are_all_reported() {
    let app = build_test_app(MemoryProbabilityStore::new());
    let response = post_text(app, &upload_uri(2018, GATE_ID), "Colour,Colour\n1,2\n").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TABLE");
    let codes: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(
        codes,
        [
            "COLUMN_DISALLOWED",
            "COLUMN_DISALLOWED",
            "DUPLICATE_HEADERS",
            "MISSING_WEIGHT_HEADER",
            "MISSING_MONTH_HEADER",
        ]
    );
}

#[tokio::test]
async fn row_violations_carry_locations() {
    let store = MemoryProbabilityStore::new();
    let app = build_test_app(store.clone());
    let response = post_text(
        app,
        &upload_uri(2018, GATE_ID),
        "Weight,June\n5,0.1\n5,0.2\n7,1.5\n",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["errors"],
        serde_json::json!([
            { "code": "DUPLICATE_WEIGHT", "row": 2, "column": 1 },
            { "code": "INVALID_PROBABILITY", "row": 3, "column": 2 },
        ])
    );
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn second_upload_without_overwrite_conflicts() {
    let store = MemoryProbabilityStore::new();
    let first = post_text(build_test_app(store.clone()), &upload_uri(2018, GATE_ID), TABLE).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_text(
        build_test_app(store.clone()),
        &upload_uri(2018, GATE_ID),
        "Weight,August\n9,0.1\n",
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");

    assert_eq!(store.snapshot().len(), 3);
}

#[tokio::test]
async fn overwrite_replaces_the_whole_dataset() {
    let store = MemoryProbabilityStore::new();
    post_text(build_test_app(store.clone()), &upload_uri(2018, GATE_ID), TABLE).await;

    let uri = format!("{}?overwrite=true", upload_uri(2018, GATE_ID));
    let response = post_text(build_test_app(store.clone()), &uri, "Weight,June\n3,0.4\n").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["records"], 1);
    assert_eq!(json["data"]["replaced"], 3);

    let stored = store.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record.month, 6);
    assert_eq!(stored[0].record.mass_lbs, 3);
}

#[tokio::test]
async fn other_gates_and_seasons_are_untouched_by_overwrite() {
    let store = MemoryProbabilityStore::new();
    post_text(build_test_app(store.clone()), &upload_uri(2018, GATE_ID), TABLE).await;
    post_text(build_test_app(store.clone()), &upload_uri(2018, 2), TABLE).await;
    post_text(build_test_app(store.clone()), &upload_uri(2019, GATE_ID), TABLE).await;

    let uri = format!("{}?overwrite=true", upload_uri(2018, GATE_ID));
    post_text(build_test_app(store.clone()), &uri, "Weight,June\n3,0.4\n").await;

    assert_eq!(store.snapshot().len(), 7);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = build_test_app(MemoryProbabilityStore::new());
    let mut table = String::from("Weight,June\n");
    for weight in 0..10_000 {
        table.push_str(&format!("{weight},0.5\n"));
    }
    let response = post_text(app, &upload_uri(2018, GATE_ID), table).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_all_returns_csv_in_stable_order() {
    let store = MemoryProbabilityStore::new();
    post_text(build_test_app(store.clone()), &upload_uri(2019, GATE_ID), TABLE).await;
    post_text(build_test_app(store.clone()), &upload_uri(2018, 2), "Weight,May\n12,0.125\n").await;

    let response = get(
        build_test_app(store),
        "/api/v1/reporting/grilse-probabilities/all",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");

    let text = body_text(response).await;
    assert_eq!(
        text,
        "Season,Month,Weight,Probability\n\
         2018,5,12,0.125\n\
         2019,6,3,0.5\n\
         2019,7,3,0.75\n\
         2019,6,4,0.25\n"
    );
}

#[tokio::test]
async fn export_filters_by_season_range() {
    let store = MemoryProbabilityStore::new();
    for season in [2016, 2017, 2018] {
        post_text(
            build_test_app(store.clone()),
            &upload_uri(season, GATE_ID),
            "Weight,May\n1,0.5\n",
        )
        .await;
    }

    let response = get(
        build_test_app(store),
        "/api/v1/reporting/grilse-probabilities/2018-2017",
    )
    .await;
    let text = body_text(response).await;
    let seasons: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(seasons, ["2017", "2018"]);
}

#[tokio::test]
async fn export_with_bad_range_returns_400() {
    let app = build_test_app(MemoryProbabilityStore::new());
    let response = get(app, "/api/v1/reporting/grilse-probabilities/last-year").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn export_of_empty_store_is_header_only() {
    let app = build_test_app(MemoryProbabilityStore::new());
    let response = get(app, "/api/v1/reporting/grilse-probabilities/2000").await;
    assert_eq!(body_text(response).await, "Season,Month,Weight,Probability\n");
}
