use axum::http::StatusCode;
use climate_server::{app, build_app_state};
use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tempfile::TempDir;

use crate::helpers::TestApp;

/// Temperatures around the 2012 leap day plus the last days of the dataset
const MEASUREMENTS: [(&str, &str, Option<f64>, f64); 8] = [
    ("USC00519397", "2012-02-27", Some(0.0), 65.0),
    ("USC00519397", "2012-02-28", Some(0.0), 67.0),
    ("USC00513117", "2012-02-29", Some(0.14), 61.0),
    ("USC00519397", "2012-03-01", None, 70.0),
    ("USC00513117", "2012-03-05", Some(0.02), 74.0),
    ("USC00519397", "2012-03-06", Some(0.0), 77.0),
    ("USC00519397", "2016-08-22", Some(0.4), 80.0),
    ("USC00519397", "2017-08-23", Some(0.0), 81.0),
];

async fn write_dataset(path: &Path) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        )
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY, station TEXT, name TEXT,
            latitude FLOAT, longitude FLOAT, elevation FLOAT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (station, date, prcp, tobs) in MEASUREMENTS {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query(
        "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES
            ('USC00519397', 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0),
            ('USC00513117', 'KANEOHE 838.1, HI US', 21.4234, -157.8015, 14.6)",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool.close().await;
}

async fn dataset_app() -> (TempDir, TestApp) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    write_dataset(&path).await;

    let app_state = build_app_state(
        String::from("http://127.0.0.1:5000"),
        path.to_str().unwrap().to_owned(),
        2,
    )
    .await
    .unwrap();

    (dir, TestApp { app: app(app_state) })
}

#[tokio::test]
async fn summary_over_leap_week() {
    let (_dir, test_app) = dataset_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/2012-02-28/2012-03-05").await;

    // 67, 61, 70, 74
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"TMIN": 61.0, "TAVG": 68.0, "TMAX": 74.0}]));
}

#[tokio::test]
async fn summary_from_start_to_latest() {
    let (_dir, test_app) = dataset_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/2016-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"TMIN": 80.0, "TAVG": 80.5, "TMAX": 81.0}]));
}

#[tokio::test]
async fn tobs_excludes_cutoff_day() {
    let (_dir, test_app) = dataset_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    // 2016-08-22 is exactly 366 days before the latest date
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2017-08-23", "tobs": 81.0}]));
}

#[tokio::test]
async fn stations_in_table_order() {
    let (_dir, test_app) = dataset_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["station"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["USC00519397", "USC00513117"]);
    assert_eq!(body[1]["id"], json!(2));
}

#[tokio::test]
async fn precipitation_keeps_unrecorded_days_null() {
    let (_dir, test_app) = dataset_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), MEASUREMENTS.len());
    assert_eq!(rows[3], json!({"date": "2012-03-01", "prcp": null}));
}

#[tokio::test]
async fn missing_dataset_fails_startup() {
    let result = build_app_state(
        String::from("http://127.0.0.1:5000"),
        String::from("/nonexistent/hawaii.sqlite"),
        1,
    )
    .await;

    let err = result.err().expect("startup should fail without a dataset");
    assert_eq!(err.to_string(), "no dataset at /nonexistent/hawaii.sqlite");
}
