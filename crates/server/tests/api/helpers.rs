use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate_server::{
    app, app_state_with_store,
    db::{Error, PrecipitationRow, StationRow, TemperatureRow, TemperatureStatsRow},
    ClimateData,
};
use hyper::{header, Method};
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub ClimateAccess {}
    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn precipitation(&self) -> Result<Vec<PrecipitationRow>, Error>;
        async fn stations(&self) -> Result<Vec<StationRow>, Error>;
        async fn temperature_observations(
            &self,
            from: &str,
            to: &str,
        ) -> Result<Vec<TemperatureRow>, Error>;
        async fn latest_date(&self) -> Result<Option<String>, Error>;
        async fn temperature_stats(
            &self,
            from: &str,
            to: &str,
        ) -> Result<Option<TemperatureStatsRow>, Error>;
        async fn health_check(&self) -> Result<(), Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(store: Arc<dyn ClimateData>) -> TestApp {
    let app_state = app_state_with_store(String::from("http://127.0.0.1:5000"), store);
    TestApp { app: app(app_state) }
}

impl TestApp {
    /// Sends a GET and returns the status with the body parsed as JSON
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("{uri} did not return json ({e}): {body}"));
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

/// Error returned by a store whose dataset went away
pub fn store_failure() -> Error {
    Error::Query(sqlx::Error::PoolClosed)
}
