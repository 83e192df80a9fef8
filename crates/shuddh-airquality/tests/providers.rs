//! Integration tests for the air-quality clients using wiremock HTTP mocks.

use chrono::NaiveDate;
use shuddh_airquality::{AirQualityError, AirQualityService, OwmForecastClient, WaqiClient};
use shuddh_core::{Coordinates, Entropy};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNREACHABLE: &str = "http://127.0.0.1:1";

fn chennai() -> Coordinates {
    Coordinates::new(13.08, 80.27)
}

fn waqi(base_url: &str) -> WaqiClient {
    WaqiClient::with_base_url(Some("test-token".into()), 5, base_url)
        .expect("client construction should not fail")
}

fn owm(base_url: &str) -> OwmForecastClient {
    OwmForecastClient::with_base_url(Some("test-appid".into()), 5, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn waqi_feed_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed/geo:13.08;80.27/"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "data": {
                "aqi": 154,
                "iaqi": { "pm25": { "v": 154 }, "no2": { "v": 21.4 }, "w": { "v": 3.1 } }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reading = waqi(&server.uri())
        .fetch_current(chennai())
        .await
        .expect("should fetch")
        .expect("should have a reading");

    assert_eq!(reading.aqi, 154);
    assert_eq!(reading.pollutants.len(), 2);
    assert_eq!(reading.pollutants[0].name, "PM2.5");
    assert_eq!(reading.pollutants[1].name, "NO₂");
}

#[tokio::test]
async fn waqi_server_error_degrades_to_mock() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = waqi(&server.uri());
    let err = client.fetch_current(chennai()).await.unwrap_err();
    assert!(matches!(err, AirQualityError::Status { status: 503, .. }));

    let reading = client
        .current_or_mock(chennai(), &mut Entropy::seeded(2))
        .await
        .expect("mock reading");
    assert!((1..=250).contains(&reading.aqi));
}

#[tokio::test]
async fn owm_forecast_is_grouped_by_day() {
    let server = MockServer::start().await;

    // 2024-01-01T00:00Z and 12:00Z, then 2024-01-02T00:00Z
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution/forecast"))
        .and(query_param("lat", "13.08"))
        .and(query_param("lon", "80.27"))
        .and(query_param("appid", "test-appid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lon": 80.27, "lat": 13.08 },
            "list": [
                { "dt": 1_704_067_200, "main": { "aqi": 2 }, "components": { "pm2_5": 20.0, "pm10": 40.0 } },
                { "dt": 1_704_110_400, "main": { "aqi": 4 }, "components": { "pm2_5": 30.0, "pm10": 50.0 } },
                { "dt": 1_704_153_600, "main": { "aqi": 1 }, "components": { "pm2_5": 5.0 } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let days = owm(&server.uri())
        .fetch_forecast(chennai())
        .await
        .expect("should fetch");

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, "Mon, Jan 1");
    assert_eq!(days[0].aqi, 125);
    assert_eq!(days[0].pollutants.len(), 2);
    assert!((days[0].pollutants[0].value - 25.0).abs() < 1e-9);
    assert_eq!(days[1].aqi, 25);
    assert_eq!(days[1].pollutants.len(), 1);
}

#[tokio::test]
async fn snapshot_drops_today_from_the_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed/geo:13.08;80.27/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "data": { "aqi": 42, "iaqi": {} }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                { "dt": 1_704_067_200, "main": { "aqi": 1 }, "components": {} },
                { "dt": 1_704_153_600, "main": { "aqi": 2 }, "components": {} }
            ]
        })))
        .mount(&server)
        .await;

    let service = AirQualityService::new(waqi(&server.uri()), owm(&server.uri()));
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    let snapshot = service
        .snapshot(chennai(), today, &mut Entropy::seeded(4))
        .await;

    let current = snapshot.current.expect("current");
    assert_eq!(current.aqi, 42);
    assert_eq!(current.aqi_category, "Good");
    assert_eq!(snapshot.forecast.len(), 1);
    assert_eq!(snapshot.forecast[0].date, "Tue, Jan 2");
}

#[tokio::test]
async fn snapshot_without_current_reading_reports_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed/geo:13.08;80.27/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "data": { "aqi": "-", "iaqi": {} }
        })))
        .mount(&server)
        .await;

    let service = AirQualityService::new(waqi(&server.uri()), owm(UNREACHABLE));
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    let snapshot = service
        .snapshot(chennai(), today, &mut Entropy::seeded(4))
        .await;

    assert!(snapshot.current.is_none());
    assert_eq!(snapshot.forecast.len(), 5);
}

#[tokio::test]
async fn snapshot_with_unreachable_endpoints_is_still_well_formed() {
    let service = AirQualityService::new(waqi(UNREACHABLE), owm(UNREACHABLE));
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");

    let snapshot = service
        .snapshot(chennai(), today, &mut Entropy::seeded(10))
        .await;

    let current = snapshot.current.expect("mock current");
    assert_eq!(current.pollutants.len(), 2);
    assert!((15.0..=34.0).contains(&current.weather.temp));
    assert_eq!(snapshot.forecast.len(), 5);
    assert_eq!(snapshot.forecast[0].date, "Sun, Jun 2");
}
