use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use voyage_core::Catalog;

use crate::{api, config::Config, state::AppState};

fn setup_app() -> axum::Router {
    let state = Arc::new(AppState::with_catalog(Config::default(), Catalog::seeded()));
    api::routes().with_state(state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn plan_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/routes/plan")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn plans_a_route_between_known_ports() {
    let app = setup_app();

    let res = app
        .oneshot(plan_request(json!({
            "origin_port_id": "CNSHA",
            "destination_port_id": "CNTAO",
            "ship_id": "SHIP-001",
            "strategy": "fastest",
            "seed": 2026
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body = read_json(res).await;
    let waypoints = body["waypoints"].as_array().expect("waypoints");
    assert_eq!(waypoints.len(), 5);
    assert_eq!(waypoints[0]["status"], "current");
    assert_eq!(waypoints[0]["position"]["latitude"], 31.2304);
    assert_eq!(waypoints[4]["position"]["longitude"], 120.3162);
    assert_eq!(body["strategy"], "fastest");
    assert_eq!(body["weather_risks"].as_array().unwrap().len(), 2);
    assert_eq!(body["repositioned_ship"]["position"]["latitude"], 31.2304);

    let distance = body["distance_nautical_miles"].as_u64().unwrap();
    assert!((260..=320).contains(&distance));
    assert_eq!(
        body["fuel_consumption_tons"].as_u64().unwrap(),
        (distance as f64 * 0.06).round() as u64
    );
}

#[tokio::test]
async fn safest_plans_carry_no_weather_risks() {
    let app = setup_app();
    for seed in 0..5 {
        let res = app
            .clone()
            .oneshot(plan_request(json!({
                "origin_port_id": "CNSHA",
                "destination_port_id": "CNDLC",
                "ship_id": "SHIP-003",
                "strategy": "safest",
                "seed": seed
            })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert!(body["weather_risks"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn unknown_port_is_not_found() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "origin_port_id": "CNSHA",
            "destination_port_id": "ATLANTIS",
            "ship_id": "SHIP-001",
            "strategy": "fastest"
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(body["kind"], "port_not_found");
}

#[tokio::test]
async fn unknown_ship_is_not_found() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "origin_port_id": "CNSHA",
            "destination_port_id": "CNTAO",
            "ship_id": "SHIP-999",
            "strategy": "fastest"
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(res).await["kind"], "ship_not_found");
}

#[tokio::test]
async fn unknown_strategy_is_bad_request() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "origin_port_id": "CNSHA",
            "destination_port_id": "CNTAO",
            "ship_id": "SHIP-001",
            "strategy": "warp-speed"
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["kind"], "invalid_strategy");
    assert!(body["error"].as_str().unwrap().contains("warp-speed"));
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let app = setup_app();

    let broken = Request::builder()
        .method("POST")
        .uri("/v1/routes/plan")
        .header("content-type", "application/json")
        .body(Body::from("{\"origin_port_id\": \"CNSHA\","))
        .unwrap();
    let res = app.clone().oneshot(broken).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["kind"], "invalid_request");
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));

    let res = app
        .clone()
        .oneshot(plan_request(json!({
            "origin_port_id": "CNSHA",
            "destination_port_id": "CNTAO"
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_json(res).await["kind"], "invalid_request");

    let untyped = Request::builder()
        .method("POST")
        .uri("/v1/routes/plan")
        .body(Body::from("{}"))
        .unwrap();
    let res = app.oneshot(untyped).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(read_json(res).await["kind"], "invalid_request");
}

#[tokio::test]
async fn same_port_yields_trivial_plan() {
    let app = setup_app();
    let res = app
        .oneshot(plan_request(json!({
            "origin_port_id": "CNTAO",
            "destination_port_id": "CNTAO",
            "ship_id": "SHIP-002",
            "strategy": "economical"
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["waypoints"].as_array().unwrap().len(), 2);
    assert_eq!(body["distance_nautical_miles"], 0);
    assert_eq!(body["fuel_consumption_tons"], 0);
    assert!(body["weather_risks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let app = setup_app();
    let req = Request::builder()
        .uri("/v1/strategies")
        .header("x-request-id", "trace-me-42")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "trace-me-42");

    let body = read_json(res).await;
    let strategies = body.as_array().unwrap();
    assert_eq!(strategies.len(), 3);
    assert_eq!(strategies[1]["name"], "safest");
    assert_eq!(strategies[1]["risk_markers"], 0);
    assert_eq!(strategies[2]["risk_severities"], json!(["low", "medium"]));
}

#[tokio::test]
async fn catalog_lookups() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/v1/ports/CNDLC").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await["name"], "Dalian");

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/v1/ports/NOPE").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/v1/ships").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await.as_array().unwrap().len(), 5);

    let res = app
        .oneshot(Request::builder().uri("/v1/ships/SHIP-004").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(read_json(res).await["ship_type"], "general_cargo");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_plan_requests_do_not_interfere() {
    let app = setup_app();
    let mut handles = Vec::new();
    for i in 0..24u64 {
        let app = app.clone();
        let strategy = ["fastest", "safest", "economical"][(i % 3) as usize];
        handles.push(tokio::spawn(async move {
            let res = app
                .oneshot(plan_request(json!({
                    "origin_port_id": "CNSHA",
                    "destination_port_id": "CNTAO",
                    "ship_id": "SHIP-001",
                    "strategy": strategy,
                    "seed": i
                })))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            let plan: voyage_core::RoutePlan =
                serde_json::from_value(read_json(res).await).expect("plan body");
            (strategy, plan)
        }));
    }

    for handle in handles {
        let (strategy, plan) = handle.await.unwrap();
        assert_eq!(plan.strategy.name(), strategy);
        assert_eq!(plan.validate(), Vec::<String>::new());
    }
}
