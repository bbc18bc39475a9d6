use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, RuntimeErr, Value,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

use nhadat_api::api::{AppState, router};
use nhadat_api::config::Config;
use nhadat_api::db::Store;

type MockRow = BTreeMap<&'static str, Value>;

fn spawn_app(conn: DatabaseConnection) -> Router {
    let state = Arc::new(AppState {
        store: Store::from_connection(conn),
        config: Arc::new(Config::default()),
    });
    router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn menu_row(name: &str, slug: &str) -> MockRow {
    BTreeMap::from([("name", name.into()), ("slug", slug.into())])
}

fn search_hit_row(title: &str, score: f32) -> MockRow {
    BTreeMap::from([
        ("searchable_id", 42i64.into()),
        ("searchable_type", "project".into()),
        ("listing_type", "sale".into()),
        ("title", title.into()),
        ("description", "Khu đô thị phía Đông".into()),
        ("url", "/du-an/vinhomes-grand-park".into()),
        (
            "image_url",
            vec!["a.jpg".to_string(), "b.jpg".to_string()].into(),
        ),
        ("published_date", chrono::Utc::now().into()),
        ("price_from", 1_200_000_000f64.into()),
        ("price_to", 5_400_000_000f64.into()),
        ("price_unit", "VND".into()),
        ("address_detail", "TP. Thủ Đức, TP.HCM".into()),
        ("sub_type_slug", "can-ho".into()),
        ("score", score.into()),
    ])
}

fn featured_project_row(name: &str, slug: &str) -> MockRow {
    BTreeMap::from([
        ("id", 7i64.into()),
        ("name", name.into()),
        ("slug", slug.into()),
        ("thumbnail_url", "thumb.jpg".into()),
        ("address_detail", "Quận 9, TP.HCM".into()),
        ("price_from", 900_000_000f64.into()),
        ("price_to", 3_000_000_000f64.into()),
        ("price_unit", "VND".into()),
        ("published_at", chrono::Utc::now().into()),
    ])
}

#[tokio::test]
async fn test_search_empty_query_returns_empty_list() {
    // No queued results: any store access would fail the request.
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(conn.clone());

    let (status, body) = get_json(app.clone(), "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    let (status, body) = get_json(app, "/search?q=%20%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    // Let any stray detached task run, then confirm nothing touched the
    // store: empty terms must not be counted.
    tokio::task::yield_now().await;
    assert!(conn.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_record_search_term_issues_single_upsert() {
    // Postgres inserts run through the RETURNING path, so the mock serves
    // them from the query buffer: one primary-key row per upsert.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![BTreeMap::from([("term", Value::from("vinhomes"))])],
            vec![BTreeMap::from([("term", Value::from("vinhomes"))])],
        ])
        .into_connection();
    let store = Store::from_connection(conn.clone());

    store.record_search_term("vinhomes").await.unwrap();
    store.record_search_term("vinhomes").await.unwrap();

    let log = conn.into_transaction_log();
    assert_eq!(log.len(), 2);

    let stmt = format!("{:?}", log[0]);
    assert!(stmt.contains("search_analytics"), "unexpected statement: {stmt}");
    assert!(stmt.contains("ON CONFLICT"), "not an upsert: {stmt}");
    // Repeats produce the same single statement, so concurrent searches for
    // one term converge on one counter row instead of duplicating it.
    assert_eq!(format!("{:?}", log[0]), format!("{:?}", log[1]));
}

#[tokio::test]
async fn test_search_returns_ranked_hits() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            search_hit_row("Vinhomes Grand Park", 0.91),
            search_hit_row("Vinhomes Central Park", 0.64),
        ]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/search?q=vinhomes").await;
    assert_eq!(status, StatusCode::OK);

    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["title"], "Vinhomes Grand Park");
    assert_eq!(hits[0]["searchable_type"], "project");
    assert_eq!(hits[0]["image_url"], serde_json::json!(["a.jpg", "b.jpg"]));
    assert!(hits[0]["score"].as_f64().unwrap() >= hits[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn test_search_database_failure_is_opaque() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        ))])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/search?q=vinhomes").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Internal detail stays server-side.
    assert_eq!(body["error"], "A database error occurred");
}

#[tokio::test]
async fn test_initial_data_has_all_sections() {
    // Result sets are consumed in handler fan-out order: project types,
    // product types, wiki topics, news categories, business types.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![menu_row("Chung cư", "chung-cu")],
            vec![menu_row("Căn hộ", "can-ho"), menu_row("Nhà phố", "nha-pho")],
            vec![menu_row("Phong thủy", "phong-thuy")],
            vec![menu_row("Thị trường", "thi-truong")],
            vec![menu_row("Môi giới", "moi-gioi")],
        ])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/api/menu/initial-data").await;
    assert_eq!(status, StatusCode::OK);

    for key in ["duAn", "muaBan", "choThue", "wiki", "tinTuc", "doanhNghiep"] {
        assert!(body.get(key).is_some(), "missing section {key}");
    }

    assert_eq!(body["duAn"]["types"][0]["slug"], "chung-cu");
    // Sale and rent share the product-type list.
    assert_eq!(body["muaBan"]["types"], body["choThue"]["types"]);
    assert_eq!(body["muaBan"]["types"].as_array().unwrap().len(), 2);
    assert_eq!(body["wiki"]["topics"][0]["slug"], "wiki/phong-thuy");
    assert_eq!(body["tinTuc"]["categories"][0]["slug"], "tin-tuc/thi-truong");
    assert_eq!(body["doanhNghiep"]["types"][0]["name"], "Môi giới");
}

#[tokio::test]
async fn test_initial_data_empty_tables_yield_empty_arrays() {
    let empty = Vec::<MockRow>::new();
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            empty.clone(),
            empty.clone(),
            empty.clone(),
            empty.clone(),
            empty,
        ])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/api/menu/initial-data").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["duAn"]["types"], serde_json::json!([]));
    assert_eq!(body["muaBan"]["types"], serde_json::json!([]));
    assert_eq!(body["choThue"]["types"], serde_json::json!([]));
    assert_eq!(body["wiki"]["topics"], serde_json::json!([]));
    assert_eq!(body["tinTuc"]["categories"], serde_json::json!([]));
    assert_eq!(body["doanhNghiep"]["types"], serde_json::json!([]));
}

#[tokio::test]
async fn test_dynamic_data_param_validation() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(conn);

    let (status, _) = get_json(app.clone(), "/api/menu/dynamic-data").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(app.clone(), "/api/menu/dynamic-data?type=project").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(app, "/api/menu/dynamic-data?type=bogus&slug=chung-cu").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "type must be one of: project, sale, rent");
}

#[tokio::test]
async fn test_dynamic_data_no_matches_is_not_an_error() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MockRow>::new(), Vec::<MockRow>::new()])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/api/menu/dynamic-data?type=project&slug=chung-cu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"locations": [], "featured": {"project": null}})
    );
}

#[tokio::test]
async fn test_dynamic_data_sale_variant() {
    // Fan-out order: provinces first, then the featured project.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![
                menu_row("Hà Nội", "ha-noi"),
                menu_row("TP. Hồ Chí Minh", "tp-ho-chi-minh"),
            ],
            vec![featured_project_row("Vinhomes Grand Park", "vinhomes-grand-park")],
        ])
        .into_connection();
    let app = spawn_app(conn.clone());

    let (status, body) = get_json(app, "/api/menu/dynamic-data?type=sale&slug=can-ho").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["locations"].as_array().unwrap().len(), 2);
    assert_eq!(body["locations"][0]["slug"], "ha-noi");
    assert_eq!(body["featured"]["project"]["slug"], "vinhomes-grand-park");
    assert_eq!(body["featured"]["project"]["price_unit"], "VND");

    // Unpublished projects must not outrank published ones as featured.
    let log = conn.into_transaction_log();
    assert_eq!(log.len(), 2);
    let featured_stmt = format!("{:?}", log[1]);
    assert!(
        featured_stmt.contains("NULLS LAST"),
        "featured ordering lost its NULL handling: {featured_stmt}"
    );
}

#[tokio::test]
async fn test_popular_searches_merges_and_caps() {
    // Organic terms: one duplicates a curated term ("căn hộ chung cư").
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            BTreeMap::from([("term", Value::from("vinhomes"))]),
            BTreeMap::from([("term", Value::from("căn hộ chung cư"))]),
            BTreeMap::from([("term", Value::from("shophouse"))]),
        ]])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/api/popular-searches").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!(["căn hộ chung cư", "đất nền", "vinhomes", "shophouse"])
    );
}

#[tokio::test]
async fn test_popular_searches_degrades_on_database_failure() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        ))])
        .into_connection();
    let app = spawn_app(conn);

    let (status, body) = get_json(app, "/api/popular-searches").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["căn hộ chung cư", "đất nền"]));
}
