use super::*;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use shared::{
    domain::{Dimensions, ProductId, ProductKind},
    protocol::{DeleteProductsRequest, NewProduct, DELETE_IDS_FIELD},
};
use tokio::{net::TcpListener, sync::Mutex};

type SubmittedFields = Vec<(String, String)>;

#[derive(Clone, Default)]
struct ProductServerState {
    submissions: Arc<Mutex<Vec<SubmittedFields>>>,
    list_calls: Arc<Mutex<u32>>,
    list_delay: Option<Duration>,
    reject_with: Option<(StatusCode, String)>,
}

async fn collect_fields(mut multipart: Multipart) -> SubmittedFields {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        fields.push((name, value));
    }
    fields
}

async fn handle_list(State(state): State<ProductServerState>) -> Json<serde_json::Value> {
    *state.list_calls.lock().await += 1;
    if let Some(delay) = state.list_delay {
        tokio::time::sleep(delay).await;
    }
    Json(json!([
        { "id": 1, "sku": "JVC200123", "name": "Acme DISC", "price": 1, "type": "disc", "size": 700 },
        { "id": "2", "sku": "GGWP0007", "name": "War and Peace", "price": "20.00", "weight": "2", "size": null },
        { "id": 3, "sku": "BROKEN", "name": "No variant", "price": 5 }
    ]))
}

async fn handle_mutation(State(state): State<ProductServerState>, multipart: Multipart) -> Response {
    let fields = collect_fields(multipart).await;
    state.submissions.lock().await.push(fields);
    match &state.reject_with {
        Some((status, body)) => (*status, body.clone()).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

async fn spawn_product_server(state: ProductServerState) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/products", get(handle_list))
        .route("/api/products/add", post(handle_mutation))
        .route("/api/products/delete", post(handle_mutation))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn disc(size: f64) -> NewProduct {
    NewProduct {
        sku: "JVC200123".into(),
        name: "Acme DISC".into(),
        price: 1.0,
        kind: ProductKind::Disc { size },
    }
}

fn field<'a>(fields: &'a SubmittedFields, name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[tokio::test]
async fn create_product_posts_one_variant_field_as_multipart() {
    let state = ProductServerState::default();
    let server_url = spawn_product_server(state.clone()).await.expect("spawn server");
    let api = HttpProductApi::new(server_url);

    api.create_product(&disc(700.0)).await.expect("create");

    let submissions = state.submissions.lock().await;
    let fields = submissions.first().expect("one submission");
    assert_eq!(field(fields, "sku"), Some("JVC200123"));
    assert_eq!(field(fields, "name"), Some("Acme DISC"));
    assert_eq!(field(fields, "price"), Some("1"));
    assert_eq!(field(fields, "type"), Some("disc"));
    assert_eq!(field(fields, "size"), Some("700"));
    assert_eq!(field(fields, "weight"), None);
    assert_eq!(field(fields, "dimensions"), None);
}

#[tokio::test]
async fn create_furniture_sends_collapsed_dimensions() {
    let state = ProductServerState::default();
    let server_url = spawn_product_server(state.clone()).await.expect("spawn server");
    let api = HttpProductApi::new(server_url);

    let product = NewProduct {
        sku: "TR120555".into(),
        name: "Chair".into(),
        price: 40.0,
        kind: ProductKind::Furniture {
            dimensions: Dimensions {
                height: 10.0,
                width: 20.0,
                length: 30.0,
            },
        },
    };
    api.create_product(&product).await.expect("create");

    let submissions = state.submissions.lock().await;
    let fields = submissions.first().expect("one submission");
    assert_eq!(field(fields, "dimensions"), Some("10x20x30"));
    for key in ["height", "width", "length"] {
        assert_eq!(field(fields, key), None, "{key} must not be sent");
    }
}

#[tokio::test]
async fn server_error_message_is_reported_verbatim() {
    let state = ProductServerState {
        reject_with: Some((
            StatusCode::BAD_REQUEST,
            r#"{"error":"SKU already exists"}"#.to_string(),
        )),
        ..Default::default()
    };
    let server_url = spawn_product_server(state).await.expect("spawn server");
    let api = HttpProductApi::new(server_url);

    let err = api.create_product(&disc(700.0)).await.expect_err("rejected");
    assert_eq!(
        err,
        ApiError::Request {
            status: 400,
            message: "SKU already exists".to_string(),
        }
    );
    assert_eq!(err.to_string(), "SKU already exists");
}

#[tokio::test]
async fn error_without_json_body_falls_back_to_status_line() {
    let state = ProductServerState {
        reject_with: Some((StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string())),
        ..Default::default()
    };
    let server_url = spawn_product_server(state).await.expect("spawn server");
    let api = HttpProductApi::new(server_url);

    let err = api
        .delete_products(&DeleteProductsRequest {
            ids: vec![ProductId(1)],
        })
        .await
        .expect_err("rejected");
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.to_string(),
        "request failed with status 500 Internal Server Error"
    );
}

#[tokio::test]
async fn delete_repeats_the_ids_field_per_product() {
    let state = ProductServerState::default();
    let server_url = spawn_product_server(state.clone()).await.expect("spawn server");
    let api = HttpProductApi::new(server_url);

    api.delete_products(&DeleteProductsRequest {
        ids: vec![ProductId(3), ProductId(9)],
    })
    .await
    .expect("delete");

    let submissions = state.submissions.lock().await;
    let fields = submissions.first().expect("one submission");
    assert_eq!(
        fields,
        &vec![
            (DELETE_IDS_FIELD.to_string(), "3".to_string()),
            (DELETE_IDS_FIELD.to_string(), "9".to_string()),
        ]
    );
}

#[tokio::test]
async fn list_products_skips_records_that_do_not_decode() {
    let server_url = spawn_product_server(ProductServerState::default())
        .await
        .expect("spawn server");
    let api = HttpProductApi::new(server_url);

    let products = api.list_products().await.expect("list");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].kind, ProductKind::Disc { size: 700.0 });
    assert_eq!(products[1].id, ProductId(2));
    assert_eq!(products[1].kind, ProductKind::Book { weight: 2.0 });
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpProductApi::new(format!("http://{addr}"));
    let err = api.list_products().await.expect_err("nothing listening");
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn slow_server_hits_the_request_timeout() {
    let state = ProductServerState {
        list_delay: Some(Duration::from_secs(2)),
        ..Default::default()
    };
    let server_url = spawn_product_server(state).await.expect("spawn server");
    let api = HttpProductApi::with_timeout(server_url, Duration::from_millis(100)).expect("client");

    let err = api.list_products().await.expect_err("timeout");
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn catalog_serves_cached_list_until_revalidated() {
    let state = ProductServerState::default();
    let server_url = spawn_product_server(state.clone()).await.expect("spawn server");
    let catalog = CatalogClient::new(Arc::new(HttpProductApi::new(server_url)));

    assert!(!catalog.is_fresh().await);
    catalog.products().await.expect("first list");
    catalog.products().await.expect("cached list");
    assert_eq!(*state.list_calls.lock().await, 1);
    assert!(catalog.is_fresh().await);

    catalog.revalidate(PRODUCTS_TAG).await;
    assert!(!catalog.is_fresh().await);
    catalog.products().await.expect("refetched list");
    assert_eq!(*state.list_calls.lock().await, 2);
}

#[tokio::test]
async fn catalog_built_from_settings_uses_the_configured_base() {
    let server_url = spawn_product_server(ProductServerState::default())
        .await
        .expect("spawn server");
    let settings = Settings {
        api_base: server_url,
        ..Settings::default()
    };
    let catalog = CatalogClient::from_settings(&settings).expect("catalog");
    assert_eq!(catalog.products().await.expect("list").len(), 2);
}

#[test]
fn routes_map_to_paths() {
    assert_eq!(Route::List.path(), "/");
    assert_eq!(Route::AddProduct.path(), "/addproduct");
}
