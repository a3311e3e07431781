use quickorder_api::middleware::SESSION_HEADER;
use quickorder_infra::AppConfig;
use reqwest::StatusCode;
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod with the demo catalog, bound to an ephemeral port.
        let config = AppConfig {
            token_secret: "black-box-secret".to_string(),
            ..AppConfig::default()
        };
        let app = quickorder_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A visitor: cart session plus the security token from a rendered widget.
struct Visitor {
    session: String,
    token: String,
}

async fn open_product_page(client: &reqwest::Client, server: &TestServer) -> Visitor {
    let res = client
        .get(server.url("/products/100/quick-order"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let session = res
        .headers()
        .get(SESSION_HEADER)
        .expect("session header missing")
        .to_str()
        .unwrap()
        .to_string();
    let body: Value = res.json().await.unwrap();
    let token = body["client"]["securityToken"].as_str().unwrap().to_string();

    Visitor { session, token }
}

async fn submit(
    client: &reqwest::Client,
    server: &TestServer,
    visitor: &Visitor,
    body: Value,
) -> (StatusCode, Value) {
    let res = client
        .post(server.url("/quick-order/add-to-cart"))
        .header(SESSION_HEADER, &visitor.session)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn cart(client: &reqwest::Client, server: &TestServer, visitor: &Visitor) -> Value {
    client
        .get(server.url("/cart"))
        .header(SESSION_HEADER, &visitor.session)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let server = TestServer::spawn().await;
    let res = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn renders_eligible_variations_with_client_settings() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/products/100/quick-order"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(SESSION_HEADER).is_some());

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["rendered"], true);
    assert_eq!(body["productId"], 100);
    assert_eq!(body["productName"], "Hex bolt");
    assert_eq!(body["assets"].as_array().unwrap().len(), 2);

    let rows = body["rows"].as_array().unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r["variationId"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![101, 103]);
    assert_eq!(rows[0]["model"], "HB-8");
    assert_eq!(rows[1]["maxQuantity"], 5);

    assert_eq!(body["client"]["endpoint"], "/quick-order/add-to-cart");
    assert!(!body["client"]["securityToken"].as_str().unwrap().is_empty());
    assert!(body["client"]["messages"]["noItems"].is_string());
}

#[tokio::test]
async fn simple_and_unknown_products_render_nothing() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/products/300/quick-order", "/products/999/quick-order", "/quick-order"] {
        let body: Value = client.get(server.url(path)).send().await.unwrap().json().await.unwrap();
        assert_eq!(body["rendered"], false, "{path}");
        assert!(body.get("rows").is_none(), "{path}");
        assert_eq!(body["assets"], json!([]), "{path}");
    }
}

#[tokio::test]
async fn query_product_overrides_page_product() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/quick-order?productId=100&pageProductId=300"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["rendered"], true);

    let body: Value = client
        .get(server.url("/quick-order?pageProductId=100"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["rendered"], true);
}

#[tokio::test]
async fn partial_success_reports_failed_lines() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &visitor,
        json!({
            "securityToken": visitor.token,
            "productId": 100,
            "items": [
                { "variationId": 101, "quantity": 2 },
                { "variationId": 102, "quantity": 3 },
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["addedCount"], 1);
    assert_eq!(body["failedCount"], 1);
    assert_eq!(body["message"], "Added 1 item(s) to cart. 1 item(s) failed.");
    assert_eq!(body["failures"][0]["variationId"], 102);
    assert_eq!(body["failures"][0]["reason"], "out_of_stock");
    assert_eq!(body["fragments"]["span.cart-contents-count"], "<span class=\"cart-contents-count\">2</span>");

    let cart = cart(&client, &server, &visitor).await;
    assert_eq!(cart["itemCount"], 2);
    assert_eq!(cart["lines"][0]["variationId"], 101);
}

#[tokio::test]
async fn all_zero_quantities_add_nothing() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &visitor,
        json!({
            "securityToken": visitor.token,
            "productId": "100",
            "items": [{ "variationId": "101", "quantity": "0" }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "nothing_added");
    assert_eq!(body["message"], "Could not add items to cart.");
    assert_eq!(cart(&client, &server, &visitor).await["itemCount"], 0);
}

#[tokio::test]
async fn foreign_variation_is_not_added() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &visitor,
        json!({
            "securityToken": visitor.token,
            "productId": 100,
            "items": [{ "variationId": 201, "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "nothing_added");
}

#[tokio::test]
async fn token_from_another_session_is_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;
    let other = open_product_page(&client, &server).await;

    let impostor = Visitor {
        session: other.session,
        token: visitor.token,
    };
    let (status, body) = submit(
        &client,
        &server,
        &impostor,
        json!({
            "securityToken": impostor.token,
            "productId": 100,
            "items": [{ "variationId": 101, "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "invalid_token");
    assert_eq!(body["message"], "Security check failed.");
}

#[tokio::test]
async fn precondition_errors_are_bad_requests() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let cases = [
        (json!({ "securityToken": visitor.token, "items": [{ "variationId": 101, "quantity": 1 }] }), "missing_product"),
        (json!({ "securityToken": visitor.token, "productId": 300, "items": [{ "variationId": 101, "quantity": 1 }] }), "invalid_product"),
        (json!({ "securityToken": visitor.token, "productId": 100, "items": [] }), "no_items"),
        (json!({ "securityToken": visitor.token, "productId": 100, "items": [{ "quantity": 1 }] }), "no_items"),
    ];

    for (body, code) in cases {
        let (status, res) = submit(&client, &server, &visitor, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(res["error"], code);
    }
}

#[tokio::test]
async fn insufficient_stock_names_available_quantity() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &visitor,
        json!({
            "security_token": visitor.token,
            "product_id": 100,
            "items": [
                { "variation_id": 103, "quantity": 6 },
                { "variation_id": 101, "quantity": 1 },
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["addedCount"], 1);
    assert_eq!(body["failures"][0]["reason"], "insufficient_stock");
    assert_eq!(body["failures"][0]["message"], "Only 5 left in stock.");
}

#[tokio::test]
async fn repeated_submissions_accumulate_in_cart() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    for qty in [2, 3] {
        let (status, _) = submit(
            &client,
            &server,
            &visitor,
            json!({
                "securityToken": visitor.token,
                "productId": 100,
                "items": [{ "variationId": 103, "quantity": qty }]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let cart = cart(&client, &server, &visitor).await;
    assert_eq!(cart["itemCount"], 5);
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn token_endpoint_issues_token_for_session() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let body: Value = client
        .get(server.url("/quick-order/token"))
        .header(SESSION_HEADER, &visitor.session)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["expiresInSecs"], 43_200);

    let fresh = Visitor {
        session: visitor.session,
        token: body["securityToken"].as_str().unwrap().to_string(),
    };
    let (status, _) = submit(
        &client,
        &server,
        &fresh,
        json!({
            "securityToken": fresh.token,
            "productId": 100,
            "items": [{ "variationId": 101, "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_items_fail_per_line_not_per_request() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &visitor,
        json!({
            "securityToken": visitor.token,
            "productId": 100,
            "items": [
                { "variationId": 103, "quantity": 1.5 },
                { "variationId": "abc", "quantity": 1 },
                { "variationId": 101, "quantity": [1] },
                42,
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["addedCount"], 1);
    assert_eq!(body["failures"], json!([
        { "variationId": 0, "reason": "invalid_variation", "message": "Invalid variation." }
    ]));
    assert_eq!(cart(&client, &server, &visitor).await["lines"][0]["quantity"], 1);
}

#[tokio::test]
async fn items_that_are_not_a_list_report_no_items() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let visitor = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &visitor,
        json!({
            "securityToken": visitor.token,
            "productId": 100,
            "items": "101:2"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no_items");
}

#[tokio::test]
async fn unreadable_body_gets_json_error() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/quick-order/add-to-cart"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn huge_quantities_are_refused_and_carts_keep_working() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let greedy = open_product_page(&client, &server).await;
    let other = open_product_page(&client, &server).await;

    let (status, body) = submit(
        &client,
        &server,
        &greedy,
        json!({
            "securityToken": greedy.token,
            "productId": 100,
            "items": [
                { "variationId": 101, "quantity": i64::MAX },
                { "variationId": 101, "quantity": 1 },
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["addedCount"], 1);
    assert_eq!(body["failures"][0]["reason"], "invalid_quantity");
    assert_eq!(cart(&client, &server, &greedy).await["itemCount"], 1);

    let (status, _) = submit(
        &client,
        &server,
        &other,
        json!({
            "securityToken": other.token,
            "productId": 100,
            "items": [{ "variationId": 101, "quantity": 2 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart(&client, &server, &other).await["itemCount"], 2);
}
