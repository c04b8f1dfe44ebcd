use httpfake::prelude::*;
use serde_json::json;

fn orders_client() -> FakeClient {
    FakeClient::new(|routes| {
        routes
            .post("/orders", |_, _, res| {
                res.set_status(201);
                Ok(Body::empty())
            })
            .get("/orders/:id", |params, _, _| Ok(json!({ "id": params.get("id") }).into()));
    })
    .unwrap()
}

#[test]
fn requests_are_recorded_in_call_order_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = orders_client();

    // Act
    for n in 1..=3 {
        client
            .post("/orders", RequestOptions::new().json(json!({ "n": n })))
            .unwrap();
    }

    // Assert
    let requests = client.requests();
    let bodies: Vec<_> = requests["/orders"][&POST]
        .iter()
        .map(|options| options.json_body().cloned().unwrap())
        .collect();
    assert_eq!(bodies, vec![json!({ "n": 1 }), json!({ "n": 2 }), json!({ "n": 3 })]);
}

#[test]
fn requests_are_recorded_under_the_concrete_path_test() {
    // Arrange
    let client = orders_client();

    // Act
    client.get("/orders/1", RequestOptions::new()).unwrap();
    client.get("/orders/2?fields=id", RequestOptions::new()).unwrap();
    client.get("/orders/2", RequestOptions::new()).unwrap();

    // Assert
    let requests = client.requests();
    assert_eq!(requests.paths().collect::<Vec<_>>(), ["/orders/1", "/orders/2"]);
    assert_eq!(requests.count("/orders/1", GET), 1);
    assert_eq!(requests.count("/orders/2", GET), 2);
    assert!(requests.get("/orders/:id").is_none());
}

#[test]
fn logged_options_include_branch_options_test() {
    // Arrange
    let client = orders_client();
    let branch = client.header("idempotency-key", "k-1");

    // Act
    branch
        .post("/orders", RequestOptions::new().json(json!({ "n": 1 })))
        .unwrap();

    // Assert
    let logged = client.requests_for(POST, "/orders");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].header_value("idempotency-key"), Some("k-1"));
    assert_eq!(logged[0].json_body(), Some(&json!({ "n": 1 })));
}

#[test]
fn requests_snapshot_does_not_change_afterwards_test() {
    // Arrange
    let client = orders_client();
    client.post("/orders", RequestOptions::new()).unwrap();

    // Act
    let snapshot = client.requests();
    client.post("/orders", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(snapshot.total(), 1);
    assert_eq!(client.requests().total(), 2);
    client.assert_hits(POST, "/orders", 2);
}

#[test]
fn log_is_empty_before_first_request_test() {
    // Arrange
    let client = orders_client();

    // Assert
    assert!(client.requests().is_empty());
    assert_eq!(client.hits(GET, "/orders/1"), 0);
    assert!(client.requests_for(GET, "/orders/1").is_empty());
}

#[test]
fn requests_are_recorded_under_the_decoded_path_test() {
    // Arrange
    let client = FakeClient::new(|routes| {
        routes.get("/search/:term", |params, _, _| {
            Ok(params.get("term").unwrap_or_default().into())
        });
    })
    .unwrap();

    // Act
    let response = client.get("/search/rust lang", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(response.text(), "rust lang");
    assert_eq!(
        client.requests().paths().collect::<Vec<_>>(),
        ["/search/rust lang"]
    );
    assert_eq!(client.hits(GET, "/search/rust lang"), 1);
    assert_eq!(client.requests_for(GET, "/search/rust%20lang").len(), 1);
    client.assert_hits(GET, "/search/rust lang", 1);
}
