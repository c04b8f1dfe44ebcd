use httpfake::prelude::*;
use serde_json::{json, Value};

#[test]
fn json_value_body_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = FakeClient::new(|routes| {
        routes.post("/users", |_, options, res| {
            let name = options
                .json_body()
                .and_then(|body| body.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("nobody")
                .to_string();

            res.set_status(201);
            Ok(json!({ "name": name, "id": 1 }).into())
        });
    })
    .unwrap();

    // Act
    let response = client
        .post("/users", RequestOptions::new().json(json!({ "name": "Fred" })))
        .unwrap();

    // Assert
    assert_eq!(response.status(), 201);
    assert_eq!(response.content_type(), Some("application/json"));
    assert_eq!(
        response.json::<Value>().unwrap(),
        json!({ "name": "Fred", "id": 1 })
    );
}

#[test]
fn json_body_object_serde_test() {
    // This is a temporary type that we will use for this test
    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    struct TestUser {
        name: String,
    }

    // Arrange
    let client = FakeClient::new(|routes| {
        routes.get("/users/:name", |params, _, _| {
            let user = TestUser {
                name: params.get("name").unwrap_or_default().to_string(),
            };
            Ok(Body::from_serialize(&user)?)
        });
    })
    .unwrap();

    // Act
    let user: TestUser = client
        .get("/users/Hans", RequestOptions::new())
        .unwrap()
        .json()
        .unwrap();

    // Assert
    assert_eq!(
        user,
        TestUser {
            name: "Hans".to_string()
        }
    );
}

#[test]
fn json_suffix_content_types_are_encoded_as_json_test() {
    // Arrange
    let client = FakeClient::new(|routes| {
        routes.get("/problems/1", |_, _, res| {
            res.set_status(404).set_content_type("application/problem+json");
            Ok(json!({ "title": "Not Found" }).into())
        });
    })
    .unwrap();

    // Act
    let response = client.get("/problems/1", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(response.status(), 404);
    assert_eq!(response.content_type(), Some("application/problem+json"));
    assert_eq!(response.text(), r#"{"title":"Not Found"}"#);
}

#[test]
fn structured_body_with_form_content_type_test() {
    // Arrange
    let client = FakeClient::new(|routes| {
        routes.post("/oauth/token", |_, _, res| {
            res.set_content_type("application/x-www-form-urlencoded");
            Ok(json!({ "access_token": "abc def", "expires_in": 3600 }).into())
        });
    })
    .unwrap();

    // Act
    let response = client.post("/oauth/token", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(response.text(), "access_token=abc+def&expires_in=3600");
}

#[test]
fn structured_body_with_unsupported_content_type_fails_test() {
    // Arrange
    let client = FakeClient::new(|routes| {
        routes.get("/report", |_, _, res| {
            res.set_content_type("text/csv");
            Ok(json!({ "rows": [] }).into())
        });
    })
    .unwrap();

    // Act
    let err = client.get("/report", RequestOptions::new()).unwrap_err();

    // Assert
    assert!(matches!(err, httpfake::Error::UnsupportedContentType(_)));
}
