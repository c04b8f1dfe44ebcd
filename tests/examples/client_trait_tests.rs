use httpfake::prelude::*;
use serde::Deserialize;
use serde_json::json;

/// A small API wrapper as it would appear in application code. It only knows the
/// `HttpClient` trait.
struct UserService<C: HttpClient> {
    client: C,
}

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
}

impl UserService<FakeClient> {
    fn new(client: &FakeClient, token: &str) -> Self {
        Self {
            client: client.bearer_auth(token).header("accept", "application/json"),
        }
    }

    fn find(&self, id: u32) -> Result<User, httpfake::Error> {
        self.client
            .get(&format!("/users/{}", id), RequestOptions::new())?
            .json()
    }

    fn rename(&self, id: u32, name: &str) -> Result<u16, httpfake::Error> {
        let response = self.client.patch(
            &format!("/users/{}", id),
            RequestOptions::new().json(json!({ "name": name })),
        )?;
        Ok(response.status().as_u16())
    }
}

#[test]
fn service_runs_against_fake_client_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = FakeClient::new(|routes| {
        routes
            .get("/users/:id", |params, options, res| {
                if options.header_value("authorization") != Some("Bearer secret") {
                    res.set_status(401);
                    return Ok(json!({ "error": "unauthorized" }).into());
                }
                Ok(json!({ "id": params.parse::<u32>("id"), "name": "Fred" }).into())
            })
            .patch("/users/:id", |_, _, res| {
                res.set_status(204);
                Ok(Body::empty())
            });
    })
    .unwrap();

    let service = UserService::new(&client, "secret");

    // Act
    let user = service.find(3).unwrap();
    let status = service.rename(3, "Hans").unwrap();

    // Assert
    assert_eq!(
        user,
        User {
            id: 3,
            name: "Fred".to_string()
        }
    );
    assert_eq!(status, 204);

    let patches = client.requests_for(PATCH, "/users/3");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].json_body(), Some(&json!({ "name": "Hans" })));
    assert_eq!(patches[0].header_value("accept"), Some("application/json"));
}

/// A generic helper written purely against the trait.
fn ping<C: HttpClient>(client: &C) -> Result<C::Response, C::Error> {
    client.header("x-ping", "1").get("/ping", RequestOptions::new())
}

#[test]
fn generic_code_accepts_fake_client_test() {
    // Arrange
    let client = FakeClient::new(|routes| {
        routes.get("/ping", |_, options, _| {
            Ok(options.header_value("x-ping").unwrap_or_default().into())
        });
    })
    .unwrap();

    // Act
    let response = ping(&client).unwrap();

    // Assert
    assert_eq!(response.text(), "1");
    assert!(client.options().header_value("x-ping").is_none());
}

#[test]
fn request_with_explicit_method_test() {
    // Arrange
    let client = FakeClient::new(|routes| {
        routes.register("PUT".parse().unwrap(), "/flags/:name", |params, _, _| {
            Ok(params.get("name").unwrap_or_default().into())
        });
    })
    .unwrap();

    // Act
    let response = client
        .request(PUT, "/flags/dark-mode", RequestOptions::new())
        .unwrap();

    // Assert
    assert_eq!(response.text(), "dark-mode");
    assert_eq!(client.routes(), vec![(PUT, "/flags/:name".to_string())]);
}
