use httpfake::prelude::*;
use std::time::Duration;

fn echo_header_client() -> FakeClient {
    FakeClient::new(|routes| {
        routes.get("/echo/:header", |params, options, _| {
            let name = params.get("header").unwrap_or_default();
            Ok(options.header_value(name).unwrap_or("<missing>").into())
        });
    })
    .unwrap()
}

#[test]
fn branch_adds_headers_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = echo_header_client();

    // Act
    let branch = client.header("X-Trace-Id", "t-1");
    let response = branch.get("/echo/x-trace-id", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(response.text(), "t-1");
}

#[test]
fn branching_does_not_change_the_parent_test() {
    // Arrange
    let client = echo_header_client();

    // Act
    let _branch = client.header("X", "1");
    let response = client.get("/echo/x", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(response.text(), "<missing>");
    assert!(client.options().header_map().is_empty());
    assert!(client.requests_for(GET, "/echo/x")[0].header_value("x").is_none());
}

#[test]
fn branches_accumulate_options_test() {
    // Arrange
    let client = echo_header_client();

    // Act
    let branch = client
        .headers([("accept", "application/json"), ("x-tenant", "a")])
        .header("x-tenant", "b")
        .basic_auth("alice", "secret")
        .timeout(Duration::from_secs(3));
    branch.get("/echo/accept", RequestOptions::new()).unwrap();

    // Assert
    let requests = client.requests_for(GET, "/echo/accept");
    let recorded = &requests[0];
    assert_eq!(recorded.header_value("accept"), Some("application/json"));
    assert_eq!(recorded.header_value("x-tenant"), Some("b"));
    assert_eq!(
        recorded.header_value("authorization"),
        Some("Basic YWxpY2U6c2VjcmV0")
    );
    assert_eq!(recorded.timeout_duration(), Some(Duration::from_secs(3)));
}

#[test]
fn call_options_win_over_branch_options_test() {
    // Arrange
    let client = echo_header_client();
    let branch = client.bearer_auth("branch-token");

    // Act
    let response = branch
        .get(
            "/echo/authorization",
            RequestOptions::new().bearer_auth("call-token"),
        )
        .unwrap();

    // Assert
    assert_eq!(response.text(), "Bearer call-token");
    assert_eq!(
        branch.options().header_value("authorization"),
        Some("Bearer branch-token")
    );
}

#[test]
fn default_options_apply_to_every_request_test() {
    // Arrange
    let client = FakeClient::builder()
        .default_options(RequestOptions::new().header("user-agent", "httpfake-tests"))
        .build(|routes| {
            routes.get("/ua", |_, options, _| {
                Ok(options.header_value("user-agent").unwrap_or_default().into())
            });
        })
        .unwrap();

    // Act
    let response = client.get("/ua", RequestOptions::new()).unwrap();

    // Assert
    assert_eq!(response.text(), "httpfake-tests");
}

#[test]
fn close_is_a_no_op_test() {
    // Arrange
    let client = echo_header_client();

    // Act
    client.close();

    // Assert
    assert!(client.get("/echo/x", RequestOptions::new()).is_ok());
}
