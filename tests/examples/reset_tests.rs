use httpfake::prelude::*;

#[test]
fn reset_requests_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = FakeClient::new(|routes| {
        routes.get("/ping", |_, _, _| Ok("pong".into()));
    })
    .unwrap();
    let branch = client.header("x-a", "1");

    client.get("/ping", RequestOptions::new()).unwrap();
    branch.get("/ping", RequestOptions::new()).unwrap();
    client.assert_hits(GET, "/ping", 2);

    // Act
    branch.reset_requests();

    // Assert
    client.assert_hits(GET, "/ping", 0);
    assert_eq!(
        client.get("/ping", RequestOptions::new()).unwrap().text(),
        "pong"
    );
    client.assert_hits(GET, "/ping", 1);
}
