#![cfg(all(feature = "reqwest", feature = "tokio"))]

use restcall::{core::on_complete, interface, BinderBuilder, Failure};
use serde::{Deserialize, Serialize};
use wiremock::{
    matchers::{body_string, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[derive(Serialize)]
struct LoginForm {
    account: String,
    password: String,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Token {
    token: String,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Envelope {
    code: i32,
    entity: Token,
}

interface! {
    struct UserService at "/user" headers { "X-Client" => "e2e" } {
        POST "/login" => fn login(body form: &LoginForm) -> Envelope;

        DELETE "/{account}" => fn remove(path account: &str, query reason: &str) -> Option<Token>;
    }
}

fn form() -> LoginForm {
    LoginForm {
        account: "111".into(),
        password: "123".into(),
    }
}

async fn login_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(header("X-Client", "e2e"))
        .and(header("Content-Type", "application/json"))
        .and(body_string("{\"account\":\"111\",\"password\":\"123\"}"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("{\"code\":0,\"entity\":{\"token\":\"abc\"}}"),
        )
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn login_with_callback() {
    let server = login_server().await;
    let users = BinderBuilder::new()
        .base_url(server.uri())
        .bind::<UserService>()
        .unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel();

    users
        .login(&form())
        .unwrap()
        .send_async(on_complete(move |result: Result<Envelope, Failure>| {
            let _ = tx.send(result);
        }));

    let envelope = rx.await.unwrap().unwrap();
    assert_eq!(envelope.code, 0);
    assert_eq!(envelope.entity.token, "abc");
}

#[tokio::test]
async fn login_and_await() {
    let server = login_server().await;
    let users = BinderBuilder::new()
        .base_url(server.uri())
        .bind::<UserService>()
        .unwrap();

    let envelope = users.login(&form()).unwrap().execute().await.unwrap();

    assert_eq!(envelope.entity.token, "abc");
}

#[tokio::test]
async fn decode_empty_delete_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/user/alice"))
        .and(query_param("reason", "gone away"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let users = BinderBuilder::new()
        .base_url(server.uri())
        .bind::<UserService>()
        .unwrap();

    let result = users
        .remove("alice", "gone away")
        .unwrap()
        .execute()
        .await;

    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn report_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let users = BinderBuilder::new()
        .base_url(server.uri())
        .bind::<UserService>()
        .unwrap();

    let failure = users.login(&form()).unwrap().execute().await.unwrap_err();

    assert_eq!(failure.code, 500);
    assert_eq!(failure.message, "Internal Server Error");
}
