//! Log in against a user service and print the received token.
//!
//! The server address is taken from `RESTCALL_DEMO_URL` and defaults to
//! `http://localhost:8080`.

use restcall::{
    core::{callback, RestCallError},
    interface, BinderBuilder,
};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Serialize)]
struct LoginForm {
    account: String,
    password: String,
}

#[derive(Deserialize, Debug)]
struct Token {
    token: String,
}

#[derive(Deserialize, Debug)]
struct Envelope {
    code: i32,
    entity: Token,
}

interface! {
    /// Account endpoints of the user service.
    struct UserService at "/user" headers { "X-Client" => "restcall-demo" } {
        /// Exchange credentials for a token.
        POST "/login" => fn login(body["model"] form: &LoginForm) -> Envelope;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let base_url = env::var("RESTCALL_DEMO_URL").unwrap_or("http://localhost:8080".into());
    let users = BinderBuilder::new()
        .base_url(base_url)
        .bind::<UserService>()?;

    let form = LoginForm {
        account: "111".into(),
        password: "123".into(),
    };

    // Dropping the success branch after a failure also closes the channel.
    let (tx, rx) = tokio::sync::oneshot::channel();
    users.login(&form)?.send_async(callback(
        move |envelope: Envelope| {
            println!("code: {}, token: {}", envelope.code, envelope.entity.token);
            let _ = tx.send(());
        },
        move |code: u16, message: String, cause: RestCallError| {
            println!("login failed: {code} {message} ({cause})");
        },
    ));

    let _ = rx.await;

    match users.login(&form)?.execute().await {
        Ok(envelope) => println!("awaited token: {}", envelope.entity.token),
        Err(failure) => println!("awaited login failed: {failure}"),
    }

    Ok(())
}
