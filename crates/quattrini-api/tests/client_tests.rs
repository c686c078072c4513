// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use quattrini_app::{ApiCall, ApiOutcome, NewTransaction, RemoteError};
use quattrini_api::Client;
use std::io::Read;
use std::thread;
use std::time::Duration;
use time::macros::date;
use tiny_http::{Header, Response, Server};

fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

fn bearer_header(request: &tiny_http::Request, token: &str) -> bool {
    let expected = format!("Bearer {token}");
    request
        .headers()
        .iter()
        .any(|header| header.field.equiv("Authorization") && header.value.as_str() == expected)
}

#[test]
fn login_returns_the_token() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/login");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("body should read");
        assert!(body.contains("\"email\":\"me@example.com\""));
        assert!(body.contains("\"password\":\"secret\""));
        request
            .respond(json_response(r#"{"token":"tok1"}"#, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let token = client.login("me@example.com", "secret")?;
    assert_eq!(token, "tok1");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn unauthorized_login_is_a_status_error() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response("{}", 401))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .login("me@example.com", "wrong")
        .expect_err("login should fail");
    assert_eq!(error, RemoteError::Status(401));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn protected_calls_carry_the_bearer_token() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/category");
        assert!(bearer_header(&request, "tok1"));
        request
            .respond(json_response("[]", 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let categories = client.list_categories("tok1")?;
    assert!(categories.is_empty());

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn transactions_decode_the_wire_format() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/transaction");
        let body = r#"[{"id":1,"name":"Coffee","cost":3.5,"date":"2026-03-05T00:00:00Z","categoriesid":2}]"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let transactions = client.list_transactions("tok1")?;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, 1);
    assert_eq!(transactions[0].name, "Coffee");
    assert_eq!(transactions[0].cost, 3.5);
    assert_eq!(transactions[0].date.date(), date!(2026 - 03 - 05));
    assert_eq!(transactions[0].category_id, 2);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn unreachable_server_is_a_transport_error() -> Result<()> {
    let client = Client::new("http://127.0.0.1:1", Duration::from_millis(50))?;
    let error = client
        .login("me@example.com", "secret")
        .expect_err("login should fail for unreachable server");
    assert!(matches!(error, RemoteError::Transport(_)));
    Ok(())
}

#[test]
fn malformed_body_is_a_decode_error() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response("not json at all", 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .list_categories("tok1")
        .expect_err("decode should fail");
    assert!(matches!(error, RemoteError::Decode(_)));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn search_sends_the_name_query() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/transaction?name=rent");
        request
            .respond(json_response("[]", 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let transactions = client.search_transactions("tok1", "rent")?;
    assert!(transactions.is_empty());

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn create_category_accepts_created_status() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/category");
        assert!(bearer_header(&request, "tok1"));
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("body should read");
        assert!(body.contains("\"name\":\"Groceries\""));
        request
            .respond(json_response("{}", 201))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    client.create_category("tok1", "Groceries")?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn create_transaction_sends_rfc3339_midnight() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/transaction");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("body should read");
        let parsed: serde_json::Value =
            serde_json::from_str(&body).expect("body should be JSON");
        assert_eq!(parsed["name"], "Coffee");
        assert_eq!(parsed["cost"], 3.5);
        assert_eq!(parsed["date"], "2026-03-05T00:00:00Z");
        assert_eq!(parsed["categoriesid"], 2);
        request
            .respond(json_response("{}", 201))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    client.create_transaction(
        "tok1",
        &NewTransaction {
            name: "Coffee".to_owned(),
            cost: 3.5,
            date: date!(2026 - 03 - 05),
            category_id: 2,
        },
    )?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn delete_passes_the_id_as_a_query() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/transaction?id=7");
        request
            .respond(json_response("{}", 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    client.delete_transaction("tok1", 7)?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn execute_wraps_results_in_outcomes() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/login");
        request
            .respond(json_response(r#"{"token":"tok1"}"#, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let outcome = client.execute(
        "",
        &ApiCall::Login {
            email: "me@example.com".to_owned(),
            password: "secret".to_owned(),
        },
    );
    assert_eq!(outcome, ApiOutcome::LoggedIn(Ok("tok1".to_owned())));

    handle.join().expect("server thread should join");
    Ok(())
}
