//! End-to-end runs of `checkref::run` against the live mock server.

use checkref::{execute, run, Format, Opts};
use checkref_core::{AuthClient, Verdict};
use mock_server::{MockState, RecordedRequest};
use serde_json::json;

const TOKEN: &str = "good-token";

fn start_server(state: MockState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn snapshot(state: &MockState) -> Vec<RecordedRequest> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(state.requests())
}

fn opts(base_url: &str, token: &str, format: Format) -> Opts {
    Opts {
        base_url: base_url.to_string(),
        token: token.to_string(),
        format,
    }
}

fn run_to_string(opts: &Opts) -> (anyhow::Result<Verdict>, String) {
    let mut out = Vec::new();
    let result = run(opts, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn accepted_token_prints_mapping() {
    let state = MockState::new(TOKEN, json!({"id": 1}));
    let base = start_server(state);

    let (result, out) = run_to_string(&opts(&base, TOKEN, Format::Repr));
    assert!(result.unwrap().is_accepted());
    assert_eq!(out, "{'id': 1}\n");
}

#[test]
fn accepted_token_prints_pretty_json() {
    let state = MockState::new(TOKEN, json!({"id": 1, "wallet": "0xabc"}));
    let base = start_server(state);

    let (result, out) = run_to_string(&opts(&base, TOKEN, Format::Pretty));
    result.unwrap();
    assert_eq!(out, "{\n  \"id\": 1,\n  \"wallet\": \"0xabc\"\n}\n");
}

#[test]
fn rejected_token_prints_error_and_succeeds() {
    let state = MockState::new(TOKEN, json!({"id": 1}));
    let base = start_server(state);

    let (result, out) = run_to_string(&opts(&base, "stale-token", Format::Json));
    let verdict = result.unwrap();
    assert!(!verdict.is_accepted());
    assert_eq!(out, "Erreur 401: unauthorized\n");
}

#[test]
fn exactly_one_request_with_the_three_headers() {
    let state = MockState::new(TOKEN, json!({"id": 1}));
    let base = start_server(state.clone());

    let (result, _) = run_to_string(&opts(&format!("{base}/"), TOKEN, Format::Repr));
    result.unwrap();

    let seen = snapshot(&state);
    assert_eq!(seen.len(), 1);
    let req = &seen[0];
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/auth/me");
    assert_eq!(req.header("authorization"), Some("Bearer good-token"));
    assert_eq!(req.header("accept"), Some("*/*"));
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn unknown_path_is_reported_not_retried() {
    let state = MockState::new(TOKEN, json!({"id": 1}));
    let base = start_server(state.clone());

    let (result, out) = run_to_string(&opts(&format!("{base}/v2"), TOKEN, Format::Repr));
    result.unwrap();
    assert_eq!(out, "Erreur 404: \n");
    assert_eq!(snapshot(&state).len(), 1);
}

#[test]
fn wide_integers_and_escapes_survive_the_round_trip() {
    let raw = r#"{"id": 123456789012345678901234567890, "n": "a\u00a0b"}"#;
    let state = MockState::new(TOKEN, serde_json::from_str(raw).unwrap());
    let base = start_server(state);

    let (result, out) = run_to_string(&opts(&base, TOKEN, Format::Repr));
    result.unwrap();
    assert_eq!(out, "{'id': 123456789012345678901234567890, 'n': 'a\\xa0b'}\n");
}

#[test]
fn execute_returns_response_headers() {
    let state = MockState::new(TOKEN, json!({"id": 1}));
    let base = start_server(state);

    let client = AuthClient::new(&base, "stale-token").unwrap();
    let response = execute(&client.build_verify()).unwrap();
    assert_eq!(response.status, 401);
    assert_eq!(response.body, "unauthorized");
    let content_type = response.header("content-type").unwrap();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
}

#[test]
fn string_profile_is_rendered() {
    let state = MockState::new(TOKEN, json!("not an object"));
    let base = start_server(state);

    let (result, out) = run_to_string(&opts(&base, TOKEN, Format::Repr));
    result.unwrap();
    assert_eq!(out, "'not an object'\n");
}

#[test]
fn connection_refused_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (result, out) = run_to_string(&opts(&format!("http://{addr}"), TOKEN, Format::Repr));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("request to"));
    assert!(out.is_empty());
}
