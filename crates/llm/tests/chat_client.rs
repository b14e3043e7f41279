use std::time::Duration;

use httpmock::prelude::*;
use llm::{ChatCompletionsClient, LlmSettings};
use qimen::{CompletionError, TextCompleter};
use serde_json::json;

fn client_for(server: &MockServer) -> ChatCompletionsClient {
    let settings = LlmSettings {
        base_url: server.base_url(),
        timeout_secs: 5,
        ..LlmSettings::default()
    };
    ChatCompletionsClient::new(&settings, "test-key".to_string()).unwrap()
}

#[tokio::test]
async fn returns_trimmed_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(json!({ "model": "gpt-3.5-turbo", "max_tokens": 512 }).to_string())
                .body_contains(
                    "You are a helpful assistant that answers questions with reference to Qimen charts.",
                )
                .body_contains("the prompt");
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "  The gate of Life opens.\n" } },
                    { "message": { "role": "assistant", "content": "ignored" } }
                ]
            }));
        })
        .await;

    let answer = client_for(&server).complete("the prompt").await.unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "The gate of Life opens.");
}

#[tokio::test]
async fn no_choices_is_an_empty_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    let err = client_for(&server).complete("q").await.unwrap_err();
    assert_eq!(err, CompletionError::EmptyResponse);
    assert!(!err.retry_policy().is_retryable());
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).header("Retry-After", "7");
        })
        .await;

    let err = client_for(&server).complete("q").await.unwrap_err();
    assert_eq!(
        err,
        CompletionError::RateLimited {
            retry_after: Some(Duration::from_secs(7))
        }
    );
    assert!(err.retry_policy().is_retryable());
}

#[tokio::test]
async fn server_errors_are_retryable_client_errors_are_not() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("boom");
            then.status(503).body("upstream unavailable");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("bad");
            then.status(400).body("invalid request");
        })
        .await;

    let client = client_for(&server);

    let unavailable = client.complete("boom").await.unwrap_err();
    assert_eq!(
        unavailable,
        CompletionError::Provider {
            status: 503,
            message: "upstream unavailable".to_string()
        }
    );
    assert!(unavailable.retry_policy().is_retryable());

    let rejected = client.complete("bad").await.unwrap_err();
    assert!(matches!(rejected, CompletionError::Provider { status: 400, .. }));
    assert!(!rejected.retry_policy().is_retryable());
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = client_for(&server).complete("q").await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse { .. }));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let settings = LlmSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..LlmSettings::default()
    };
    let client = ChatCompletionsClient::new(&settings, "k".to_string()).unwrap();
    let err = client.complete("q").await.unwrap_err();
    assert!(matches!(err, CompletionError::Transport { .. }));
    assert!(err.retry_policy().is_retryable());
}
