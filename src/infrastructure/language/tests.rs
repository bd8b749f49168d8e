//! Tests for the LibreTranslate client against a mock server

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::application::errors::{LanguageError, ServiceError};
use crate::domain::traits::LanguageService;
use crate::infrastructure::language::{LibreTranslateClient, ServiceConfig};

fn client(server: &MockServer) -> LibreTranslateClient {
    LibreTranslateClient::new(
        ServiceConfig::new(server.uri())
            .with_timeouts(Duration::from_millis(300), Duration::from_millis(300))
            .with_retry_backoff(Duration::from_millis(200)),
    )
}

#[tokio::test]
async fn test_detect_flat_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .and(body_json(json!({ "q": ["Hola, ¿cómo estás?"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "language": "es", "confidence": 92.0 },
            { "language": "pt", "confidence": 7.0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).detect("Hola, ¿cómo estás?").await.unwrap();

    assert_eq!(result.language, "es");
    assert_eq!(result.confidence, Some(92.0));
}

#[tokio::test]
async fn test_detect_nested_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "language": "fr", "confidence": 88.5 }
        ]])))
        .mount(&server)
        .await;

    let result = client(&server).detect("Bonjour").await.unwrap();
    assert_eq!(result.language, "fr");
}

#[tokio::test]
async fn test_detect_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .and(body_json(json!({ "q": ["Hallo"], "api_key": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "language": "de", "confidence": 80.0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = LibreTranslateClient::new(ServiceConfig::new(server.uri()).with_api_key("secret"));
    assert_eq!(client.detect("Hallo").await.unwrap().language, "de");
}

#[tokio::test]
async fn test_detect_empty_list_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let err = client(&server).detect("???").await.unwrap_err();
    assert!(matches!(
        err,
        LanguageError::DetectionFailed(ServiceError::Malformed(_))
    ));
}

#[tokio::test]
async fn test_detect_garbage_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).detect("text").await.unwrap_err();
    assert!(matches!(
        err,
        LanguageError::DetectionFailed(ServiceError::Malformed(_))
    ));
}

#[tokio::test]
async fn test_detect_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "Invalid API key" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).detect("text").await.unwrap_err();
    assert_eq!(
        err,
        LanguageError::DetectionFailed(ServiceError::Status {
            status: 403,
            body: "Invalid API key".to_string(),
        })
    );
}

#[tokio::test]
async fn test_detect_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!([{ "language": "es" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).detect("Hola").await.unwrap_err();
    assert_eq!(
        err,
        LanguageError::DetectionFailed(ServiceError::Timeout(Duration::from_millis(300)))
    );
}

#[tokio::test]
async fn test_translate_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_json(json!({
            "q": "Hola",
            "source": "es",
            "target": "en",
            "format": "text"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hello" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).translate("Hola", "es", "en").await.unwrap();
    assert_eq!(result.text, "Hello");
}

#[tokio::test]
async fn test_translate_accepts_auto_source() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_json(json!({
            "q": "Ciao",
            "source": "auto",
            "target": "en",
            "format": "text"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hi" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).translate("Ciao", "auto", "en").await.unwrap();
    assert_eq!(result.text, "Hi");
}

#[tokio::test]
async fn test_translate_retries_once_after_timeout() {
    let server = MockServer::start().await;
    let request_count = Arc::new(AtomicUsize::new(0));
    let counter = request_count.clone();

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(move |_req: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(json!({ "translatedText": "too late" }))
            } else {
                ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hello" }))
            }
        })
        .mount(&server)
        .await;

    let result = client(&server).translate("Hola", "es", "en").await.unwrap();

    assert_eq!(result.text, "Hello");
    assert_eq!(request_count.load(Ordering::SeqCst), 2);
}

/// Read one HTTP request (headers plus Content-Length body).
async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}

/// Server that closes its first connection unanswered, then serves `body`.
async fn drop_first_connection(body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                drop(stream);
                continue;
            }
            read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{}", addr), accepted)
}

#[tokio::test]
async fn test_translate_retries_once_after_dropped_connection() {
    let (uri, accepted) = drop_first_connection(r#"{"translatedText":"Hello"}"#).await;
    let client = LibreTranslateClient::new(
        ServiceConfig::new(uri).with_retry_backoff(Duration::from_millis(200)),
    );

    let started = Instant::now();
    let result = client.translate("Hola", "es", "en").await.unwrap();

    assert_eq!(result.text, "Hello");
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_translate_waits_backoff_between_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hello" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LibreTranslateClient::new(ServiceConfig::new(server.uri()));
    let started = Instant::now();
    let result = client.translate("Hola", "es", "en").await.unwrap();

    assert_eq!(result.text, "Hello");
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_translate_gives_up_after_two_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server).translate("Hola", "es", "en").await.unwrap_err();

    assert_eq!(
        err,
        LanguageError::TranslationFailed(ServiceError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })
    );
    assert!(err.to_string().contains("overloaded"));
}

#[tokio::test]
async fn test_translate_malformed_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Hello" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).translate("Hola", "es", "en").await.unwrap_err();
    assert!(matches!(
        err,
        LanguageError::TranslationFailed(ServiceError::Malformed(_))
    ));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = LibreTranslateClient::new(
        ServiceConfig::new("http://127.0.0.1:9").with_retry_backoff(Duration::from_millis(10)),
    );

    let err = client.translate("Hola", "es", "en").await.unwrap_err();
    assert!(matches!(
        err,
        LanguageError::TranslationFailed(ServiceError::Transport(_))
    ));
}

#[test]
fn test_endpoint_joins_cleanly() {
    let config = ServiceConfig::new("https://libretranslate.com/");
    assert_eq!(config.endpoint("detect"), "https://libretranslate.com/detect");
    assert_eq!(ServiceConfig::default().endpoint("translate"), "https://libretranslate.com/translate");
}
