//! Passerelle Gemini réelle face à un serveur HTTP local aux réponses figées

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use diagelec::config::Config;
use diagelec::gateway::{AiGateway, GeminiGateway};
use diagelec_common::prompts::CHAT_FALLBACK_REPLY;
use diagelec_common::{Error, ImagePayload};

/// Sert une seule réponse puis rend la requête reçue (en-têtes + corps)
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..head_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= head_end + 4 + content_length
}

fn gateway_for(base_url: &str) -> GeminiGateway {
    let config = Config {
        api_key: Some("test-key".into()),
        timeout_seconds: 5,
        ..Config::default()
    };
    GeminiGateway::new(&config).unwrap().with_base_url(base_url)
}

fn photo() -> ImagePayload {
    ImagePayload::new("image/jpeg", "/9j/4AAQ").unwrap()
}

const NO_CANDIDATES: &str = r#"{"candidates":[]}"#;

const INCOMPLETE_ANALYSIS: &str =
    r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"compliant\":true}"}]}}]}"#;

const SAFETY_BLOCKED: &str = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;

const VALID_ANALYSIS: &str = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"equipmentDetected\":[\"Prise\"],\"compliant\":true,\"anomalies\":[],\"summary\":\"RAS\",\"technicalNotes\":\"\"}"}]}}]}"#;

const CHAT_REPLY: &str =
    r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Oui, 30mA type A."}]}}]}"#;

#[tokio::test]
async fn test_analysis_with_no_candidates_is_empty_response() {
    let (base_url, server) = serve_once("200 OK", NO_CANDIDATES).await;

    let result = gateway_for(&base_url).analyze_image(&photo()).await;
    assert!(matches!(result, Err(Error::EmptyResponse)));

    let request = server.await.unwrap();
    assert!(request.contains(":generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key:"));
    assert!(request.contains("inlineData"));
}

#[tokio::test]
async fn test_analysis_blocked_candidate_is_empty_response() {
    let (base_url, _server) = serve_once("200 OK", SAFETY_BLOCKED).await;

    let result = gateway_for(&base_url).analyze_image(&photo()).await;
    assert!(matches!(result, Err(Error::EmptyResponse)));
}

#[tokio::test]
async fn test_analysis_missing_fields_is_malformed() {
    let (base_url, _server) = serve_once("200 OK", INCOMPLETE_ANALYSIS).await;

    let result = gateway_for(&base_url).analyze_image(&photo()).await;
    match result {
        Err(Error::MalformedResponse(detail)) => assert!(detail.contains("equipmentDetected")),
        other => panic!("MalformedResponse attendu, obtenu {:?}", other),
    }
}

#[tokio::test]
async fn test_analysis_valid_payload() {
    let (base_url, _server) = serve_once("200 OK", VALID_ANALYSIS).await;

    let payload = gateway_for(&base_url).analyze_image(&photo()).await.unwrap();
    assert!(payload.compliant);
    assert_eq!(payload.equipment_detected, vec!["Prise".to_string()]);
    assert!(payload.anomalies.is_empty());
}

#[tokio::test]
async fn test_http_error_status_is_transport_error() {
    let (base_url, _server) =
        serve_once("403 Forbidden", r#"{"error":{"message":"API key not valid"}}"#).await;

    let result = gateway_for(&base_url).analyze_image(&photo()).await;
    match result {
        Err(Error::Transport(detail)) => {
            assert!(detail.contains("HTTP 403"));
            assert!(detail.contains("API key not valid"));
        }
        other => panic!("Transport attendu, obtenu {:?}", other),
    }
}

#[tokio::test]
async fn test_unreadable_envelope_is_transport_error() {
    let (base_url, _server) = serve_once("200 OK", "<html>proxy</html>").await;

    let result = gateway_for(&base_url).chat("Bonjour", &[]).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_chat_with_no_candidates_uses_fallback() {
    let (base_url, _server) = serve_once("200 OK", NO_CANDIDATES).await;

    let reply = gateway_for(&base_url).chat("Bonjour", &[]).await.unwrap();
    assert_eq!(reply, CHAT_FALLBACK_REPLY);
}

#[tokio::test]
async fn test_chat_reply_text() {
    let (base_url, server) = serve_once("200 OK", CHAT_REPLY).await;

    let reply = gateway_for(&base_url)
        .chat("Faut-il un différentiel 30mA ?", &[])
        .await
        .unwrap();
    assert_eq!(reply, "Oui, 30mA type A.");

    let request = server.await.unwrap();
    assert!(request.contains("systemInstruction"));
    assert!(request.contains("Faut-il un diff"));
}
