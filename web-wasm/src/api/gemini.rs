//! Appels Gemini depuis le navigateur (fetch)
//!
//! Le format des requêtes vient de `diagelec_common::gemini` ; ce module ne
//! fait que le transport, borné par un délai.

use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use diagelec_common::gemini::{
    build_default_analysis_request, build_chat_request, generate_content_url,
    GenerateContentRequest, GenerateContentResponse, DEFAULT_MODEL, GEMINI_API_BASE_URL,
};
use diagelec_common::prompts::CHAT_FALLBACK_REPLY;
use diagelec_common::{
    parse_analysis_response, AnalysisPayload, ChatTurn, Error, ImagePayload, Result,
};

/// Délai maximal d'un appel (ms)
pub const REQUEST_TIMEOUT_MS: u32 = 60_000;

fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}

async fn fetch_text(api_key: &str, body: String) -> std::result::Result<(u16, String), JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let url = generate_content_url(GEMINI_API_BASE_URL, DEFAULT_MODEL);
    let request = Request::new_with_str_and_init(&url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    request.headers().set("x-goog-api-key", api_key)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window indisponible"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

/// Appel generateContent (commun aux deux opérations)
async fn call_gemini_api(
    api_key: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse> {
    if api_key.trim().is_empty() {
        return Err(Error::Transport("clé API absente".into()));
    }
    let body = serde_json::to_string(request)?;

    let fetch = Box::pin(fetch_text(api_key, body));
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);

    let (status, text) = match select(fetch, timeout).await {
        Either::Left((result, _)) => result.map_err(js_error)?,
        Either::Right(_) => {
            return Err(Error::Transport(format!(
                "délai dépassé ({}s)",
                REQUEST_TIMEOUT_MS / 1000
            )))
        }
    };

    if !(200..300).contains(&status) {
        web_sys::console::warn_1(&format!("Gemini HTTP {}", status).into());
        return Err(Error::Transport(format!("HTTP {}", status)));
    }

    serde_json::from_str(&text)
        .map_err(|e| Error::Transport(format!("enveloppe de réponse illisible: {}", e)))
}

/// Analyse d'une photo
pub async fn analyze_image(api_key: &str, image: &ImagePayload) -> Result<AnalysisPayload> {
    let request = build_default_analysis_request(image);
    let response = call_gemini_api(api_key, &request).await?;
    let text = response.text().ok_or(Error::EmptyResponse)?;
    parse_analysis_response(&text)
}

/// Question à l'assistant
pub async fn chat(api_key: &str, message: &str, history: &[ChatTurn]) -> Result<String> {
    let request = build_chat_request(message, history);
    let response = call_gemini_api(api_key, &request).await?;
    Ok(response
        .text()
        .unwrap_or_else(|| CHAT_FALLBACK_REPLY.to_string()))
}
