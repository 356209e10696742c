//! Composant racine : état de session et appels à l'IA

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::gemini;
use crate::components::{
    chat_panel::ChatPanel, error_banner::ErrorBanner, header::Header,
    loading_overlay::LoadingOverlay, nav_bar::NavBar, report_view::ReportView,
    scan_view::ScanView, settings_panel::SettingsPanel,
};
use diagelec_common::{ImagePayload, Session, ViewState};

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new(now_ms()));
    // clé fournie au build, modifiable dans les réglages
    let api_key = RwSignal::new(option_env!("GEMINI_API_KEY").unwrap_or_default().to_string());

    // photo choisie : une seule analyse à la fois
    let on_image = move |data_url: String| {
        let image = match ImagePayload::from_data_url(&data_url) {
            Ok(image) => image,
            Err(e) => {
                web_sys::console::warn_1(&format!("Image ignorée: {}", e).into());
                return;
            }
        };
        if !matches!(session.try_update(|s| s.begin_analysis()), Some(Ok(()))) {
            return;
        }

        let key = api_key.get_untracked();
        spawn_local(async move {
            let outcome = gemini::analyze_image(&key, &image).await;
            if let Err(e) = &outcome {
                web_sys::console::error_1(&format!("Analyse échouée: {}", e).into());
            }
            session.update(|s| {
                let _ = s.complete_analysis(outcome, data_url, None, now_ms());
            });
        });
    };

    let on_send = move |text: String| {
        let pending = session
            .try_update(|s| s.transcript_mut().begin_send(&text, now_ms()).ok())
            .flatten();
        let Some(pending) = pending else {
            return;
        };

        let key = api_key.get_untracked();
        spawn_local(async move {
            let outcome = gemini::chat(&key, &pending.message, &pending.history).await;
            session.update(|s| {
                s.transcript_mut().finish_send(outcome, now_ms());
            });
        });
    };

    let on_print = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    };

    let current_view = Memo::new(move |_| session.with(|s| s.view().canonical()));

    view! {
        <div class="app">
            <Header session=session on_print=on_print />
            <ErrorBanner session=session />

            <main class="content">
                {move || match current_view.get() {
                    ViewState::Scan => view! {
                        <div>
                            <ScanView session=session on_image=on_image />
                            <SettingsPanel api_key=api_key />
                        </div>
                    }
                    .into_any(),
                    ViewState::Chat => view! { <ChatPanel session=session on_send=on_send /> }.into_any(),
                    _ => view! { <ReportView session=session /> }.into_any(),
                }}
            </main>

            <LoadingOverlay session=session />
            <NavBar session=session />
        </div>
    }
}
