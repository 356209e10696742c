//! Voile d'attente pendant une analyse

use leptos::prelude::*;
use diagelec_common::Session;

#[component]
pub fn LoadingOverlay(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <Show when=move || session.with(|s| s.is_analyzing())>
            <div class="loading-overlay no-print">
                <div class="spinner" />
                <p class="loading-text">"Analyse NF C 16-600 en cours..."</p>
                <p class="text-muted">"Identification des équipements et des anomalies"</p>
            </div>
        </Show>
    }
}
