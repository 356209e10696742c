use leptos::prelude::*;
use diagelec_common::Session;

#[component]
pub fn ErrorBanner(session: RwSignal<Session>) -> impl IntoView {
    let message = move || session.with(|s| s.error().map(str::to_string));

    view! {
        <Show when=move || message().is_some()>
            <div class="error-banner no-print" role="alert">
                <span>{move || message().unwrap_or_default()}</span>
                <button
                    class="btn btn-small"
                    on:click=move |_| session.update(|s| s.dismiss_error())
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}
