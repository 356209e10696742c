//! En-tête : titre et bouton d'impression

use leptos::prelude::*;
use diagelec_common::Session;

#[component]
pub fn Header<F>(session: RwSignal<Session>, on_print: F) -> impl IntoView
where
    F: Fn(()) + 'static + Copy + Send + Sync,
{
    // l'impression n'a de sens que sur l'écran rapport, avec au moins un rapport
    let can_print = move || session.with(|s| s.can_export());

    view! {
        <header class="header no-print">
            <div class="brand">
                <span class="brand-icon">"⚡"</span>
                <div>
                    <h1>"DiagElec AI"</h1>
                    <p class="subtitle">"NF C 16-600"</p>
                </div>
            </div>
            <Show when=can_print>
                <button class="btn btn-icon" title="Imprimer" on:click=move |_| on_print(())>
                    "🖨"
                </button>
            </Show>
        </header>
    }
}
