//! Réglage de la clé d'API

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(api_key: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="settings-panel no-print">
            <div class="form-group">
                <label for="api-key">"Clé API Gemini"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="Saisir la clé API..."
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        api_key.set(event_target_value(&ev));
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "Obtenir une clé →"
                </a>
            </div>
        </div>
    }
}
