//! Écran d'accueil : prise de photo et statistiques

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

use diagelec_common::Session;

#[component]
pub fn ScanView<F>(session: RwSignal<Session>, on_image: F) -> impl IntoView
where
    F: Fn(String) + 'static + Copy + Send + Sync,
{
    let report_count = move || session.with(|s| s.report_count());
    let anomaly_count = move || session.with(|s| s.total_anomalies());
    let is_analyzing = move || session.with(|s| s.is_analyzing());

    let on_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        // aucune sélection : rien à faire
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            read_file(file, on_image);
        }
        input.set_value("");
    };

    view! {
        <section class="scan-view">
            <div class="stats">
                <div class="stat">
                    <span class="stat-value">{report_count}</span>
                    <span class="stat-label">"Rapports"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{anomaly_count}</span>
                    <span class="stat-label">"Anomalies"</span>
                </div>
            </div>

            <label class=move || if is_analyzing() { "capture-button disabled" } else { "capture-button" }>
                <span class="capture-icon">"📷"</span>
                <span>"Scanner une installation"</span>
                <input
                    type="file"
                    accept="image/*"
                    capture="environment"
                    class="hidden"
                    disabled=is_analyzing
                    on:change=on_change
                />
            </label>
            <p class="text-muted">"Tableau, prise, salle de bain : l'IA relève les anomalies visibles."</p>
        </section>
    }
}

fn read_file<F>(file: File, on_image: F)
where
    F: Fn(String) + 'static,
{
    let Ok(reader) = FileReader::new() else {
        web_sys::console::warn_1(&"FileReader indisponible".into());
        return;
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
            on_image(data_url);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    let _ = reader.read_as_data_url(&file);
}
