//! Carte d'un rapport d'analyse

use leptos::prelude::*;
use diagelec_common::{AnalysisResult, ReportCard, Session};

#[component]
pub fn ReportCardView(report: AnalysisResult, session: RwSignal<Session>) -> impl IntoView {
    let card = ReportCard::new(&report);
    let badge_class = if card.compliant { "badge ok" } else { "badge ko" };
    let badge = card.badge;
    let captured_at = card.captured_at.map(str::to_string);
    let summary = card.summary.to_string();
    let technical_notes = card.technical_notes.to_string();

    let equipment = card
        .equipment
        .iter()
        .map(|name| view! { <span class="tag">{name.clone()}</span> })
        .collect_view();

    let has_anomalies = !card.anomalies.is_empty();
    let anomalies = card
        .anomalies
        .iter()
        .map(|a| {
            let class = format!("anomaly {}", a.severity.css_class());
            view! {
                <li class=class>
                    <div class="anomaly-head">
                        <span class="marker">{a.marker}</span>
                        <strong>{a.severity.as_str()}</strong>
                        <span class="code">{a.code.to_string()}</span>
                    </div>
                    <p>{a.description.to_string()}</p>
                    <p class="reco">"💡 Reco: " {a.recommendation.to_string()}</p>
                </li>
            }
        })
        .collect_view();

    let id = report.id.clone();
    let on_delete = move |_| {
        session.update(|s| {
            s.delete_report(&id);
        });
    };

    view! {
        <article class="card">
            <div class="photo">
                <img src=report.image_url.clone() alt="Installation électrique" />
                <span class=badge_class>{badge}</span>
            </div>
            {captured_at.map(|date| view! { <p class="text-muted">"Prise de vue : " {date}</p> })}

            <h3>"Équipements détectés"</h3>
            <div class="tags">{equipment}</div>

            {has_anomalies.then(|| view! { <h3>"Anomalies NF C 16-600"</h3> })}
            <ul class="anomalies">{anomalies}</ul>

            <h3>"Résumé pour Rapport (à copier)"</h3>
            <pre class="summary">{summary}</pre>

            {(!technical_notes.trim().is_empty())
                .then(|| view! { <p class="notes">{technical_notes.clone()}</p> })}

            <button class="btn btn-danger btn-small no-print" on:click=on_delete>
                "Supprimer"
            </button>
        </article>
    }
}
