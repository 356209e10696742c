use leptos::prelude::*;
use diagelec_common::prompts::{REPORT_SUBTITLE, REPORT_TITLE};
use diagelec_common::report::EMPTY_REPORTS_MESSAGE;
use diagelec_common::{Session, ViewState};

use super::report_card::ReportCardView;
use crate::format::today_label;

#[component]
pub fn ReportView(session: RwSignal<Session>) -> impl IntoView {
    let is_empty = move || session.with(|s| s.reports().is_empty());

    view! {
        <section class="report-view">
            <div class="report-header no-print">
                <h2>"Rapport de Diagnostic"</h2>
                <span class="date-badge">{today_label()}</span>
            </div>
            <div class="print-header print-only">
                <h1>{REPORT_TITLE}</h1>
                <p>{REPORT_SUBTITLE}</p>
            </div>
            <Show
                when=move || !is_empty()
                fallback=move || view! {
                    <div class="empty-state">
                        <p>{EMPTY_REPORTS_MESSAGE}</p>
                        <button
                            class="btn btn-primary"
                            on:click=move |_| session.update(|s| s.navigate(ViewState::Scan))
                        >
                            "Commencer"
                        </button>
                    </div>
                }
            >
                <For
                    each=move || session.with(|s| s.reports().to_vec())
                    key=|report| report.id.clone()
                    children=move |report| view! { <ReportCardView report=report session=session /> }
                />
            </Show>
        </section>
    }
}
