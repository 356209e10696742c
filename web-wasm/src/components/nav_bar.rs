//! Barre de navigation basse

use leptos::prelude::*;
use diagelec_common::{Session, ViewState};

#[component]
pub fn NavBar(session: RwSignal<Session>) -> impl IntoView {
    let current = Memo::new(move |_| session.with(|s| s.view().canonical()));

    view! {
        <nav class="nav-bar no-print">
            {ViewState::NAVIGABLE
                .into_iter()
                .map(|target| {
                    view! {
                        <button
                            class=move || {
                                if current.get() == target { "nav-item active" } else { "nav-item" }
                            }
                            on:click=move |_| session.update(|s| s.navigate(target))
                        >
                            <span class="nav-icon">{target.icon()}</span>
                            <span class="nav-label">{target.label()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
