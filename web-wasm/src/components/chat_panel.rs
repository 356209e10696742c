//! Assistant NF C 16-600

use leptos::prelude::*;
use diagelec_common::{Role, Session};

use crate::format::time_label;

#[component]
pub fn ChatPanel<F>(session: RwSignal<Session>, on_send: F) -> impl IntoView
where
    F: Fn(String) + 'static + Copy + Send + Sync,
{
    let (draft, set_draft) = signal(String::new());
    let is_pending = move || session.with(|s| s.transcript().is_pending());

    let submit = move || {
        let text = draft.get_untracked();
        if text.trim().is_empty() || is_pending() {
            return;
        }
        set_draft.set(String::new());
        on_send(text);
    };

    view! {
        <section class="chat-panel">
            <div class="messages">
                <For
                    each=move || session.with(|s| s.transcript().messages().to_vec())
                    key=|message| message.id.clone()
                    children=|message| {
                        let class = match message.role {
                            Role::User => "bubble user",
                            Role::Model => "bubble model",
                        };
                        let time = time_label(message.timestamp);
                        view! {
                            <div class=class>
                                {message.text}
                                <span class="bubble-time">{time}</span>
                            </div>
                        }
                    }
                />
                <Show when=is_pending>
                    <div class="bubble model typing">"..."</div>
                </Show>
            </div>

            <form
                class="chat-input no-print"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <input
                    type="text"
                    placeholder="Posez votre question..."
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || is_pending() || draft.get().trim().is_empty()
                >
                    "Envoyer"
                </button>
            </form>
        </section>
    }
}
