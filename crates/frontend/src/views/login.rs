//! Login form; on success the token and profile land in `AppContext`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::auth::{self, AppContext};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");

    let nome = RwSignal::new(String::new());
    let senha = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let nome_value = nome.get_untracked();
        let senha_value = senha.get_untracked();
        if nome_value.trim().is_empty() || senha_value.is_empty() {
            error.set(Some("Preencha nome e senha.".to_string()));
            return;
        }
        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            let result = auth::login(&nome_value, &senha_value).await;
            submitting.set(false);
            match result {
                Ok((token, me)) => ctx.set_session(token, me),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <div style="min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #f1f5f9;">
            <form
                on:submit=submit
                style="background: white; border: 1px solid #e2e8f0; border-radius: 8px; padding: 32px; display: flex; flex-direction: column; gap: 12px; min-width: 320px;"
            >
                <h2 style="margin: 0;">"Painel de entregas"</h2>
                <input
                    type="text"
                    placeholder="Nome"
                    prop:value=move || nome.get()
                    on:input=move |ev| nome.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Senha"
                    prop:value=move || senha.get()
                    on:input=move |ev| senha.set(event_target_value(&ev))
                />
                {move || {
                    error
                        .get()
                        .map(|message| {
                            view! { <p style="color: #dc2626; margin: 0;">{message}</p> }
                        })
                }}
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "A entrar…" } else { "Entrar" }}
                </button>
            </form>
        </div>
    }
}
