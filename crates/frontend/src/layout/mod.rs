//! Application shell: top bar with navigation and session controls,
//! content below, notification tray on top of everything.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::auth::AppContext;
use crate::shared::notifications::NotificationTray;

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");

    let user_name = move || {
        ctx.user
            .with(|u| u.as_ref().map(|me| me.nome.clone()))
            .unwrap_or_default()
    };

    view! {
        <div style="min-height: 100vh; display: flex; flex-direction: column; background: #f8fafc;">
            <header style="display: flex; align-items: center; gap: 16px; padding: 10px 20px; background: #0f172a; color: white;">
                <span style="font-weight: 700;">"Painel de entregas"</span>
                <nav style="display: flex; gap: 12px;">
                    <A href="/">"SLA"</A>
                    <A href="/resultados-consulta">"Resultados"</A>
                    <A href="/lista-telefones">"Telefones"</A>
                </nav>
                <span style="margin-left: auto; color: #94a3b8;">{user_name}</span>
                <button on:click=move |_| ctx.logout()>"Sair"</button>
            </header>
            <main style="flex: 1; padding: 20px;">{children()}</main>
            <NotificationTray />
        </div>
    }
}
