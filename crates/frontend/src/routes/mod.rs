//! Route table behind the session gate: without a token only the
//! login page renders.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::layout::Shell;
use crate::shared::auth::AppContext;
use crate::views::evolucao::EvolucaoPage;
use crate::views::login::LoginPage;
use crate::views::resultados::ResultadosPage;
use crate::views::sla::SlaPage;
use crate::views::telefones::TelefonesPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");

    view! {
        <Show when=move || ctx.is_logged_in() fallback=|| view! { <LoginPage /> }>
            <Router>
                <Shell>
                    <Routes fallback=|| view! { <p>"Página não encontrada."</p> }>
                        <Route path=path!("/") view=SlaPage />
                        <Route path=path!("/resultados-consulta") view=ResultadosPage />
                        <Route path=path!("/evolucao") view=EvolucaoPage />
                        <Route path=path!("/lista-telefones") view=TelefonesPage />
                    </Routes>
                </Shell>
            </Router>
        </Show>
    }
}
