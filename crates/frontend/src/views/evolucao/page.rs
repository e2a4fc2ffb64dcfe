//! Drill-down page for one driver or one base, reached from the
//! consulta-results table. Identity comes in through query params.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use contracts::tables::OrderDoc;

use crate::pipeline::store::RequestGeneration;
use crate::shared::auth::AppContext;
use crate::shared::notifications::NotificationService;
use crate::views::resultados::fetch_all_motorista;

use super::stats::{filter_docs, performance_por_motorista, stats};

#[component]
pub fn EvolucaoPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");
    let notify = use_context::<NotificationService>().unwrap_or_default();
    let navigate = use_navigate();
    let query = use_query_map();

    let correio = Memo::new(move |_| query.read().get("correio").unwrap_or_default());
    let base = Memo::new(move |_| query.read().get("base").unwrap_or_default());
    let view_base = Memo::new(move |_| query.read().get("view").as_deref() == Some("base"));

    let docs = RwSignal::new(Vec::<OrderDoc>::new());
    let loading = RwSignal::new(false);

    let generation = RequestGeneration::new();

    // a missing base means a direct visit without context; go back
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if base.get().is_empty() {
                navigate("/resultados-consulta", NavigateOptions::default());
            }
        });
    }

    {
        let generation = generation.clone();
        Effect::new(move |_| {
            let Ok(token) = ctx.require_token() else {
                return;
            };
            let correio = correio.get();
            let base = base.get();
            let view_base = view_base.get();
            if base.is_empty() {
                return;
            }
            let gen_number = generation.begin();
            let generation = generation.clone();
            loading.set(true);
            spawn_local(async move {
                let result = fetch_all_motorista(&token, &[], true).await;
                if !generation.is_current(gen_number) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok((all, _total)) => {
                        docs.set(filter_docs(&all, &correio, &base, view_base));
                    }
                    Err(err) => {
                        ctx.handle_api_error(&err);
                        notify.error(err.to_string());
                        docs.set(Vec::new());
                    }
                }
            });
        });
    }

    let resumo = Memo::new(move |_| stats(&docs.get()));
    let performance = Memo::new(move |_| performance_por_motorista(&docs.get()));

    let title = move || {
        if view_base.get() {
            "Performance da base".to_string()
        } else {
            "Evolução do motorista".to_string()
        }
    };
    let subtitle = move || {
        if view_base.get() || correio.get().is_empty() {
            base.get()
        } else {
            format!("{} — {}", correio.get(), base.get())
        }
    };

    let card = |label: &'static str, value: Box<dyn Fn() -> String + Send + Sync>| {
        view! {
            <div style="border: 1px solid #e0e0e0; border-radius: 6px; padding: 12px 16px; min-width: 120px;">
                <div style="color: #64748b; font-size: 0.8rem;">{label}</div>
                <div style="font-size: 1.4rem; font-weight: 700;">{move || value()}</div>
            </div>
        }
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 16px;">
            <div>
                <h2>{title}</h2>
                <p style="color: #64748b;">{subtitle}</p>
            </div>

            {move || loading.get().then(|| view! { <p>"A carregar evolução…"</p> })}

            <div style="display: flex; gap: 12px; flex-wrap: wrap;">
                {card("Total", Box::new(move || resumo.get().total.to_string()))}
                {card(
                    "Entregues",
                    Box::new(move || {
                        let s = resumo.get();
                        format!("{} ({}%)", s.entregues, s.pct_entregues)
                    }),
                )}
                {card(
                    "Não entregues",
                    Box::new(move || {
                        let s = resumo.get();
                        format!("{} ({}%)", s.nao_entregues, s.pct_nao_entregues)
                    }),
                )}
                {card("Outros", Box::new(move || resumo.get().outros.to_string()))}
            </div>

            <h3>"Performance por motorista"</h3>
            <table style="border-collapse: collapse; font-size: 0.875rem; max-width: 640px;">
                <thead>
                    <tr>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Motorista"</th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Entregues"</th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                            "Não entregues"
                        </th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Outros"</th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Total"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        performance
                            .get()
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <tr>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {row.motorista.clone()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {row.entregues.to_string()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {row.nao_entregues.to_string()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {row.outros.to_string()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {row.total().to_string()}
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
