//! Consulta-results page: one aggregate row per (correio, base) over
//! the full motorista collection.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use contracts::error::ApiError;
use contracts::tables::{DatasResponse, DeletedResponse, OrderDoc, UpdatedResponse};

use crate::pipeline::filter::ColumnFilters;
use crate::pipeline::store::{CacheKey, RequestGeneration, ResultsCache};
use crate::shared::api::{self, TableId};
use crate::shared::auth::{self, AppContext};
use crate::shared::clipboard;
use crate::shared::components::column_filter_dropdown::ColumnFilterDropdown;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::date_filter_select::DateFilterSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::upload_button::UploadButton;
use crate::shared::notifications::NotificationService;
use crate::shared::storage;
use crate::pipeline::filter::unique_column_values;

use super::derive::{chunk_numeros, derive, numeros_nao_entregues, ResultadosDerived};
use super::fetch_all_motorista;

const DATAS_STORAGE_KEY: &str = "resultados_datas";

const ROWS_PER_PAGE_OPTIONS: &[u32] = &[10, 25, 50, 100, 200];

#[component]
pub fn ResultadosPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");
    let notify = use_context::<NotificationService>().unwrap_or_default();
    let cache = use_context::<ResultsCache>().unwrap_or_default();
    let navigate = use_navigate();

    let docs = RwSignal::new(Vec::<OrderDoc>::new());
    let search = RwSignal::new(String::new());
    let filters = RwSignal::new(ColumnFilters::new());
    let page = RwSignal::new(1usize);
    let rows_per_page = RwSignal::new(ctx.config().rows_per_page().min(200));
    let selected_datas =
        RwSignal::new(storage::load_json::<Vec<String>>(DATAS_STORAGE_KEY).unwrap_or_default());
    let datas_options = RwSignal::new(Vec::<String>::new());
    let loading = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let reload = RwSignal::new(0u32);
    let open_filter_col = RwSignal::new(None::<usize>);
    let show_chunks = RwSignal::new(false);

    let generation = RequestGeneration::new();

    Effect::new(move |_| {
        let Ok(token) = ctx.require_token() else {
            return;
        };
        spawn_local(async move {
            match fetch_datas(&token).await {
                Ok(response) => datas_options.set(response.datas),
                Err(err) => ctx.handle_api_error(&err),
            }
        });
    });

    // full fetch; the cache only answers for the unfiltered default
    // view, and a delete/update bumps `reload` after invalidating it
    {
        let generation = generation.clone();
        let cache = cache.clone();
        Effect::new(move |_| {
            reload.track();
            let Ok(token) = ctx.require_token() else {
                return;
            };
            let datas = selected_datas.get();
            let incluir = ctx.config().incluir_nao_entregues_outras_datas;
            let cacheable = datas.is_empty() && !incluir;
            let key = CacheKey {
                token: token.clone(),
                datas: datas.clone(),
                incluir_nao_entregues: incluir,
            };
            if cacheable {
                if let Some(cached) = cache.get(&key) {
                    docs.set(cached.docs);
                    page.set(1);
                    return;
                }
            }
            let gen_number = generation.begin();
            let generation = generation.clone();
            let cache = cache.clone();
            loading.set(true);
            spawn_local(async move {
                let result = fetch_all_motorista(&token, &datas, incluir).await;
                if !generation.is_current(gen_number) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok((fetched, total)) => {
                        if cacheable {
                            cache.put(key, fetched.clone(), total);
                        }
                        docs.set(fetched);
                        page.set(1);
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

    let derived = Memo::new(move |_| -> ResultadosDerived {
        derive(
            &docs.get(),
            &search.get(),
            &filters.get(),
            page.get(),
            rows_per_page.get(),
        )
    });

    let numeros = Memo::new(move |_| numeros_nao_entregues(&docs.get()));

    let dropdown_values = Memo::new(move |_| {
        let Some(col) = open_filter_col.get() else {
            return Vec::new();
        };
        unique_column_values(&derived.get().grouped, col)
    });

    let copy_chunk = move |chunk: Vec<String>| {
        clipboard::copy_text(&chunk.join("\n"), move |ok| {
            if ok {
                notify.success("Números copiados.");
            } else {
                notify.error("Falha ao copiar para a área de transferência.");
            }
        });
    };

    let copy_nao_entregues = move |_| {
        let chunks = chunk_numeros(&numeros.get_untracked());
        match chunks.len() {
            0 => notify.info("Nenhum número não entregue."),
            1 => copy_chunk(chunks.into_iter().next().unwrap_or_default()),
            _ => show_chunks.update(|open| *open = !*open),
        }
    };

    let run_update_upload = {
        let cache = cache.clone();
        move |file: web_sys::File| {
            let Ok(token) = ctx.require_token() else {
                notify.error(ApiError::Unauthorized.to_string());
                return;
            };
            let cache = cache.clone();
            busy.set(true);
            spawn_local(async move {
                let result = upload_atualizar(&token, &file).await;
                busy.set(false);
                match result {
                    Ok(response) => {
                        notify.success(format!(
                            "{} atualizadas, {} inseridas.",
                            response.updated, response.inserted
                        ));
                        cache.invalidate();
                        reload.update(|n| *n += 1);
                    }
                    Err(err) => {
                        ctx.handle_api_error(&err);
                        notify.error(err.to_string());
                    }
                }
            });
        }
    };

    let delete_all = {
        let cache = cache.clone();
        move |_| {
            let Ok(token) = ctx.require_token() else {
                return;
            };
            let cache = cache.clone();
            busy.set(true);
            spawn_local(async move {
                let result = delete_motorista(&token).await;
                busy.set(false);
                match result {
                    Ok(response) => {
                        notify.success(format!("{} pedidos removidos.", response.deleted));
                        cache.invalidate();
                        reload.update(|n| *n += 1);
                    }
                    Err(err) => {
                        ctx.handle_api_error(&err);
                        notify.error(err.to_string());
                    }
                }
            });
        }
    };

    let toggle_incluir = move |_| {
        let Ok(token) = ctx.require_token() else {
            return;
        };
        let mut config = ctx.config();
        config.incluir_nao_entregues_outras_datas = !config.incluir_nao_entregues_outras_datas;
        spawn_local(async move {
            match auth::update_config(&token, config).await {
                Ok(stored) => {
                    ctx.set_config(stored);
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    let open_evolucao = move |row_index: usize| {
        let d = derived.get_untracked();
        let Some(row) = d.filtered.get(d.start + row_index) else {
            return;
        };
        let url = format!(
            "/evolucao?correio={}&base={}&view=motorista",
            urlencoding::encode(&row.correio),
            urlencoding::encode(&row.base)
        );
        navigate(&url, NavigateOptions::default());
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 16px;">
            <h2>"Resultados da consulta"</h2>

            <div style="display: flex; align-items: center; gap: 8px; flex-wrap: wrap;">
                <input
                    type="text"
                    placeholder="Pesquisar motorista..."
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
                <UploadButton
                    label="Atualizar dados"
                    disabled=Signal::derive(move || busy.get())
                    on_file=Callback::new(run_update_upload)
                />
                <button on:click=delete_all disabled=move || busy.get()>
                    "Apagar pedidos"
                </button>
                <button on:click=copy_nao_entregues>
                    {move || format!("Copiar não entregues ({})", numeros.get().len())}
                </button>
                <label style="display: flex; align-items: center; gap: 4px;">
                    <input
                        type="checkbox"
                        prop:checked=move || ctx.config().incluir_nao_entregues_outras_datas
                        on:change=toggle_incluir
                    />
                    "Incluir não entregues de outras datas"
                </label>
            </div>

            {move || {
                show_chunks
                    .get()
                    .then(|| {
                        let chunks = chunk_numeros(&numeros.get());
                        view! {
                            <div style="display: flex; gap: 6px; flex-wrap: wrap;">
                                {chunks
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, chunk)| {
                                        let label = format!(
                                            "Bloco {} ({})",
                                            i + 1,
                                            chunk.len(),
                                        );
                                        view! {
                                            <button on:click=move |_| copy_chunk(
                                                chunk.clone(),
                                            )>{label}</button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}

            <DateFilterSelect
                datas=Signal::derive(move || datas_options.get())
                selected=Signal::derive(move || selected_datas.get())
                on_change=Callback::new(move |datas: Vec<String>| {
                    storage::save_json(DATAS_STORAGE_KEY, &datas);
                    selected_datas.set(datas);
                })
            />

            {move || loading.get().then(|| view! { <p>"A carregar pedidos…"</p> })}

            <div style="position: relative;">
                <DataTable
                    table=Signal::derive(move || derived.get().table)
                    start=Signal::derive(move || derived.get().start)
                    active_filter_columns=Signal::derive(move || {
                        filters.get().active_columns()
                    })
                    on_header_click=Callback::new(move |col| {
                        open_filter_col
                            .update(|open| {
                                *open = if *open == Some(col) { None } else { Some(col) };
                            });
                    })
                    on_row_click=Callback::new(open_evolucao)
                />
                {move || {
                    open_filter_col
                        .get()
                        .map(|col| {
                            view! {
                                <ColumnFilterDropdown
                                    values=Signal::derive(move || dropdown_values.get())
                                    selected=Signal::derive(move || {
                                        filters.get().values(col).to_vec()
                                    })
                                    on_toggle=Callback::new(move |value: String| {
                                        filters.update(|f| f.toggle(col, &value));
                                        page.set(1);
                                    })
                                    on_clear=Callback::new(move |_| {
                                        filters.update(|f| f.clear_column(col));
                                        page.set(1);
                                    })
                                    on_close=Callback::new(move |_| open_filter_col.set(None))
                                />
                            }
                        })
                }}
            </div>

            <PaginationControls
                current_page=Signal::derive(move || derived.get().current_page)
                total_pages=Signal::derive(move || derived.get().total_pages)
                total_count=Signal::derive(move || derived.get().total_filtered)
                rows_per_page=Signal::derive(move || rows_per_page.get())
                on_page_change=Callback::new(move |p| page.set(p))
                on_rows_per_page_change=Callback::new(move |value| {
                    rows_per_page.set(value);
                    page.set(1);
                })
                rows_per_page_options=ROWS_PER_PAGE_OPTIONS.to_vec()
            />
        </div>
    }
}

async fn fetch_datas(token: &str) -> Result<DatasResponse, ApiError> {
    api::get_json(
        "/api/resultados-consulta/motorista/datas",
        token,
        Some(TableId::ResultadosConsulta),
    )
    .await
}

async fn upload_atualizar(token: &str, file: &web_sys::File) -> Result<UpdatedResponse, ApiError> {
    api::upload_xlsx(
        "/api/resultados-consulta/motorista/atualizar",
        token,
        TableId::ResultadosConsulta,
        file,
    )
    .await
}

async fn delete_motorista(token: &str) -> Result<DeletedResponse, ApiError> {
    api::delete_json(
        "/api/resultados-consulta/motorista",
        token,
        Some(TableId::ResultadosConsulta),
    )
    .await
}
