//! SLA page: delivery performance per driver and per base, fed by the
//! imported SLA sheet.

use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::config::VALID_ROWS_PER_PAGE;
use contracts::error::ApiError;
use contracts::sla::{IndicadoresResponse, MotoristaIndicador};
use contracts::tables::{DatasResponse, DeletedResponse, SavedResponse, TablePage, UpdatedResponse};

use crate::pipeline::filter::{unique_column_values, ColumnFilters};
use crate::pipeline::group::percentual_sla;
use crate::pipeline::paginate::total_pages;
use crate::pipeline::sort::{SortState, SORT_OPTIONS};
use crate::pipeline::store::RequestGeneration;
use crate::pipeline::view::{format_pct, motoristas_to_table};
use crate::shared::api::{self, TableId};
use crate::shared::auth::{self, AppContext};
use crate::shared::components::column_filter_dropdown::ColumnFilterDropdown;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::date_filter_select::DateFilterSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::upload_button::UploadButton;
use crate::shared::notifications::NotificationService;
use crate::shared::{export, storage};

use super::derive::{choose_base, cidades_options, derive, SlaDerived, BASE_COL};

const SORT_STORAGE_KEY: &str = "sla_sort";

const BASE_FILTER_STORAGE_KEY: &str = "sla_base_filter";

fn today_date_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[component]
pub fn SlaPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");
    let notify = use_context::<NotificationService>().unwrap_or_default();

    // filter/sort/page state
    let selected_datas = RwSignal::new(Vec::<String>::new());
    let periodo = RwSignal::new(String::new());
    let selected_cidades = RwSignal::new(Vec::<String>::new());
    let filters = RwSignal::new({
        let mut initial = ColumnFilters::new();
        if let Some(base) = storage::get_string(BASE_FILTER_STORAGE_KEY) {
            initial.select_only(BASE_COL, &base);
        }
        initial
    });
    let sort = RwSignal::new(
        storage::get_string(SORT_STORAGE_KEY)
            .map(|raw| SortState::from_json(&raw))
            .unwrap_or_default(),
    );
    let page = RwSignal::new(1usize);
    let rows_per_page = RwSignal::new(ctx.config().rows_per_page());

    // fetched state
    let por_motorista = RwSignal::new(Vec::<MotoristaIndicador>::new());
    let datas_options = RwSignal::new(Vec::<String>::new());
    let raw_page = RwSignal::new(TablePage::default());
    let raw_page_num = RwSignal::new(1usize);
    let loading = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let reload = RwSignal::new(0u32);
    let open_filter_col = RwSignal::new(None::<usize>);

    let indic_gen = RequestGeneration::new();
    let tabela_gen = RequestGeneration::new();

    // available import dates
    Effect::new(move |_| {
        reload.track();
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

    // indicators follow every upstream input; stale responses are
    // dropped by generation
    {
        let indic_gen = indic_gen.clone();
        Effect::new(move |_| {
            reload.track();
            let Ok(token) = ctx.require_token() else {
                return;
            };
            let datas = selected_datas.get();
            let periodo = periodo.get();
            let cidades = selected_cidades.get();
            let bases = ctx.config().bases_sla;
            let generation = indic_gen.begin();
            let indic_gen = indic_gen.clone();
            loading.set(true);
            spawn_local(async move {
                let result = fetch_indicadores(&token, &datas, &bases, &periodo, &cidades).await;
                if !indic_gen.is_current(generation) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(response) => {
                        por_motorista.set(response.por_motorista);
                        page.set(1);
                    }
                    Err(err) => {
                        ctx.handle_api_error(&err);
                        notify.error(err.to_string());
                        por_motorista.set(Vec::new());
                    }
                }
            });
        });
    }

    // raw table, server-paginated
    {
        let tabela_gen = tabela_gen.clone();
        Effect::new(move |_| {
            reload.track();
            let Ok(token) = ctx.require_token() else {
                return;
            };
            let datas = selected_datas.get();
            let page_num = raw_page_num.get();
            let per_page = rows_per_page.get();
            let generation = tabela_gen.begin();
            let tabela_gen = tabela_gen.clone();
            spawn_local(async move {
                let result = fetch_tabela(&token, page_num, per_page, &datas).await;
                if !tabela_gen.is_current(generation) {
                    return;
                }
                match result {
                    Ok(response) => raw_page.set(response),
                    Err(err) => {
                        ctx.handle_api_error(&err);
                        notify.error(err.to_string());
                    }
                }
            });
        });
    }

    let derived = Memo::new(move |_| -> SlaDerived {
        derive(
            &por_motorista.get(),
            &filters.get(),
            &selected_cidades.get(),
            sort.get(),
            page.get(),
            rows_per_page.get(),
        )
    });

    let cidade_choices = Memo::new(move |_| cidades_options(&por_motorista.get(), &filters.get()));

    let dropdown_values = Memo::new(move |_| {
        let Some(col) = open_filter_col.get() else {
            return Vec::new();
        };
        unique_column_values(&por_motorista.get(), col)
    });

    let set_sort = move |index: usize| {
        if let Some(&(sort_by, sort_dir, _)) = SORT_OPTIONS.get(index) {
            let state = SortState { sort_by, sort_dir };
            sort.set(state);
            storage::set_string(SORT_STORAGE_KEY, &state.to_json());
            page.set(1);
        }
    };

    let change_rows_per_page = move |value: u32| {
        if !VALID_ROWS_PER_PAGE.contains(&value) {
            return;
        }
        rows_per_page.set(value);
        page.set(1);
        raw_page_num.set(1);
        let Ok(token) = ctx.require_token() else {
            return;
        };
        let mut config = ctx.config();
        config.linhas_por_pagina = value;
        spawn_local(async move {
            match auth::update_config(&token, config).await {
                Ok(stored) => ctx.set_config(stored),
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    let run_upload = move |file: web_sys::File, kind: UploadKind| {
        let Ok(token) = ctx.require_token() else {
            notify.error(ApiError::Unauthorized.to_string());
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = match kind {
                UploadKind::Importar => upload_tabela(&token, &file)
                    .await
                    .map(|r| format!("{} linhas importadas.", r.saved)),
                UploadKind::Atualizar => upload_atualizar(&token, &file)
                    .await
                    .map(|r| format!("{} atualizadas, {} inseridas.", r.updated, r.inserted)),
                UploadKind::EntradaGalpao => upload_entrada_galpao(&token, &file)
                    .await
                    .map(|r| format!("{} entradas registadas.", r.saved)),
            };
            busy.set(false);
            match result {
                Ok(message) => {
                    notify.success(message);
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    let delete_all = move |_| {
        let Ok(token) = ctx.require_token() else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = delete_tabela(&token).await;
            busy.set(false);
            match result {
                Ok(response) => {
                    notify.success(format!("{} linhas removidas.", response.deleted));
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    let export_csv = move |_| {
        let d = derived.get_untracked();
        let mut rows = d.filtered;
        crate::pipeline::sort::sort_motoristas(&mut rows, sort.get_untracked());
        let table = motoristas_to_table(&rows, 0);
        if let Err(err) = export::download_csv("sla_motoristas", &table) {
            log::warn!("CSV export failed: {}", err);
            notify.error("Falha ao exportar CSV.");
        }
    };

    // overall SLA over the filtered set, rendered per the configured
    // style
    let overall = move || {
        let d = derived.get();
        let entregues: u64 = d.filtered.iter().map(|m| m.total_entregues).sum();
        let nao: u64 = d.filtered.iter().map(|m| m.nao_entregues).sum();
        percentual_sla(entregues, nao)
    };

    let acompanhamento = move || {
        let pct = overall();
        let style = ctx.config().acompanhamento();
        match style.as_str() {
            "circular" => view! {
                <div style=format!(
                    "width: 72px; height: 72px; border-radius: 50%; display: flex; align-items: center; justify-content: center; border: 6px solid #16a34a; opacity: {};",
                    (pct / 100.0).max(0.15),
                )>{format_pct(pct)}</div>
            }
            .into_any(),
            "vertical" | "horizontal" => {
                let horizontal = style == "horizontal";
                let bar = if horizontal {
                    format!("width: {}%; height: 100%;", pct)
                } else {
                    format!("width: 100%; height: {}%; align-self: flex-end;", pct)
                };
                let outer = if horizontal {
                    "width: 160px; height: 14px;"
                } else {
                    "width: 14px; height: 72px; display: flex;"
                };
                view! {
                    <div style="display: flex; align-items: center; gap: 8px;">
                        <div style=format!(
                            "{} background: #e2e8f0; border-radius: 7px; overflow: hidden;",
                            outer,
                        )>
                            <div style=format!("{} background: #16a34a;", bar)></div>
                        </div>
                        <span>{format_pct(pct)}</span>
                    </div>
                }
                .into_any()
            }
            _ => view! {
                <span style="font-size: 1.5rem; font-weight: 700;">{format_pct(pct)}</span>
            }
            .into_any(),
        }
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 16px;">
            <h2>"SLA de entregas"</h2>

            <div style="display: flex; align-items: center; gap: 8px; flex-wrap: wrap;">
                <DateFilterSelect
                    datas=Signal::derive(move || datas_options.get())
                    selected=Signal::derive(move || selected_datas.get())
                    on_change=Callback::new(move |datas| {
                        selected_datas.set(datas);
                        raw_page_num.set(1);
                    })
                    single=true
                />
                <select
                    on:change=move |ev| periodo.set(event_target_value(&ev))
                    prop:value=move || periodo.get()
                >
                    <option value="">"Dia todo"</option>
                    <option value="AM">"Manhã"</option>
                    <option value="PM">"Tarde"</option>
                </select>
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if value.is_empty() {
                        selected_cidades.set(Vec::new());
                    } else {
                        selected_cidades.set(vec![value]);
                    }
                    page.set(1);
                }>
                    <option value="">"Todas as cidades"</option>
                    {move || {
                        cidade_choices
                            .get()
                            .into_iter()
                            .map(|cidade| {
                                let value = cidade.clone();
                                view! { <option value=value>{cidade}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <select on:change=move |ev| {
                    if let Ok(index) = event_target_value(&ev).parse::<usize>() {
                        set_sort(index);
                    }
                }>
                    {SORT_OPTIONS
                        .iter()
                        .enumerate()
                        .map(|(i, (_, _, label))| {
                            view! { <option value=i.to_string()>{*label}</option> }
                        })
                        .collect_view()}
                </select>
                <UploadButton
                    label="Importar tabela"
                    disabled=Signal::derive(move || busy.get())
                    on_file=Callback::new(move |file| run_upload(file, UploadKind::Importar))
                />
                <UploadButton
                    label="Atualizar dados"
                    disabled=Signal::derive(move || busy.get())
                    on_file=Callback::new(move |file| run_upload(file, UploadKind::Atualizar))
                />
                <UploadButton
                    label="Entrada do galpão"
                    disabled=Signal::derive(move || busy.get())
                    on_file=Callback::new(move |file| run_upload(file, UploadKind::EntradaGalpao))
                />
                <button on:click=delete_all disabled=move || busy.get()>
                    "Apagar tabela"
                </button>
                <button on:click=export_csv>"Exportar CSV"</button>
            </div>

            <div style="display: flex; align-items: center; gap: 24px;">
                <div>
                    <span style="color: #64748b;">"SLA geral"</span>
                    {acompanhamento}
                </div>
                {move || {
                    (!filters.get().is_empty())
                        .then(|| {
                            view! {
                                <button on:click=move |_| {
                                    filters.update(|f| f.clear_all());
                                    storage::remove(BASE_FILTER_STORAGE_KEY);
                                    page.set(1);
                                }>"Limpar filtros"</button>
                            }
                        })
                }}
            </div>

            {move || {
                loading
                    .get()
                    .then(|| view! { <p>"A carregar indicadores…"</p> })
            }}

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
                                        filters
                                            .update(|f| {
                                                if col == BASE_COL {
                                                    match choose_base(f, &value) {
                                                        Some(base) => {
                                                            storage::set_string(
                                                                BASE_FILTER_STORAGE_KEY,
                                                                &base,
                                                            )
                                                        }
                                                        None => {
                                                            storage::remove(
                                                                BASE_FILTER_STORAGE_KEY,
                                                            )
                                                        }
                                                    }
                                                } else {
                                                    f.toggle(col, &value);
                                                }
                                            });
                                        page.set(1);
                                    })
                                    on_clear=Callback::new(move |_| {
                                        filters.update(|f| f.clear_column(col));
                                        if col == BASE_COL {
                                            storage::remove(BASE_FILTER_STORAGE_KEY);
                                        }
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
                on_rows_per_page_change=Callback::new(change_rows_per_page)
            />

            <h3>"Resumo por base"</h3>
            <table style="border-collapse: collapse; font-size: 0.875rem; max-width: 560px;">
                <thead>
                    <tr>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Base"</th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Entregues"</th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                            "Não entregues"
                        </th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"Total"</th>
                        <th style="border: 1px solid #e0e0e0; padding: 4px 8px;">"% SLA"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        derived
                            .get()
                            .por_base
                            .into_iter()
                            .map(|b| {
                                view! {
                                    <tr>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {b.nome}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {b.total_entregues.to_string()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {b.nao_entregues.to_string()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {b.total.to_string()}
                                        </td>
                                        <td style="border: 1px solid #e0e0e0; padding: 4px 8px;">
                                            {format_pct(b.percentual_sla)}
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <h3>"Tabela importada"</h3>
            <RawSlaTable
                raw_page=raw_page
                raw_page_num=raw_page_num
                rows_per_page=rows_per_page
                reload=reload
            />
        </div>
    }
}

#[derive(Clone, Copy)]
enum UploadKind {
    Importar,
    Atualizar,
    EntradaGalpao,
}

/// Server-paginated dump of the imported sheet, with per-row delete.
#[component]
fn RawSlaTable(
    raw_page: RwSignal<TablePage>,
    raw_page_num: RwSignal<usize>,
    rows_per_page: RwSignal<u32>,
    reload: RwSignal<u32>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");
    let notify = use_context::<NotificationService>().unwrap_or_default();

    let delete_row = move |id: String| {
        let Ok(token) = ctx.require_token() else {
            return;
        };
        spawn_local(async move {
            match delete_tabela_row(&token, &id).await {
                Ok(_) => {
                    notify.success("Linha removida.");
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    view! {
        <div style="overflow-x: auto; border: 1px solid #e0e0e0; border-radius: 4px;">
            <table style="width: 100%; border-collapse: collapse; font-size: 0.8rem;">
                <thead>
                    <tr>
                        {move || {
                            raw_page
                                .get()
                                .header
                                .unwrap_or_default()
                                .into_iter()
                                .map(|h| {
                                    view! {
                                        <th style="border: 1px solid #e0e0e0; padding: 3px 6px; background: #f8fafc;">
                                            {h}
                                        </th>
                                    }
                                })
                                .collect_view()
                        }} <th style="border: 1px solid #e0e0e0; padding: 3px 6px;"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        raw_page
                            .get()
                            .data
                            .into_iter()
                            .map(|row| {
                                let id = row.id.clone();
                                view! {
                                    <tr>
                                        {row
                                            .values
                                            .into_iter()
                                            .map(|value| {
                                                view! {
                                                    <td style="border: 1px solid #e0e0e0; padding: 3px 6px;">
                                                        {value}
                                                    </td>
                                                }
                                            })
                                            .collect_view()}
                                        <td style="border: 1px solid #e0e0e0; padding: 3px 6px;">
                                            <button on:click=move |_| delete_row(
                                                id.clone(),
                                            )>"Remover"</button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
        <PaginationControls
            current_page=Signal::derive(move || raw_page_num.get())
            total_pages=Signal::derive(move || {
                total_pages(raw_page.get().total as usize, rows_per_page.get() as usize)
            })
            total_count=Signal::derive(move || raw_page.get().total as usize)
            rows_per_page=Signal::derive(move || rows_per_page.get())
            on_page_change=Callback::new(move |p| raw_page_num.set(p))
            on_rows_per_page_change=Callback::new(move |_| {})
        />
    }
}

fn datas_param(datas: &[String]) -> String {
    if datas.is_empty() {
        today_date_string()
    } else {
        datas.join(",")
    }
}

async fn fetch_datas(token: &str) -> Result<DatasResponse, ApiError> {
    api::get_json("/api/importe-tabela-sla/datas", token, Some(TableId::Sla)).await
}

async fn fetch_indicadores(
    token: &str,
    datas: &[String],
    bases: &[String],
    periodo: &str,
    cidades: &[String],
) -> Result<IndicadoresResponse, ApiError> {
    let mut params = vec![format!(
        "datas={}",
        urlencoding::encode(&datas_param(datas))
    )];
    if !bases.is_empty() {
        params.push(format!("bases={}", urlencoding::encode(&bases.join(","))));
    }
    if !periodo.is_empty() {
        params.push(format!("periodo={}", urlencoding::encode(periodo)));
    }
    if !cidades.is_empty() {
        params.push(format!(
            "cidades={}",
            urlencoding::encode(&cidades.join(","))
        ));
    }
    let path = format!(
        "/api/importe-tabela-sla/indicadores?{}",
        params.join("&")
    );
    api::get_json(&path, token, Some(TableId::Sla)).await
}

async fn fetch_tabela(
    token: &str,
    page: usize,
    per_page: u32,
    datas: &[String],
) -> Result<TablePage, ApiError> {
    let path = format!(
        "/api/importe-tabela-sla?page={}&per_page={}&datas={}",
        page,
        per_page,
        urlencoding::encode(&datas_param(datas))
    );
    api::get_json(&path, token, Some(TableId::Sla)).await
}

async fn upload_tabela(token: &str, file: &web_sys::File) -> Result<SavedResponse, ApiError> {
    api::upload_xlsx("/api/importe-tabela-sla", token, TableId::Sla, file).await
}

async fn upload_atualizar(token: &str, file: &web_sys::File) -> Result<UpdatedResponse, ApiError> {
    api::upload_xlsx(
        "/api/importe-tabela-sla/atualizar",
        token,
        TableId::Sla,
        file,
    )
    .await
}

async fn upload_entrada_galpao(
    token: &str,
    file: &web_sys::File,
) -> Result<SavedResponse, ApiError> {
    api::upload_xlsx(
        "/api/importe-tabela-sla/entrada-galpao",
        token,
        TableId::Sla,
        file,
    )
    .await
}

async fn delete_tabela(token: &str) -> Result<DeletedResponse, ApiError> {
    api::delete_json("/api/importe-tabela-sla", token, Some(TableId::Sla)).await
}

async fn delete_tabela_row(token: &str, id: &str) -> Result<DeletedResponse, ApiError> {
    let path = format!("/api/importe-tabela-sla/{}", urlencoding::encode(id));
    api::delete_json(&path, token, Some(TableId::Sla)).await
}
