//! Phone directory: a small imported sheet served whole, filtered and
//! paginated client-side through the same pipeline as the big views.

use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::error::ApiError;
use contracts::tables::{DeletedResponse, SavedResponse, TablePage, TableRow};

use crate::pipeline::filter::{apply_column_filters, ColumnFilters};
use crate::pipeline::paginate::paginate;
use crate::pipeline::store::RequestGeneration;
use crate::pipeline::view::{BodyRow, TableView};
use crate::shared::api::{self, TableId};
use crate::shared::auth::AppContext;
use crate::shared::components::column_filter_dropdown::ColumnFilterDropdown;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::upload_button::UploadButton;
use crate::shared::notifications::NotificationService;
use crate::pipeline::filter::unique_column_values;

#[component]
pub fn TelefonesPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext provided");
    let notify = use_context::<NotificationService>().unwrap_or_default();

    let listing = RwSignal::new(TablePage::default());
    let filters = RwSignal::new(ColumnFilters::new());
    let page = RwSignal::new(1usize);
    let rows_per_page = RwSignal::new(ctx.config().rows_per_page());
    let loading = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let confirm_delete = RwSignal::new(false);
    let reload = RwSignal::new(0u32);
    let open_filter_col = RwSignal::new(None::<usize>);

    let generation = RequestGeneration::new();

    {
        let generation = generation.clone();
        Effect::new(move |_| {
            reload.track();
            let Ok(token) = ctx.require_token() else {
                return;
            };
            let gen_number = generation.begin();
            let generation = generation.clone();
            loading.set(true);
            spawn_local(async move {
                let result = fetch_lista(&token).await;
                if !generation.is_current(gen_number) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(response) => {
                        listing.set(response);
                        page.set(1);
                    }
                    Err(err) => {
                        ctx.handle_api_error(&err);
                        notify.error(err.to_string());
                    }
                }
            });
        });
    }

    let filtered = Memo::new(move |_| -> Vec<TableRow> {
        apply_column_filters(&listing.get().data, &filters.get())
    });

    let derived = Memo::new(move |_| {
        let slice = paginate(&filtered.get(), page.get(), rows_per_page.get() as usize);
        let table = TableView {
            header_values: listing.get().header.unwrap_or_default(),
            body_rows: slice
                .page_rows
                .iter()
                .map(|row| BodyRow {
                    id: row.id.clone(),
                    values: row.values.clone(),
                })
                .collect(),
        };
        (table, slice.start, slice.total_pages, slice.current_page)
    });

    let dropdown_values = Memo::new(move |_| {
        let Some(col) = open_filter_col.get() else {
            return Vec::new();
        };
        unique_column_values(&listing.get().data, col)
    });

    let run_upload = move |file: web_sys::File| {
        let Ok(token) = ctx.require_token() else {
            notify.error(ApiError::Unauthorized.to_string());
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = upload_lista(&token, &file).await;
            busy.set(false);
            match result {
                Ok(response) => {
                    notify.success(format!("{} contactos importados.", response.saved));
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    // two-step delete: first click arms, second click executes
    let delete_all = move |_| {
        if !confirm_delete.get_untracked() {
            confirm_delete.set(true);
            return;
        }
        confirm_delete.set(false);
        let Ok(token) = ctx.require_token() else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = delete_lista(&token).await;
            busy.set(false);
            match result {
                Ok(response) => {
                    notify.success(format!("{} contactos removidos.", response.deleted));
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    ctx.handle_api_error(&err);
                    notify.error(err.to_string());
                }
            }
        });
    };

    let delete_row = move |id: String| {
        let Ok(token) = ctx.require_token() else {
            return;
        };
        spawn_local(async move {
            match delete_lista_row(&token, &id).await {
                Ok(_) => {
                    notify.success("Contacto removido.");
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
        <div style="display: flex; flex-direction: column; gap: 16px;">
            <h2>"Lista de telefones"</h2>

            <div style="display: flex; align-items: center; gap: 8px;">
                <UploadButton
                    label="Importar lista"
                    disabled=Signal::derive(move || busy.get())
                    on_file=Callback::new(run_upload)
                />
                <button on:click=delete_all disabled=move || busy.get()>
                    {move || {
                        if confirm_delete.get() {
                            "Confirmar remoção?"
                        } else {
                            "Apagar lista"
                        }
                    }}
                </button>
                {move || {
                    confirm_delete
                        .get()
                        .then(|| {
                            view! {
                                <button on:click=move |_| {
                                    confirm_delete.set(false)
                                }>"Cancelar"</button>
                            }
                        })
                }}
            </div>

            {move || loading.get().then(|| view! { <p>"A carregar contactos…"</p> })}

            <div style="position: relative;">
                <DataTable
                    table=Signal::derive(move || derived.get().0)
                    start=Signal::derive(move || derived.get().1)
                    active_filter_columns=Signal::derive(move || {
                        filters.get().active_columns()
                    })
                    on_header_click=Callback::new(move |col| {
                        open_filter_col
                            .update(|open| {
                                *open = if *open == Some(col) { None } else { Some(col) };
                            });
                    })
                    on_row_click=Callback::new(move |row_index: usize| {
                        let (_, start, _, _) = derived.get_untracked();
                        if let Some(row) = filtered.get_untracked().get(start + row_index) {
                            delete_row_prompt(row, delete_row);
                        }
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
                current_page=Signal::derive(move || derived.get().3)
                total_pages=Signal::derive(move || derived.get().2)
                total_count=Signal::derive(move || filtered.get().len())
                rows_per_page=Signal::derive(move || rows_per_page.get())
                on_page_change=Callback::new(move |p| page.set(p))
                on_rows_per_page_change=Callback::new(move |value| {
                    rows_per_page.set(value);
                    page.set(1);
                })
            />
        </div>
    }
}

/// Row clicks ask before removing; the browser confirm dialog is
/// enough for this small admin table.
fn delete_row_prompt<F>(row: &TableRow, delete: F)
where
    F: Fn(String),
{
    let label = row.values.first().cloned().unwrap_or_default();
    let confirmed = web_sys::window()
        .and_then(|w| {
            w.confirm_with_message(&format!("Remover o contacto \"{}\"?", label))
                .ok()
        })
        .unwrap_or(false);
    if confirmed {
        delete(row.id.clone());
    }
}

async fn fetch_lista(token: &str) -> Result<TablePage, ApiError> {
    api::get_json("/api/lista-telefones", token, Some(TableId::ListaTelefones)).await
}

async fn upload_lista(token: &str, file: &web_sys::File) -> Result<SavedResponse, ApiError> {
    api::upload_xlsx(
        "/api/lista-telefones",
        token,
        TableId::ListaTelefones,
        file,
    )
    .await
}

async fn delete_lista(token: &str) -> Result<DeletedResponse, ApiError> {
    api::delete_json("/api/lista-telefones", token, Some(TableId::ListaTelefones)).await
}

async fn delete_lista_row(token: &str, id: &str) -> Result<DeletedResponse, ApiError> {
    let path = format!("/api/lista-telefones/{}", urlencoding::encode(id));
    api::delete_json(&path, token, Some(TableId::ListaTelefones)).await
}
