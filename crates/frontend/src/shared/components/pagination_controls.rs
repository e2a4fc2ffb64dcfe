use leptos::prelude::*;

use contracts::config::{DEFAULT_ROWS_PER_PAGE, VALID_ROWS_PER_PAGE};

/// Pagination bar shared by all tables. Pages are 1-based, matching
/// the pipeline's clamping.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<usize>,

    #[prop(into)] total_pages: Signal<usize>,

    /// Row count after filtering.
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)] rows_per_page: Signal<u32>,

    on_page_change: Callback<usize>,

    on_rows_per_page_change: Callback<u32>,

    /// Rows-per-page choices; defaults to the config allow-list.
    #[prop(optional, into)]
    rows_per_page_options: Option<Vec<u32>>,
) -> impl IntoView {
    let options = rows_per_page_options.unwrap_or_else(|| VALID_ROWS_PER_PAGE.to_vec());

    view! {
        <div class="pagination-controls" style="display: flex; align-items: center; gap: 6px;">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || current_page.get() <= 1
                title="Primeira página"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() <= 1
                title="Página anterior"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "Página {} de {} ({} linhas)",
                        current_page.get(),
                        total_pages.get().max(1),
                        total_count.get(),
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() >= total_pages.get()
                title="Próxima página"
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=move || current_page.get() >= total_pages.get()
                title="Última página"
            >
                "»"
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let value = event_target_value(&ev)
                        .parse()
                        .unwrap_or(DEFAULT_ROWS_PER_PAGE);
                    on_rows_per_page_change.run(value);
                }
                prop:value=move || rows_per_page.get().to_string()
            >
                {options
                    .iter()
                    .map(|&size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || rows_per_page.get() == size
                            >
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
