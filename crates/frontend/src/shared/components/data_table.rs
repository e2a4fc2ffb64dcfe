use leptos::prelude::*;

use crate::pipeline::view::TableView;

/// Renders a `TableView` with the synthetic ID column in front. Header
/// clicks bubble the column index up so the page can open its filter
/// dropdown; filtered columns carry a marker.
#[component]
pub fn DataTable(
    #[prop(into)] table: Signal<TableView>,

    /// Page offset; ordinals shown in the ID column continue from it.
    #[prop(into)]
    start: Signal<usize>,

    #[prop(into)] active_filter_columns: Signal<Vec<usize>>,

    #[prop(optional, into)] on_header_click: Option<Callback<usize>>,

    #[prop(optional, into)] on_row_click: Option<Callback<usize>>,
) -> impl IntoView {
    let th_style = "border: 1px solid #e0e0e0; padding: 4px 8px; cursor: pointer; user-select: none; font-weight: 600; background: #f8fafc; text-align: left; white-space: nowrap;";
    let td_style = "border: 1px solid #e0e0e0; padding: 4px 8px;";

    let header_cell = move |col: usize, label: String| {
        let marker = move || {
            if active_filter_columns.get().contains(&col) {
                " ⊙"
            } else {
                ""
            }
        };
        view! {
            <th
                style=th_style
                on:click=move |_| {
                    if let Some(cb) = on_header_click {
                        cb.run(col);
                    }
                }
            >
                {label}
                {marker}
            </th>
        }
    };

    view! {
        <div style="overflow-x: auto; border: 1px solid #e0e0e0; border-radius: 4px;">
            <table style="width: 100%; border-collapse: collapse; font-size: 0.875rem;">
                <thead>
                    <tr>
                        {move || {
                            let mut cells = vec![header_cell(0, "ID".to_string())];
                            cells
                                .extend(
                                    table
                                        .get()
                                        .header_values
                                        .into_iter()
                                        .enumerate()
                                        .map(|(i, label)| header_cell(i + 1, label)),
                                );
                            cells.into_iter().collect_view()
                        }}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let offset = start.get();
                        table
                            .get()
                            .body_rows
                            .into_iter()
                            .enumerate()
                            .map(|(i, row)| {
                                let clickable = on_row_click.is_some();
                                view! {
                                    <tr
                                        style=if clickable {
                                            "cursor: pointer;"
                                        } else {
                                            ""
                                        }
                                        on:click=move |_| {
                                            if let Some(cb) = on_row_click {
                                                cb.run(i);
                                            }
                                        }
                                    >
                                        <td style=td_style>{(offset + i + 1).to_string()}</td>
                                        {row
                                            .values
                                            .into_iter()
                                            .map(|value| view! { <td style=td_style>{value}</td> })
                                            .collect_view()}
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
