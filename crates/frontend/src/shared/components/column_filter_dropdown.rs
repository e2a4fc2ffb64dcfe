use leptos::prelude::*;

/// Checkbox list of a column's distinct values with a search box.
/// Toggling a value flips its membership in the column's filter; the
/// page owns the actual `ColumnFilters` state.
#[component]
pub fn ColumnFilterDropdown(
    #[prop(into)] values: Signal<Vec<String>>,

    #[prop(into)] selected: Signal<Vec<String>>,

    on_toggle: Callback<String>,

    on_clear: Callback<()>,

    on_close: Callback<()>,
) -> impl IntoView {
    let (search, set_search) = signal(String::new());

    let visible = move || {
        let needle = search.get().trim().to_lowercase();
        values
            .get()
            .into_iter()
            .filter(|v| needle.is_empty() || v.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    };

    view! {
        <div style="position: absolute; z-index: 100; background: white; border: 1px solid #cbd5e1; border-radius: 6px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); padding: 8px; min-width: 220px; max-height: 320px; display: flex; flex-direction: column; gap: 6px;">
            <input
                type="text"
                placeholder="Pesquisar..."
                style="padding: 4px 6px; border: 1px solid #cbd5e1; border-radius: 4px;"
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />
            <div style="overflow-y: auto; flex: 1; display: flex; flex-direction: column; gap: 2px;">
                {move || {
                    let items = visible();
                    if items.is_empty() {
                        view! { <span style="color: #64748b; padding: 4px;">"Nenhum valor"</span> }
                            .into_any()
                    } else {
                        items
                            .into_iter()
                            .map(|value| {
                                let checked = {
                                    let value = value.clone();
                                    move || selected.get().iter().any(|s| *s == value)
                                };
                                let toggle_value = value.clone();
                                view! {
                                    <label style="display: flex; align-items: center; gap: 6px; padding: 2px 4px; cursor: pointer;">
                                        <input
                                            type="checkbox"
                                            prop:checked=checked
                                            on:change=move |_| on_toggle.run(toggle_value.clone())
                                        />
                                        <span>{value}</span>
                                    </label>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
            <div style="display: flex; justify-content: space-between; gap: 6px;">
                <button on:click=move |_| on_clear.run(()) style="font-size: 0.8rem;">
                    "Limpar"
                </button>
                <button on:click=move |_| on_close.run(()) style="font-size: 0.8rem;">
                    "Fechar"
                </button>
            </div>
        </div>
    }
}
