use leptos::prelude::*;

/// Import-date picker fed by `GET .../datas`. The empty option means
/// "today", which the endpoints also treat as the default.
#[component]
pub fn DateFilterSelect(
    #[prop(into)] datas: Signal<Vec<String>>,

    #[prop(into)] selected: Signal<Vec<String>>,

    on_change: Callback<Vec<String>>,

    /// Single-choice mode renders a plain select; otherwise checkboxes.
    #[prop(optional)]
    single: bool,
) -> impl IntoView {
    if single {
        view! {
            <select
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if value.is_empty() {
                        on_change.run(Vec::new());
                    } else {
                        on_change.run(vec![value]);
                    }
                }
                prop:value=move || selected.get().first().cloned().unwrap_or_default()
            >
                <option value="">"Hoje"</option>
                {move || {
                    datas
                        .get()
                        .into_iter()
                        .map(|data| {
                            let value = data.clone();
                            view! {
                                <option
                                    value=value.clone()
                                    selected=move || selected.get().first() == Some(&value)
                                >
                                    {data}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any()
    } else {
        view! {
            <div style="display: flex; flex-wrap: wrap; gap: 8px;">
                {move || {
                    datas
                        .get()
                        .into_iter()
                        .map(|data| {
                            let value = data.clone();
                            let checked = {
                                let value = value.clone();
                                move || selected.get().contains(&value)
                            };
                            view! {
                                <label style="display: flex; align-items: center; gap: 4px; cursor: pointer;">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |_| {
                                            let mut current = selected.get_untracked();
                                            match current.iter().position(|d| *d == value) {
                                                Some(pos) => {
                                                    current.remove(pos);
                                                }
                                                None => current.push(value.clone()),
                                            }
                                            on_change.run(current);
                                        }
                                    />
                                    <span>{data}</span>
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        }
        .into_any()
    }
}
