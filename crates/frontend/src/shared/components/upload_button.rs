use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Button fronting a hidden `.xlsx` file input. The input value is
/// reset after each pick so re-selecting the same file fires again.
#[component]
pub fn UploadButton(
    #[prop(into)] label: String,

    #[prop(into)] disabled: Signal<bool>,

    on_file: Callback<web_sys::File>,
) -> impl IntoView {
    let input_ref = NodeRef::<html::Input>::new();

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let handle_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file.run(file);
        }
        input.set_value("");
    };

    view! {
        <span>
            <input
                type="file"
                accept=".xlsx"
                style="display: none;"
                node_ref=input_ref
                on:change=handle_change
            />
            <button
                on:click=open_picker
                disabled=move || disabled.get()
                style="padding: 6px 12px; border: 1px solid #cbd5e1; border-radius: 4px; cursor: pointer; background: #f8fafc;"
            >
                {label}
            </button>
        </span>
    }
}
