//! Labelled input with an inline validation message.

use leptos::prelude::*;

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    error: Signal<String>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                class:field__input--invalid=move || !error.get().is_empty()
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <Show when=move || !error.get().is_empty()>
                <span class="field__error">{move || error.get()}</span>
            </Show>
        </label>
    }
}
