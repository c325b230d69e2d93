use crate::components::ui::FIELD_CLASS;
use icons::{Eye, EyeOff};
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Password field with a show/hide toggle.
#[component]
pub fn PasswordInput(
    #[prop(into)] id: String,
    #[prop(into)] autocomplete: String,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let visible = RwSignal::new(false);
    let input_class = tw_merge!(FIELD_CLASS, "h-11 pr-11");

    view! {
        <div class="relative w-full">
            <input
                data-name="PasswordInput"
                class=input_class
                id=id
                aria-label="Password"
                placeholder="Password"
                autocomplete=autocomplete
                required=true
                type=move || if visible.get() { "text" } else { "password" }
                prop:value=move || bind_value.get()
                on:input=move |ev| bind_value.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="absolute inset-y-0 right-0 flex w-11 items-center justify-center text-amber-900 hover:cursor-pointer"
                aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                on:click=move |_| visible.update(|v| *v = !*v)
            >
                {move || {
                    if visible.get() {
                        view! { <EyeOff class="size-5" /> }.into_any()
                    } else {
                        view! { <Eye class="size-5" /> }.into_any()
                    }
                }}
            </button>
        </div>
    }
}
