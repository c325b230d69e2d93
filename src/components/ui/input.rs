use leptos::prelude::*;
use tw_merge::tw_merge;

pub(crate) const FIELD_CLASS: &str = "w-full min-w-0 rounded-md border border-amber-800 bg-transparent px-3 py-2 text-base text-amber-950 placeholder:text-amber-900/60 outline-none transition-[color,box-shadow] focus-visible:ring-2 focus-visible:ring-amber-800/40 disabled:cursor-not-allowed disabled:opacity-50";

/// Text input bound to a signal.
///
/// `bind:value` is avoided on purpose: the input event is wired by hand so
/// the same component works unchanged across Leptos point releases.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] aria_label: String,
    #[prop(into, optional)] autocomplete: String,
    #[prop(optional)] required: bool,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "h-11", class);

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            aria-label=aria_label
            autocomplete=autocomplete
            required=required
            prop:value=move || bind_value.get()
            on:input=move |ev| bind_value.set(event_target_value(&ev))
        />
    }
}

/// Multi-line input whose edits are reported instead of written back.
///
/// The owner decides what happens with each change (the note editor routes
/// them through autosave), and feeds the current text back via `value`.
#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "min-h-40 resize-none", class);

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_change.run(event_target_value(&ev))
        />
    }
}
