use crate::models::NoteCategory;
use icons::ChevronDown;
use leptos::prelude::*;

const PLACEHOLDER_DOT: &str = "#f09a58";

/// Dropdown for picking a note's category.
///
/// Purely presentational: the caller owns the open flag and the selection.
#[component]
pub fn CategorySelector(
    #[prop(into)] options: Signal<Vec<NoteCategory>>,
    #[prop(into)] selected: Signal<Option<i64>>,
    open: RwSignal<bool>,
    on_select: Callback<i64>,
) -> impl IntoView {
    let selected_option = Memo::new(move |_| {
        let id = selected.get()?;
        options.with(|opts| opts.iter().find(|c| c.id == id).cloned())
    });

    let dot_style = move || {
        let color = selected_option
            .with(|c| c.as_ref().map(|c| c.color.clone()))
            .unwrap_or_else(|| PLACEHOLDER_DOT.to_string());
        format!("background-color: {color};")
    };

    view! {
        <div class="relative w-56">
            <button
                type="button"
                class="flex w-full items-center gap-2 rounded-md border border-amber-800 px-3 py-2 text-sm text-amber-950 hover:cursor-pointer"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span aria-hidden="true" class="size-3 rounded-full" style=dot_style></span>
                <span class="flex-1 truncate text-left">
                    {move || {
                        selected_option
                            .with(|c| c.as_ref().map(|c| c.name.clone()))
                            .unwrap_or_else(|| "Select a category".to_string())
                    }}
                </span>
                <span
                    aria-hidden="true"
                    class=move || if open.get() { "rotate-180 transition-transform" } else { "transition-transform" }
                >
                    <ChevronDown class="size-4" />
                </span>
            </button>

            <Show when=move || open.get()>
                <ul
                    role="listbox"
                    class="absolute z-10 mt-1 w-full rounded-md border border-amber-800 bg-amber-50 py-1 shadow-md"
                >
                    {move || {
                        options
                            .get()
                            .into_iter()
                            .map(|NoteCategory { id, name, color, .. }| {
                                view! {
                                    <li>
                                        <button
                                            type="button"
                                            class="flex w-full items-center gap-2 px-3 py-1.5 text-sm text-amber-950 hover:bg-amber-800/10 hover:cursor-pointer"
                                            on:click=move |_| on_select.run(id)
                                        >
                                            <span
                                                aria-hidden="true"
                                                class="size-3 rounded-full"
                                                style=format!("background-color: {color};")
                                            ></span>
                                            <span>{name}</span>
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
