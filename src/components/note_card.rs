use crate::models::NoteItem;
use crate::util::{note_day_label, tint_style};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Dashboard card for one note. Clicking opens the editor.
#[component]
pub fn NoteCard(note: NoteItem) -> impl IntoView {
    let navigate = StoredValue::new(use_navigate());
    let href = format!("/notes/{}", note.id);
    let style = tint_style(&note.category.color, "4D");
    let day = note_day_label(&note.created_at);

    view! {
        <article
            data-name="NoteCard"
            class="flex h-60 cursor-pointer flex-col gap-3 overflow-hidden rounded-xl border-[3px] p-4 transition-shadow hover:shadow-md"
            style=style
            on:click=move |_| navigate.with_value(|nav| nav(&href, Default::default()))
        >
            <p class="flex gap-2 text-xs text-black">
                <span class="font-bold">{day}</span>
                <span>{note.category.name}</span>
            </p>
            <h2 class="font-serif text-2xl font-bold text-black line-clamp-2">{note.title}</h2>
            <p class="text-xs text-black line-clamp-6 whitespace-pre-line">{note.content}</p>
        </article>
    }
}

#[component]
pub fn EmptyNotes() -> impl IntoView {
    view! {
        <div
            data-name="EmptyNotes"
            class="col-span-full flex flex-col items-center justify-center gap-4 py-24"
        >
            <p class="text-2xl text-amber-900">"I'm just here waiting for your charming notes..."</p>
        </div>
    }
}
