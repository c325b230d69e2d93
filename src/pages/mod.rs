use crate::api::{ApiError, ApiResult, REQUEST_FAILED};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardFooter,
    CardTitle, Input, Spinner, Textarea,
};
use crate::components::{CategorySelector, EmptyNotes, NoteCard, PasswordInput};
use crate::dashboard::{category_counts, create_in_default_category, filter_notes, CategoryFilter};
use crate::drafts::DraftEdit;
use crate::models::{Credentials, NoteCategory, NoteItem, UpdateNotePayload};
use crate::state::autosave::{AutosaveController, AutosaveSnapshot, Listener, SaveFn, SaveFuture};
use crate::state::AppContext;
use crate::util::timer::{BrowserRuntime, LiveFlag};
use crate::util::{format_last_edited, parse_note_id, tint_style};
use icons::{Plus, X};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;
use std::sync::Arc;

pub(crate) const LOAD_NOTES_FAILED: &str = "Could not load notes.";
pub(crate) const LOAD_NOTE_FAILED: &str = "Could not load note.";
pub(crate) const INVALID_NOTE_ID: &str = "Invalid note ID.";

/// Two loads that ran side by side.
///
/// Each success is kept on its own; the first failure becomes the status.
#[derive(Debug, PartialEq)]
pub(crate) struct PairLoad<A, B> {
    pub first: Option<A>,
    pub second: Option<B>,
    pub status: Option<String>,
}

pub(crate) fn settle_pair<A, B>(
    first: ApiResult<A>,
    second: ApiResult<B>,
    fallback: &str,
) -> PairLoad<A, B> {
    let mut error: Option<ApiError> = None;
    let first = first.map_err(|e| error = Some(e)).ok();
    let second = second
        .map_err(|e| {
            error.get_or_insert(e);
        })
        .ok();

    PairLoad {
        first,
        second,
        status: error.map(|e| e.status_or(fallback)),
    }
}

/// Clears `live` when the current reactive owner is disposed.
fn tear_down_on_cleanup(live: &LiveFlag) {
    let live = live.clone();
    on_cleanup(move || live.tear_down());
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            Self::Login => "Yay, You're Back!",
            Self::Signup => "Yay, New Friend!",
        }
    }

    fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::Login, false) => "Login",
            (Self::Login, true) => "Logging in...",
            (Self::Signup, false) => "Sign Up",
            (Self::Signup, true) => "Signing up...",
        }
    }

    fn password_autocomplete(self) -> &'static str {
        match self {
            Self::Login => "current-password",
            Self::Signup => "new-password",
        }
    }

    /// The other screen: `(href, link text)`.
    fn switch_link(self) -> (&'static str, &'static str) {
        match self {
            Self::Login => ("/signup", "Oops! I've never been here before"),
            Self::Signup => ("/login", "We're already friends!"),
        }
    }
}

/// Shared login / signup screen.
#[component]
fn AuthScreen(mode: AuthMode) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let navigate = StoredValue::new(use_navigate());

    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let status: RwSignal<String> = RwSignal::new(String::new());
    let submitting: RwSignal<bool> = RwSignal::new(false);

    let live = LiveFlag::new();
    tear_down_on_cleanup(&live);

    // Prime the CSRF cookie before the first POST.
    {
        let live = live.clone();
        let client = api_client.get_untracked();
        spawn_local(async move {
            if let Err(e) = client.ensure_csrf_cookie().await {
                if live.is_alive() {
                    status.set(e.to_string());
                }
            }
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let client = api_client.get_untracked();
        let live = live.clone();

        submitting.set(true);
        status.set(String::new());

        spawn_local(async move {
            let result = match mode {
                AuthMode::Login => client.login_user(&credentials).await,
                AuthMode::Signup => client.signup_user(&credentials).await,
            };
            if !live.is_alive() {
                return;
            }
            submitting.set(false);
            match result {
                Ok(_) => navigate.with_value(|nav| nav("/home", Default::default())),
                Err(e) => status.set(e.status_or(REQUEST_FAILED)),
            }
        });
    };

    let (switch_href, switch_text) = mode.switch_link();

    view! {
        <main class="flex min-h-screen items-center justify-center bg-amber-50 px-4 py-10">
            <Card>
                <CardTitle>{mode.title()}</CardTitle>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <Input
                            id="username"
                            aria_label="Email address"
                            placeholder="Email address"
                            autocomplete="username"
                            required=true
                            bind_value=username
                        />
                        <PasswordInput
                            id="password"
                            autocomplete=mode.password_autocomplete()
                            bind_value=password
                        />

                        <Button
                            class="mx-auto mt-4 w-32"
                            attr:disabled=move || submitting.get()
                        >
                            <Show when=move || submitting.get()>
                                <Spinner />
                            </Show>
                            {move || mode.submit_label(submitting.get())}
                        </Button>
                    </form>
                </CardContent>

                <Show when=move || !status.get().is_empty()>
                    <Alert attr:role="status">
                        <AlertDescription>{move || status.get()}</AlertDescription>
                    </Alert>
                </Show>

                <CardFooter>
                    <a class="text-amber-900 underline underline-offset-4" href=switch_href>
                        {switch_text}
                    </a>
                </CardFooter>
            </Card>
        </main>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <AuthScreen mode=AuthMode::Login /> }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    view! { <AuthScreen mode=AuthMode::Signup /> }
}

#[component]
pub fn RootPage() -> impl IntoView {
    view! { <Redirect path="/login" /> }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let navigate = StoredValue::new(use_navigate());

    let categories: RwSignal<Vec<NoteCategory>> = RwSignal::new(vec![]);
    let notes: RwSignal<Vec<NoteItem>> = RwSignal::new(vec![]);
    let filter: RwSignal<CategoryFilter> = RwSignal::new(CategoryFilter::All);
    let status: RwSignal<String> = RwSignal::new(String::new());
    let creating: RwSignal<bool> = RwSignal::new(false);

    let live = LiveFlag::new();
    tear_down_on_cleanup(&live);

    {
        let live = live.clone();
        let client = api_client.get_untracked();
        spawn_local(async move {
            let (loaded_categories, loaded_notes) =
                futures::join!(client.get_categories(), client.get_notes());
            if !live.is_alive() {
                return;
            }
            let loaded = settle_pair(loaded_categories, loaded_notes, LOAD_NOTES_FAILED);
            if let Some(c) = loaded.first {
                categories.set(c);
            }
            if let Some(n) = loaded.second {
                notes.set(n);
            }
            if let Some(msg) = loaded.status {
                status.set(msg);
            }
        });
    }

    let on_new_note = move |_: web_sys::MouseEvent| {
        if creating.get_untracked() {
            return;
        }
        let available = categories.get_untracked();
        let client = api_client.get_untracked();
        let live = live.clone();
        creating.set(true);
        status.set(String::new());

        spawn_local(async move {
            let result = create_in_default_category(&client, &available).await;
            if !live.is_alive() {
                return;
            }
            creating.set(false);
            match result {
                Ok(note) => navigate.with_value(|nav| {
                    nav(&format!("/notes/{}", note.id), Default::default());
                }),
                Err(msg) => status.set(msg),
            }
        });
    };

    let sidebar_item_class = |active: bool| {
        if active {
            "flex w-full items-center gap-2 rounded-md px-2 py-1.5 text-left text-sm font-bold text-black hover:cursor-pointer"
        } else {
            "flex w-full items-center gap-2 rounded-md px-2 py-1.5 text-left text-sm text-black hover:cursor-pointer"
        }
    };

    view! {
        <main class="min-h-screen bg-amber-50">
            <div class="mx-auto flex w-full max-w-7xl gap-8 px-6 py-8">
                <aside class="w-56 shrink-0 pt-16">
                    <ul class="flex flex-col gap-1">
                        <li>
                            <button
                                type="button"
                                class=move || sidebar_item_class(filter.get() == CategoryFilter::All)
                                on:click=move |_| filter.set(CategoryFilter::All)
                            >
                                <span class="flex-1">"All Categories"</span>
                                <span class="text-xs">{move || notes.with(Vec::len)}</span>
                            </button>
                        </li>
                        {move || {
                            notes.with(|n| categories.with(|c| category_counts(c, n)))
                                .into_iter()
                                .map(|entry| {
                                    let id = entry.category.id;
                                    view! {
                                        <li>
                                            <button
                                                type="button"
                                                class=move || sidebar_item_class(filter.get().selects(id))
                                                on:click=move |_| filter.set(CategoryFilter::Category(id))
                                            >
                                                <span
                                                    aria-hidden="true"
                                                    class="size-3 rounded-full"
                                                    style=format!("background-color: {};", entry.category.color)
                                                ></span>
                                                <span class="flex-1">{entry.category.name}</span>
                                                <span class="text-xs">{entry.count}</span>
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </aside>

                <section class="flex flex-1 flex-col gap-4">
                    <div class="flex justify-end">
                        <Button
                            attr:disabled=move || creating.get()
                            on:click=on_new_note
                        >
                            <Plus />
                            "New Note"
                        </Button>
                    </div>

                    <Show when=move || !status.get().is_empty()>
                        <Alert attr:role="status">
                            <AlertDescription>{move || status.get()}</AlertDescription>
                        </Alert>
                    </Show>

                    <div class="grid grid-cols-1 gap-4 md:grid-cols-2 xl:grid-cols-3">
                        {move || {
                            let visible = notes.with(|n| filter_notes(n, filter.get()));
                            if visible.is_empty() {
                                view! { <EmptyNotes /> }.into_any()
                            } else {
                                visible
                                    .into_iter()
                                    .map(|note| view! { <NoteCard note=note /> })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </div>
                </section>
            </div>
        </main>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NoteRouteParams {
    pub note_id: Option<String>,
}

/// Single-note editor with debounced autosave.
///
/// The note id is read once on mount; navigating to another note goes
/// through the dashboard and mounts a fresh editor.
#[component]
pub fn NotePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let params = use_params::<NoteRouteParams>();
    let navigate = StoredValue::new(use_navigate());

    let categories: RwSignal<Vec<NoteCategory>> = RwSignal::new(vec![]);
    let snapshot: RwSignal<AutosaveSnapshot> = RwSignal::new(AutosaveSnapshot::default());
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_status: RwSignal<String> = RwSignal::new(String::new());
    let category_open: RwSignal<bool> = RwSignal::new(false);

    let save: SaveFn = Arc::new(move |note_id: i64, payload: UpdateNotePayload| -> SaveFuture {
        let client = api_client.get_untracked();
        Box::pin(async move { client.update_note(note_id, &payload).await })
    });
    let listener: Listener = Arc::new(move |s: &AutosaveSnapshot| snapshot.set(s.clone()));
    let autosave = AutosaveController::new(BrowserRuntime, save, listener);

    let live = LiveFlag::new();
    tear_down_on_cleanup(&live);
    {
        let autosave = autosave.clone();
        on_cleanup(move || autosave.teardown());
    }

    let raw_id = params
        .get_untracked()
        .ok()
        .and_then(|p| p.note_id)
        .unwrap_or_default();

    match parse_note_id(&raw_id) {
        None => {
            tracing::debug!(raw_id = %raw_id, "rejected note id");
            load_status.set(INVALID_NOTE_ID.to_string());
            loading.set(false);
        }
        Some(note_id) => {
            let live = live.clone();
            let autosave = autosave.clone();
            let client = api_client.get_untracked();
            spawn_local(async move {
                let (loaded_categories, loaded_note) =
                    futures::join!(client.get_categories(), client.get_note(note_id));
                if !live.is_alive() {
                    return;
                }
                let loaded = settle_pair(loaded_categories, loaded_note, LOAD_NOTE_FAILED);
                if let Some(c) = loaded.first {
                    categories.set(c);
                }
                if let Some(note) = loaded.second {
                    autosave.hydrate(&note);
                }
                if let Some(msg) = loaded.status {
                    load_status.set(msg);
                }
                loading.set(false);
            });
        }
    }

    let selected_category = Memo::new(move |_| {
        let id = snapshot.with(|s| s.draft.as_ref().map(|d| d.category_id))?;
        categories.with(|c| c.iter().find(|c| c.id == id).cloned())
    });
    let editor_style = move || {
        selected_category.with(|c| tint_style(c.as_ref().map(|c| c.color.as_str()).unwrap_or(""), "80"))
    };
    let last_edited = move || {
        let edited_at = snapshot.with(|s| s.edited_at.clone());
        if edited_at.is_empty() {
            "--".to_string()
        } else {
            format_last_edited(&edited_at)
        }
    };
    let status = move || {
        let load = load_status.get();
        if load.is_empty() {
            snapshot.with(|s| s.status.clone())
        } else {
            load
        }
    };

    let on_select_category = {
        let autosave = autosave.clone();
        Callback::new(move |category_id: i64| {
            autosave.edit(DraftEdit::Category(category_id));
            category_open.set(false);
        })
    };
    let on_title = {
        let autosave = autosave.clone();
        move |ev: web_sys::Event| autosave.edit(DraftEdit::Title(event_target_value(&ev)))
    };
    let on_content = {
        let autosave = autosave.clone();
        Callback::new(move |text: String| autosave.edit(DraftEdit::Content(text)))
    };

    view! {
        <main class="min-h-screen bg-amber-50">
            <div class="mx-auto flex w-full max-w-5xl flex-col gap-4 px-6 py-8">
                <div class="flex items-center justify-between">
                    <CategorySelector
                        options=categories
                        selected=Signal::derive(move || {
                            snapshot.with(|s| s.draft.as_ref().map(|d| d.category_id))
                        })
                        open=category_open
                        on_select=on_select_category
                    />
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:aria-label="Close editor"
                        on:click=move |_| navigate.with_value(|nav| nav("/home", Default::default()))
                    >
                        <X class="size-6" />
                    </Button>
                </div>

                <section
                    class="flex min-h-[70vh] flex-col gap-4 rounded-xl border-[3px] px-12 py-8"
                    style=editor_style
                >
                    <p class="text-right text-xs text-black">
                        "Last Edited: " {last_edited}
                    </p>

                    <Show
                        when=move || !loading.get() && snapshot.with(|s| s.draft.is_some())
                        fallback=|| view! {
                            <p class="flex items-center gap-2 text-sm text-black">
                                <Spinner label="Loading note" />
                                "Loading note..."
                            </p>
                        }
                    >
                        <input
                            class="bg-transparent font-serif text-2xl font-bold text-black outline-none placeholder:text-black/60"
                            placeholder="Note Title"
                            prop:value=move || snapshot.with(|s| s.draft.as_ref().map(|d| d.title.clone()).unwrap_or_default())
                            on:input=on_title.clone()
                        />
                        <Textarea
                            class="flex-1 border-none bg-transparent px-0 text-black placeholder:text-black/60 focus-visible:ring-0"
                            placeholder="Pour your heart out..."
                            value=Signal::derive(move || {
                                snapshot.with(|s| s.draft.as_ref().map(|d| d.content.clone()).unwrap_or_default())
                            })
                            on_change=on_content
                        />
                    </Show>

                    <Show when=move || !status().is_empty()>
                        <p role="status" class="text-sm text-black">{status}</p>
                    </Show>
                </section>
            </div>
        </main>
    }
}
