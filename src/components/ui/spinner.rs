use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Spinning loader. `label` is what screen readers announce.
#[component]
pub fn Spinner(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "Loading".to_string())] label: String,
) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin text-amber-900", class);

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label=label /> }
}
