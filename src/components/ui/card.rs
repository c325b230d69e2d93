use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    // Auth screens: one centered column, no chrome.
    clx! {Card, section, "flex w-full max-w-sm flex-col items-center gap-6"}
    clx! {CardTitle, h1, "font-serif text-4xl font-bold text-amber-900 text-center"}
    clx! {CardContent, div, "w-full"}
    clx! {CardFooter, p, "text-center text-sm"}
}

pub use components::*;
