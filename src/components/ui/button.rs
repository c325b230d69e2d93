use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-full text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 shrink-0 [&_svg]:shrink-0 outline-none focus-visible:ring-ring/50 focus-visible:ring-[3px] hover:cursor-pointer active:scale-[0.98] touch-manipulation select-none",
        variants: {
            variant: {
                Default: "border border-amber-800 bg-transparent text-amber-900 hover:bg-amber-800/10",
                Solid: "bg-amber-800 text-amber-50 shadow-xs hover:bg-amber-800/90",
                Ghost: "hover:bg-amber-800/10 text-amber-900",
                Link: "text-amber-900 underline-offset-4 hover:underline",
            },
            size: {
                Default: "h-10 px-5 py-2 has-[>svg]:px-4",
                Sm: "h-8 gap-1.5 px-3 has-[>svg]:px-2.5",
                Lg: "h-12 px-8 text-base",
                Icon: "size-9",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
