use leptos::prelude::*;

/// Top application bar.
#[component]
pub fn TopHeader() -> impl IntoView {
    view! {
        <header class="top-header">
            <div class="top-header__content">
                <span class="top-header__title">"Pesagem - Abastecimento"</span>
            </div>
        </header>
    }
}
