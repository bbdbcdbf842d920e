use crate::layout::header::TopHeader;
use crate::usecases::u501_gestao_ordens::ui::list::GestaoOrdensPage;
use leptos::prelude::*;

// Single-page app: the order-management dashboard is the only screen, so no
// client router is mounted (the backend serves it on every path).
#[component]
pub fn App() -> impl IntoView {
    view! {
        <TopHeader />
        <GestaoOrdensPage />
    }
}
