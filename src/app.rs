//! Budget Grid App
//!
//! Main application component: owns the table snapshot and the loading flag.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TableClient;
use crate::components::{BudgetTable, Toolbar};
use crate::context::AppContext;
use crate::models::TableData;

#[component]
pub fn App() -> impl IntoView {
    // State
    let (data, set_data) = signal(TableData::default());
    let (loading, set_loading) = signal(true);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(AppContext::new((reload_trigger, set_reload_trigger)));

    // Fetch the full snapshot on mount and after every mutation. A failed
    // load keeps whatever snapshot is already on screen.
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        spawn_local(async move {
            match TableClient::new().fetch_table().await {
                Ok(table) => {
                    web_sys::console::log_1(
                        &format!("[APP] Загружено строк: {}, trigger={}", table.rows.len(), trigger)
                            .into(),
                    );
                    set_data.set(table);
                    set_loading.set(false);
                }
                Err(e) => web_sys::console::error_1(&format!("Ошибка загрузки: {e}").into()),
            }
        });
    });

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| {
                view! {
                    <div class="loading-screen">
                        <div class="spinner"></div>
                        <p>"Загрузка данных..."</p>
                    </div>
                }
            }
        >
            <div class="app">
                <header class="app-header">
                    <div class="logo">
                        <div class="logo-icon">"◆"</div>
                        <h1>"Budget Pro"</h1>
                    </div>
                    <p class="subtitle">"Система управления бюджетом"</p>
                </header>

                <main class="main-content">
                    <Toolbar />
                    <BudgetTable data=data />
                </main>

                <footer class="app-footer">
                    <p>"Prototype v1.0 • Financial Department • 2025"</p>
                </footer>
            </div>
        </Show>
    }
}
