//! Toolbar Component
//!
//! Row/period creation and example seeding.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TableClient;
use crate::context::AppContext;
use crate::models::RowCreate;

/// Toolbar above the grid: add a root row, add a period, seed the example.
#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let add_row = move |_| {
        spawn_local(async move {
            let request = RowCreate {
                entity: "Новое юрлицо".to_string(),
                article: "Новая статья".to_string(),
                project: "Новый проект".to_string(),
                ..Default::default()
            };
            match TableClient::new().create_row(&request).await {
                Ok(_) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка добавления строки: {e}").into()),
            }
        });
    };

    let add_period = move |_| {
        spawn_local(async move {
            match TableClient::new().create_period(None).await {
                Ok(_) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка добавления периода: {e}").into()),
            }
        });
    };

    let init_table = move |_| {
        spawn_local(async move {
            match TableClient::new().init_table().await {
                Ok(()) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка инициализации: {e}").into()),
            }
        });
    };

    view! {
        <div class="toolbar">
            <div class="toolbar-left">
                <button class="btn btn-primary" on:click=add_row>
                    <span class="btn-icon-text">"+"</span>
                    " Добавить строку"
                </button>
                <button class="btn btn-primary" on:click=add_period>
                    <span class="btn-icon-text">"+"</span>
                    " Добавить период"
                </button>
            </div>
            <button class="btn btn-secondary" on:click=init_table>
                "↻ Инициализировать пример"
            </button>
        </div>
    }
}
