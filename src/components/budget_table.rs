//! Budget Table Component
//!
//! The spreadsheet-like grid: one column per period, one `<tr>` per row of
//! the flattened hierarchy. The whole body re-renders on every snapshot.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TableClient;
use crate::components::TableRow;
use crate::context::AppContext;
use crate::models::TableData;
use crate::tree::{count_rows, flatten_rows};

#[component]
pub fn BudgetTable(data: ReadSignal<TableData>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let init_table = move |_| {
        spawn_local(async move {
            match TableClient::new().init_table().await {
                Ok(()) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка инициализации: {e}").into()),
            }
        });
    };

    let delete_period = move |period_id: u32| {
        spawn_local(async move {
            match TableClient::new().delete_period(period_id).await {
                Ok(()) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка удаления периода: {e}").into()),
            }
        });
    };

    view! {
        <div class="table-card">
            <div class="table-header">
                <h2>"Бюджетная таблица"</h2>
                <span class="badge">
                    {move || format!("{} строк", count_rows(&data.get().rows))}
                </span>
            </div>

            <div class="table-wrapper">
                <table class="budget-table">
                    <thead>
                        <tr>
                            <th class="actions-header"></th>
                            <th class="fixed-header">"Юр. лицо"</th>
                            <th class="fixed-header">"Статья"</th>
                            <th class="fixed-header">"Проект"</th>
                            {move || {
                                data.get()
                                    .periods
                                    .into_iter()
                                    .map(|period| {
                                        let period_id = period.id;
                                        view! {
                                            <th class="period-header">
                                                {period.name}
                                                <span
                                                    class="delete-period"
                                                    title="Удалить период"
                                                    on:click=move |_| delete_period(period_id)
                                                >
                                                    "×"
                                                </span>
                                            </th>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let table = data.get();
                            if table.rows.is_empty() {
                                let span = (4 + table.periods.len()).to_string();
                                view! {
                                    <tr>
                                        <td colspan=span class="empty-state">
                                            <div class="empty-content">
                                                <p>"Таблица пуста"</p>
                                                <button class="btn btn-primary" on:click=init_table>
                                                    "Создать пример"
                                                </button>
                                            </div>
                                        </td>
                                    </tr>
                                }
                                    .into_any()
                            } else {
                                let periods = table.periods;
                                flatten_rows(&table.rows)
                                    .into_iter()
                                    .map(|row| {
                                        view! { <TableRow row=row periods=periods.clone() /> }
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
