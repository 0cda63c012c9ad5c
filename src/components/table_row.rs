//! Table Row Component
//!
//! One budget line of the grid. The caller hands rows in display order; the
//! nesting level only shows as indentation of the first text field.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TableClient;
use crate::context::AppContext;
use crate::models::{format_cell_value, parse_cell_value, Period, Row, RowCreate, RowField};
use crate::tree::{find_cell, indent_px};

/// A single row: action buttons, three text fields, one numeric input per period.
#[component]
pub fn TableRow(row: Row, periods: Vec<Period>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = row.id;
    let indent = indent_px(row.level);
    let level_class = format!("level-{}", row.level);

    let add_child = move |_| {
        spawn_local(async move {
            let request = RowCreate {
                parent_id: Some(id),
                project: "Подстрока".to_string(),
                ..Default::default()
            };
            match TableClient::new().create_row(&request).await {
                Ok(_) => ctx.reload(),
                Err(e) => {
                    web_sys::console::error_1(&format!("Ошибка добавления подстроки: {e}").into())
                }
            }
        });
    };

    let delete_row = move |_| {
        spawn_local(async move {
            match TableClient::new().delete_row(id).await {
                Ok(()) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка удаления строки: {e}").into()),
            }
        });
    };

    let update_field = move |field: RowField, value: String| {
        spawn_local(async move {
            match TableClient::new().update_row_field(id, field, &value).await {
                Ok(()) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка обновления поля: {e}").into()),
            }
        });
    };

    let update_cell = move |period_id: u32, raw: String| {
        let value = match parse_cell_value(&raw) {
            Ok(value) => value,
            Err(_) => {
                web_sys::console::error_1(&format!("Некорректное значение ячейки: {raw}").into());
                return;
            }
        };
        spawn_local(async move {
            match TableClient::new().update_cell(id, period_id, value).await {
                Ok(()) => ctx.reload(),
                Err(e) => web_sys::console::error_1(&format!("Ошибка обновления ячейки: {e}").into()),
            }
        });
    };

    let entity = row.entity.clone();
    let article = row.article.clone();
    let project = row.project.clone();

    let period_cells = periods
        .into_iter()
        .map(|period| {
            let period_id = period.id;
            let value = format_cell_value(find_cell(&row, period_id).and_then(|cell| cell.value));
            view! {
                <td class="period-cell">
                    <input
                        type="number"
                        step="any"
                        placeholder="—"
                        prop:value=value
                        on:change=move |ev| update_cell(period_id, event_target_value(&ev))
                    />
                </td>
            }
        })
        .collect_view();

    view! {
        <tr class=level_class>
            <td class="actions-cell">
                <div class="row-controls">
                    <button class="btn-icon btn-add" title="Добавить подстроку" on:click=add_child>
                        "+"
                    </button>
                    <button class="btn-icon btn-delete" title="Удалить" on:click=delete_row>
                        "×"
                    </button>
                </div>
            </td>
            <td class="fixed-col">
                <input
                    type="text"
                    placeholder="Юр. лицо"
                    style=format!("padding-left: {}px;", indent + 12)
                    prop:value=entity
                    on:change=move |ev| update_field(RowField::Entity, event_target_value(&ev))
                />
            </td>
            <td class="fixed-col">
                <input
                    type="text"
                    placeholder="Статья"
                    prop:value=article
                    on:change=move |ev| update_field(RowField::Article, event_target_value(&ev))
                />
            </td>
            <td class="fixed-col">
                <input
                    type="text"
                    placeholder="Проект"
                    prop:value=project
                    on:change=move |ev| update_field(RowField::Project, event_target_value(&ev))
                />
            </td>
            {period_cells}
        </tr>
    }
}
