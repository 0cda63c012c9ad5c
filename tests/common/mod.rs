//! In-memory mock of the budget-table API.
//!
//! Mirrors the server the client is written against: `GET /` returns rows as
//! a recursively nested tree, row deletes cascade to the subtree, cells are
//! upserted, and every new row/period gets a null cell for the other axis.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use budget_grid_ui::models::{Cell, Period, Row, RowCreate, TableData};

#[derive(Clone)]
struct RowRec {
    id: u32,
    order: i32,
    level: u32,
    parent_id: Option<u32>,
    entity: String,
    article: String,
    project: String,
}

#[derive(Default)]
struct TableState {
    periods: Vec<Period>,
    rows: Vec<RowRec>,
    cells: Vec<Cell>,
    next_id: u32,
}

impl TableState {
    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn add_cell(&mut self, row_id: u32, period_id: u32, value: Option<f64>) {
        let id = self.alloc_id();
        self.cells.push(Cell { id, row_id, period_id, value });
    }

    fn cells_for(&self, row_id: u32) -> Vec<Cell> {
        self.cells.iter().filter(|c| c.row_id == row_id).cloned().collect()
    }

    fn build_tree(&self, parent_id: Option<u32>) -> Vec<Row> {
        let mut rows: Vec<Row> = self
            .rows
            .iter()
            .filter(|r| r.parent_id == parent_id)
            .map(|r| Row {
                id: r.id,
                order: r.order,
                level: r.level,
                parent_id: r.parent_id,
                entity: r.entity.clone(),
                article: r.article.clone(),
                project: r.project.clone(),
                cells: self.cells_for(r.id),
                children: self.build_tree(Some(r.id)),
            })
            .collect();
        rows.sort_by_key(|r| r.order);
        rows
    }

    fn snapshot(&self) -> TableData {
        let mut periods = self.periods.clone();
        periods.sort_by_key(|p| p.order);
        TableData { periods, rows: self.build_tree(None) }
    }

    /// `root` and every row transitively below it.
    fn subtree_ids(&self, root: u32) -> Vec<u32> {
        let mut out = vec![root];
        let mut i = 0;
        while i < out.len() {
            let parent = out[i];
            out.extend(
                self.rows
                    .iter()
                    .filter(|r| r.parent_id == Some(parent))
                    .map(|r| r.id),
            );
            i += 1;
        }
        out
    }
}

type Db = Arc<Mutex<TableState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(Mutex::new(TableState::default()));
    Router::new()
        .route("/api/table/", get(get_table))
        .route("/api/table/init", post(init_table))
        .route("/api/table/cells/{row_id}/{period_id}", put(update_cell))
        .route("/api/table/rows", post(create_row))
        .route("/api/table/rows/{row_id}", put(update_row).delete(delete_row))
        .route("/api/table/periods", post(create_period))
        .route("/api/table/periods/{period_id}", delete(delete_period))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[derive(Deserialize)]
struct CellQuery {
    value: Option<f64>,
}

#[derive(Deserialize)]
struct RowFieldQuery {
    entity: Option<String>,
    article: Option<String>,
    project: Option<String>,
}

#[derive(Deserialize)]
struct PeriodQuery {
    name: Option<String>,
}

async fn get_table(State(db): State<Db>) -> Json<TableData> {
    Json(db.lock().unwrap().snapshot())
}

async fn init_table(State(db): State<Db>) -> Json<Value> {
    let mut state = db.lock().unwrap();
    if !state.periods.is_empty() {
        return Json(json!({"message": "Таблица уже инициализирована"}));
    }

    for (i, name) in ["45658", "45689", "45717", "45748", "45778"].iter().enumerate() {
        let id = state.alloc_id();
        state.periods.push(Period { id, name: name.to_string(), order: i as i32 });
    }

    let root_id = state.alloc_id();
    state.rows.push(RowRec {
        id: root_id,
        order: 0,
        level: 0,
        parent_id: None,
        entity: "ИКС".to_string(),
        article: "CS0198234".to_string(),
        project: "M5".to_string(),
    });
    for (order, project) in [(1, "Обслуживание патрубков"), (2, "1 кол-во дгу")] {
        let id = state.alloc_id();
        state.rows.push(RowRec {
            id,
            order,
            level: 1,
            parent_id: Some(root_id),
            entity: String::new(),
            article: String::new(),
            project: project.to_string(),
        });
    }

    let row_ids: Vec<u32> = state.rows.iter().map(|r| r.id).collect();
    let period_ids: Vec<u32> = state.periods.iter().map(|p| p.id).collect();
    for row_id in row_ids {
        for &period_id in &period_ids {
            state.add_cell(row_id, period_id, None);
        }
    }
    Json(json!({"message": "Создана структура как в примере Excel"}))
}

async fn update_cell(
    State(db): State<Db>,
    Path((row_id, period_id)): Path<(u32, u32)>,
    Query(q): Query<CellQuery>,
) -> Json<Cell> {
    let mut state = db.lock().unwrap();
    let existing = state
        .cells
        .iter()
        .position(|c| c.row_id == row_id && c.period_id == period_id);
    match existing {
        Some(i) => {
            state.cells[i].value = q.value;
            Json(state.cells[i].clone())
        }
        None => {
            let id = state.alloc_id();
            let cell = Cell { id, row_id, period_id, value: q.value };
            state.cells.push(cell.clone());
            Json(cell)
        }
    }
}

async fn create_row(
    State(db): State<Db>,
    Json(input): Json<RowCreate>,
) -> Result<Json<Row>, StatusCode> {
    let mut state = db.lock().unwrap();
    let level = match input.parent_id {
        Some(parent_id) => {
            let parent = state
                .rows
                .iter()
                .find(|r| r.id == parent_id)
                .ok_or(StatusCode::NOT_FOUND)?;
            parent.level + 1
        }
        None => 0,
    };
    let order = state.rows.iter().map(|r| r.order).max().map_or(0, |o| o + 1);
    let id = state.alloc_id();
    state.rows.push(RowRec {
        id,
        order,
        level,
        parent_id: input.parent_id,
        entity: input.entity.clone(),
        article: input.article.clone(),
        project: input.project.clone(),
    });
    let period_ids: Vec<u32> = state.periods.iter().map(|p| p.id).collect();
    for period_id in period_ids {
        state.add_cell(id, period_id, None);
    }
    Ok(Json(Row {
        id,
        order,
        level,
        parent_id: input.parent_id,
        entity: input.entity,
        article: input.article,
        project: input.project,
        cells: state.cells_for(id),
        children: Vec::new(),
    }))
}

async fn update_row(
    State(db): State<Db>,
    Path(row_id): Path<u32>,
    Query(q): Query<RowFieldQuery>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.lock().unwrap();
    let row = state
        .rows
        .iter_mut()
        .find(|r| r.id == row_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(entity) = q.entity {
        row.entity = entity;
    }
    if let Some(article) = q.article {
        row.article = article;
    }
    if let Some(project) = q.project {
        row.project = project;
    }
    Ok(Json(json!({"message": "Поля обновлены"})))
}

async fn delete_row(
    State(db): State<Db>,
    Path(row_id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.lock().unwrap();
    if !state.rows.iter().any(|r| r.id == row_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let doomed = state.subtree_ids(row_id);
    state.rows.retain(|r| !doomed.contains(&r.id));
    state.cells.retain(|c| !doomed.contains(&c.row_id));
    Ok(Json(json!({"message": "Строка удалена"})))
}

async fn create_period(State(db): State<Db>, Query(q): Query<PeriodQuery>) -> Json<Period> {
    let mut state = db.lock().unwrap();
    let order = state.periods.iter().map(|p| p.order).max().map_or(0, |o| o + 1);
    let name = q.name.unwrap_or_else(|| format!("Период {}", order + 1));
    let id = state.alloc_id();
    let period = Period { id, name, order };
    state.periods.push(period.clone());
    let row_ids: Vec<u32> = state.rows.iter().map(|r| r.id).collect();
    for row_id in row_ids {
        state.add_cell(row_id, id, None);
    }
    Json(period)
}

async fn delete_period(
    State(db): State<Db>,
    Path(period_id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.lock().unwrap();
    if !state.periods.iter().any(|p| p.id == period_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    state.periods.retain(|p| p.id != period_id);
    state.cells.retain(|c| c.period_id != period_id);
    Ok(Json(json!({"message": "Период удален"})))
}
