//! `/projects` routes — CRUD for productions and their staff/cast pools.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    middleware::auth_guard::AuthUser,
    models::{Project, ProjectCast, ProjectStaff, ProjectStatus},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects",            get(list_projects).post(create_project))
        .route("/projects/{id}",       get(get_project).put(update_project).delete(delete_project))
        .route("/projects/{id}/staff", get(list_staff).post(add_staff).put(replace_staff))
        .route("/projects/{id}/cast",  get(list_cast).post(add_cast).put(replace_cast))
}

const PROJECT_COLUMNS: &str =
    "id, user_id, title, type, production_co, director, producer, ad_name, \
     start_date, end_date, status, created_at, updated_at";

// ── Row types ────────────────────────────────────────────────

#[derive(sqlx::FromRow, Serialize)]
struct ProjectListRow {
    id:               String,
    title:            String,
    r#type:           Option<String>,
    director:         Option<String>,
    status:           ProjectStatus,
    call_sheet_count: i64,
    updated_at:       chrono::NaiveDateTime,
}

#[derive(sqlx::FromRow, Serialize)]
struct CallSheetSummaryRow {
    id:           String,
    episode:      Option<String>,
    shooting_day: i32,
    shoot_date:   chrono::NaiveDate,
    scene_count:  i64,
}

#[derive(Serialize)]
struct ProjectDetail {
    #[serde(flatten)]
    project:     Project,
    call_sheets: Vec<CallSheetSummaryRow>,
}

// ── Request bodies ───────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct CreateProjectBody {
    #[validate(length(min = 1, max = 255))]
    title:         String,
    r#type:        Option<String>,
    production_co: Option<String>,
    director:      Option<String>,
    producer:      Option<String>,
    ad_name:       Option<String>,
    start_date:    Option<chrono::NaiveDate>,
    end_date:      Option<chrono::NaiveDate>,
    status:        Option<ProjectStatus>,
}

#[derive(Deserialize, Validate)]
struct UpdateProjectBody {
    #[validate(length(min = 1, max = 255))]
    title:         String,
    r#type:        Option<String>,
    production_co: Option<String>,
    director:      Option<String>,
    producer:      Option<String>,
    ad_name:       Option<String>,
    start_date:    Option<chrono::NaiveDate>,
    end_date:      Option<chrono::NaiveDate>,
    status:        ProjectStatus,
}

#[derive(Deserialize, Validate)]
struct StaffBody {
    #[validate(length(min = 1, max = 100))]
    name:     String,
    #[validate(length(min = 1, max = 100))]
    position: String,
    contact:  Option<String>,
}

#[derive(Deserialize, Validate)]
struct ReplaceStaffBody {
    #[validate(nested)]
    staff: Vec<StaffBody>,
}

#[derive(Deserialize, Validate)]
struct CastBody {
    #[validate(length(min = 1, max = 100))]
    actor_name: String,
    #[validate(length(min = 1, max = 100))]
    role:       String,
    contact:    Option<String>,
}

#[derive(Deserialize, Validate)]
struct ReplaceCastBody {
    #[validate(nested)]
    cast: Vec<CastBody>,
}

// ── Helpers ──────────────────────────────────────────────────

fn validate(body: &impl Validate) -> AppResult<()> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn assert_project_exists(pool: &crate::db::Db, id: &str) -> AppResult<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if !exists {
        return Err(AppError::NotFound);
    }
    Ok(())
}

async fn fetch_project(pool: &crate::db::Db, id: &str) -> AppResult<Project> {
    sqlx::query_as::<_, Project>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

// ── Project handlers ─────────────────────────────────────────

async fn list_projects(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectListRow>>> {
    let rows: Vec<ProjectListRow> = sqlx::query_as::<_, ProjectListRow>(
        "SELECT
            p.id,
            p.title,
            p.type,
            p.director,
            p.status,
            p.updated_at,
            (
                SELECT COUNT(*)
                FROM call_sheets cs
                WHERE cs.project_id = p.id
            ) AS call_sheet_count
         FROM projects p
         ORDER BY p.updated_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}

async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateProjectBody>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate(&body)?;

    let id = Uuid::new_v4().to_string();
    let status = body.status.unwrap_or(ProjectStatus::Prep);

    sqlx::query(
        "INSERT INTO projects
         (id, user_id, title, type, production_co, director, producer, ad_name, start_date, end_date, status)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&user.user_id)
    .bind(&body.title)
    .bind(&body.r#type)
    .bind(&body.production_co)
    .bind(&body.director)
    .bind(&body.producer)
    .bind(&body.ad_name)
    .bind(body.start_date)
    .bind(body.end_date)
    .bind(&status)
    .execute(&state.pool)
    .await?;

    let project = fetch_project(&state.pool, &id).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectDetail>> {
    let project = fetch_project(&state.pool, &id).await?;

    let call_sheets: Vec<CallSheetSummaryRow> = sqlx::query_as::<_, CallSheetSummaryRow>(
        "SELECT
            cs.id,
            cs.episode,
            cs.shooting_day,
            cs.shoot_date,
            (
                SELECT COUNT(*)
                FROM scenes s
                WHERE s.call_sheet_id = cs.id
            ) AS scene_count
         FROM call_sheets cs
         WHERE cs.project_id = ?
         ORDER BY cs.shoot_date DESC",
    )
    .bind(&id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(ProjectDetail { project, call_sheets }))
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectBody>,
) -> AppResult<Json<Project>> {
    validate(&body)?;
    assert_project_exists(&state.pool, &id).await?;

    sqlx::query(
        "UPDATE projects
         SET title = ?, type = ?, production_co = ?, director = ?, producer = ?,
             ad_name = ?, start_date = ?, end_date = ?, status = ?
         WHERE id = ?",
    )
    .bind(&body.title)
    .bind(&body.r#type)
    .bind(&body.production_co)
    .bind(&body.director)
    .bind(&body.producer)
    .bind(&body.ad_name)
    .bind(body.start_date)
    .bind(body.end_date)
    .bind(&body.status)
    .bind(&id)
    .execute(&state.pool)
    .await?;

    let project = fetch_project(&state.pool, &id).await?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    assert_project_exists(&state.pool, &id).await?;

    // Call sheets, pool staff and pool cast go with it (FK cascade).
    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(&id)
        .execute(&state.pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ── Staff pool handlers ──────────────────────────────────────

async fn list_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ProjectStaff>>> {
    assert_project_exists(&state.pool, &id).await?;

    let rows: Vec<ProjectStaff> = sqlx::query_as::<_, ProjectStaff>(
        "SELECT id, project_id, name, position, contact, created_at
         FROM project_staff WHERE project_id = ? ORDER BY created_at ASC",
    )
    .bind(&id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}

async fn add_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StaffBody>,
) -> AppResult<(StatusCode, Json<ProjectStaff>)> {
    validate(&body)?;
    assert_project_exists(&state.pool, &id).await?;

    let staff_id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO project_staff (id, project_id, name, position, contact) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&staff_id)
    .bind(&id)
    .bind(&body.name)
    .bind(&body.position)
    .bind(&body.contact)
    .execute(&state.pool)
    .await?;

    let row: ProjectStaff = sqlx::query_as::<_, ProjectStaff>(
        "SELECT id, project_id, name, position, contact, created_at FROM project_staff WHERE id = ?",
    )
    .bind(&staff_id)
    .fetch_one(&state.pool)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Wholesale replace of the project staff pool (delete-all, insert-all in one
/// transaction) — the same save model the call-sheet children use.
async fn replace_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReplaceStaffBody>,
) -> AppResult<Json<Vec<ProjectStaff>>> {
    validate(&body)?;
    assert_project_exists(&state.pool, &id).await?;

    let mut tx = state.pool.begin().await?;

    sqlx::query("DELETE FROM project_staff WHERE project_id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    for staff in &body.staff {
        sqlx::query(
            "INSERT INTO project_staff (id, project_id, name, position, contact) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&id)
        .bind(&staff.name)
        .bind(&staff.position)
        .bind(&staff.contact)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let rows: Vec<ProjectStaff> = sqlx::query_as::<_, ProjectStaff>(
        "SELECT id, project_id, name, position, contact, created_at
         FROM project_staff WHERE project_id = ? ORDER BY created_at ASC",
    )
    .bind(&id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}

// ── Cast pool handlers ───────────────────────────────────────

async fn list_cast(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ProjectCast>>> {
    assert_project_exists(&state.pool, &id).await?;

    let rows: Vec<ProjectCast> = sqlx::query_as::<_, ProjectCast>(
        "SELECT id, project_id, actor_name, role, contact, created_at
         FROM project_cast WHERE project_id = ? ORDER BY created_at ASC",
    )
    .bind(&id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}

async fn add_cast(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CastBody>,
) -> AppResult<(StatusCode, Json<ProjectCast>)> {
    validate(&body)?;
    assert_project_exists(&state.pool, &id).await?;

    let cast_id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO project_cast (id, project_id, actor_name, role, contact) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&cast_id)
    .bind(&id)
    .bind(&body.actor_name)
    .bind(&body.role)
    .bind(&body.contact)
    .execute(&state.pool)
    .await?;

    let row: ProjectCast = sqlx::query_as::<_, ProjectCast>(
        "SELECT id, project_id, actor_name, role, contact, created_at FROM project_cast WHERE id = ?",
    )
    .bind(&cast_id)
    .fetch_one(&state.pool)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn replace_cast(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReplaceCastBody>,
) -> AppResult<Json<Vec<ProjectCast>>> {
    validate(&body)?;
    assert_project_exists(&state.pool, &id).await?;

    let mut tx = state.pool.begin().await?;

    sqlx::query("DELETE FROM project_cast WHERE project_id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    for cast in &body.cast {
        sqlx::query(
            "INSERT INTO project_cast (id, project_id, actor_name, role, contact) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&id)
        .bind(&cast.actor_name)
        .bind(&cast.role)
        .bind(&cast.contact)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let rows: Vec<ProjectCast> = sqlx::query_as::<_, ProjectCast>(
        "SELECT id, project_id, actor_name, role, contact, created_at
         FROM project_cast WHERE project_id = ? ORDER BY created_at ASC",
    )
    .bind(&id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}
