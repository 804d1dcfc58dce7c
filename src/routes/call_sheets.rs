//! `/call-sheets` routes — CRUD for daily call sheets.
//!
//! Saves are wholesale: every create/update replaces all four child
//! collections (scenes, schedule, staff, cast) in one transaction. There is no
//! per-row diffing and no conflict detection — the later save wins.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::Db,
    errors::{AppError, AppResult},
    models::{CallSheet, CallSheetDocument, CastMember, Project, Scene, ScheduleEntry, StaffEntry},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/call-sheets",      get(list_call_sheets).post(create_call_sheet))
        .route("/call-sheets/{id}", get(get_call_sheet).put(update_call_sheet).delete(delete_call_sheet))
}

const CALL_SHEET_COLUMNS: &str =
    "id, project_id, episode, shooting_day, shoot_date, weather, temp_min, temp_max, \
     precipitation, sunrise, sunset, director, producer, ad_name, location, address, \
     meeting_place, parking_info, emergency_contact, crew_call_time, talent_call_time, \
     general_notes, detail_direction, detail_assist_dir, detail_camera, detail_lighting, \
     detail_sound, detail_art, detail_wardrobe, detail_production, detail_etc, \
     created_at, updated_at";

const PROJECT_COLUMNS: &str =
    "id, user_id, title, type, production_co, director, producer, ad_name, \
     start_date, end_date, status, created_at, updated_at";

// ── Row types ────────────────────────────────────────────────

#[derive(sqlx::FromRow, Serialize)]
struct CallSheetListRow {
    id:            String,
    project_id:    String,
    project_title: String,
    episode:       Option<String>,
    shooting_day:  i32,
    shoot_date:    chrono::NaiveDate,
    scene_count:   i64,
}

// ── Request bodies ───────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    project_id: Option<String>,
}

/// The full call-sheet form payload. Child collections replace whatever is
/// stored; an omitted collection clears it.
#[derive(Deserialize, Validate)]
struct CallSheetBody {
    project_id:        String,
    episode:           Option<String>,
    #[validate(range(min = 1))]
    shooting_day:      i32,
    shoot_date:        chrono::NaiveDate,
    weather:           Option<String>,
    temp_min:          Option<String>,
    temp_max:          Option<String>,
    precipitation:     Option<String>,
    sunrise:           Option<String>,
    sunset:            Option<String>,
    director:          Option<String>,
    producer:          Option<String>,
    ad_name:           Option<String>,
    location:          Option<String>,
    address:           Option<String>,
    meeting_place:     Option<String>,
    parking_info:      Option<String>,
    emergency_contact: Option<String>,
    crew_call_time:    Option<String>,
    talent_call_time:  Option<String>,
    general_notes:     Option<String>,
    detail_direction:  Option<String>,
    detail_assist_dir: Option<String>,
    detail_camera:     Option<String>,
    detail_lighting:   Option<String>,
    detail_sound:      Option<String>,
    detail_art:        Option<String>,
    detail_wardrobe:   Option<String>,
    detail_production: Option<String>,
    detail_etc:        Option<String>,
    #[serde(default)]
    #[validate(nested)]
    scenes:            Vec<SceneBody>,
    #[serde(default)]
    schedules:         Vec<ScheduleBody>,
    #[serde(default)]
    staff:             Vec<StaffBody>,
    #[serde(default)]
    cast:              Vec<CastBody>,
}

#[derive(Deserialize, Validate)]
struct SceneBody {
    ord:            Option<i32>,
    #[validate(length(min = 1, max = 50))]
    scene_number:   String,
    description:    Option<String>,
    location_type:  Option<String>,
    location_name:  Option<String>,
    day_night:      Option<String>,
    pages:          Option<String>,
    #[validate(range(min = 0))]
    estimated_time: Option<i32>,
    start_time:     Option<String>,
    cast:           Option<String>,
    notes:          Option<String>,
}

#[derive(Deserialize)]
struct ScheduleBody {
    ord:     Option<i32>,
    time:    Option<String>,
    content: Option<String>,
}

#[derive(Deserialize)]
struct StaffBody {
    ord:      Option<i32>,
    position: Option<String>,
    name:     Option<String>,
    contact:  Option<String>,
}

#[derive(Deserialize)]
struct CastBody {
    ord:           Option<i32>,
    role:          Option<String>,
    actor_name:    Option<String>,
    call_time:     Option<String>,
    call_location: Option<String>,
    scenes:        Option<String>,
    preparation:   Option<String>,
    contact:       Option<String>,
}

// ── Document loader (shared with the export routes) ──────────

/// Fetch a call sheet fully joined: project plus all four child collections
/// in ordinal order. `NotFound` when the sheet does not exist; any other
/// database failure propagates as an internal error, so callers can
/// short-circuit a missing sheet without touching the renderers.
pub async fn load_call_sheet_document(pool: &Db, id: &str) -> AppResult<CallSheetDocument> {
    let sheet: CallSheet = sqlx::query_as::<_, CallSheet>(&format!(
        "SELECT {CALL_SHEET_COLUMNS} FROM call_sheets WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    let project: Project = sqlx::query_as::<_, Project>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"
    ))
    .bind(&sheet.project_id)
    .fetch_one(pool)
    .await?;

    let scenes: Vec<Scene> = sqlx::query_as::<_, Scene>(
        "SELECT id, call_sheet_id, ord, scene_number, description, location_type, location_name,
                day_night, pages, estimated_time, start_time, `cast`, notes
         FROM scenes WHERE call_sheet_id = ? ORDER BY ord",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let schedules: Vec<ScheduleEntry> = sqlx::query_as::<_, ScheduleEntry>(
        "SELECT id, call_sheet_id, ord, time, content
         FROM schedule_entries WHERE call_sheet_id = ? ORDER BY ord",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let staff: Vec<StaffEntry> = sqlx::query_as::<_, StaffEntry>(
        "SELECT id, call_sheet_id, ord, position, name, contact
         FROM staff_entries WHERE call_sheet_id = ? ORDER BY ord",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let cast: Vec<CastMember> = sqlx::query_as::<_, CastMember>(
        "SELECT id, call_sheet_id, ord, role, actor_name, call_time, call_location,
                scenes, preparation, contact
         FROM cast_members WHERE call_sheet_id = ? ORDER BY ord",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(CallSheetDocument {
        project,
        sheet,
        scenes,
        schedules,
        staff,
        cast,
    })
}

// ── Handlers ─────────────────────────────────────────────────

async fn list_call_sheets(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> AppResult<Json<Vec<CallSheetListRow>>> {
    let pool = &state.pool;
    let rows: Vec<CallSheetListRow> = if let Some(project_id) = &q.project_id {
        sqlx::query_as::<_, CallSheetListRow>(
            "SELECT
                cs.id, cs.project_id, p.title AS project_title, cs.episode,
                cs.shooting_day, cs.shoot_date,
                (SELECT COUNT(*) FROM scenes s WHERE s.call_sheet_id = cs.id) AS scene_count
             FROM call_sheets cs
             JOIN projects p ON p.id = cs.project_id
             WHERE cs.project_id = ?
             ORDER BY cs.shoot_date DESC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, CallSheetListRow>(
            "SELECT
                cs.id, cs.project_id, p.title AS project_title, cs.episode,
                cs.shooting_day, cs.shoot_date,
                (SELECT COUNT(*) FROM scenes s WHERE s.call_sheet_id = cs.id) AS scene_count
             FROM call_sheets cs
             JOIN projects p ON p.id = cs.project_id
             ORDER BY cs.shoot_date DESC",
        )
        .fetch_all(pool)
        .await?
    };
    Ok(Json(rows))
}

async fn create_call_sheet(
    State(state): State<AppState>,
    Json(body): Json<CallSheetBody>,
) -> AppResult<(StatusCode, Json<CallSheetDocument>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let project_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?)")
            .bind(&body.project_id)
            .fetch_one(&state.pool)
            .await?;
    if !project_exists {
        return Err(AppError::BadRequest("project_id does not exist".into()));
    }

    let id = Uuid::new_v4().to_string();
    let mut tx = state.pool.begin().await?;

    sqlx::query(
        "INSERT INTO call_sheets
         (id, project_id, episode, shooting_day, shoot_date, weather, temp_min, temp_max,
          precipitation, sunrise, sunset, director, producer, ad_name, location, address,
          meeting_place, parking_info, emergency_contact, crew_call_time, talent_call_time,
          general_notes, detail_direction, detail_assist_dir, detail_camera, detail_lighting,
          detail_sound, detail_art, detail_wardrobe, detail_production, detail_etc)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&body.project_id)
    .bind(&body.episode)
    .bind(body.shooting_day)
    .bind(body.shoot_date)
    .bind(&body.weather)
    .bind(&body.temp_min)
    .bind(&body.temp_max)
    .bind(&body.precipitation)
    .bind(&body.sunrise)
    .bind(&body.sunset)
    .bind(&body.director)
    .bind(&body.producer)
    .bind(&body.ad_name)
    .bind(&body.location)
    .bind(&body.address)
    .bind(&body.meeting_place)
    .bind(&body.parking_info)
    .bind(&body.emergency_contact)
    .bind(&body.crew_call_time)
    .bind(&body.talent_call_time)
    .bind(&body.general_notes)
    .bind(&body.detail_direction)
    .bind(&body.detail_assist_dir)
    .bind(&body.detail_camera)
    .bind(&body.detail_lighting)
    .bind(&body.detail_sound)
    .bind(&body.detail_art)
    .bind(&body.detail_wardrobe)
    .bind(&body.detail_production)
    .bind(&body.detail_etc)
    .execute(&mut *tx)
    .await?;

    insert_children(&mut tx, &id, &body).await?;
    tx.commit().await?;

    let document = load_call_sheet_document(&state.pool, &id).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn get_call_sheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CallSheetDocument>> {
    let document = load_call_sheet_document(&state.pool, &id).await?;
    Ok(Json(document))
}

/// Wholesale update: rewrite the parent row, drop all four child collections
/// and recreate them from the payload, in a single transaction. Given
/// identical input this is idempotent.
async fn update_call_sheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CallSheetBody>,
) -> AppResult<Json<CallSheetDocument>> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM call_sheets WHERE id = ?)")
        .bind(&id)
        .fetch_one(&state.pool)
        .await?;
    if !exists {
        return Err(AppError::NotFound);
    }

    let mut tx = state.pool.begin().await?;

    sqlx::query(
        "UPDATE call_sheets SET
            episode = ?, shooting_day = ?, shoot_date = ?, weather = ?, temp_min = ?,
            temp_max = ?, precipitation = ?, sunrise = ?, sunset = ?, director = ?,
            producer = ?, ad_name = ?, location = ?, address = ?, meeting_place = ?,
            parking_info = ?, emergency_contact = ?, crew_call_time = ?, talent_call_time = ?,
            general_notes = ?, detail_direction = ?, detail_assist_dir = ?, detail_camera = ?,
            detail_lighting = ?, detail_sound = ?, detail_art = ?, detail_wardrobe = ?,
            detail_production = ?, detail_etc = ?
         WHERE id = ?",
    )
    .bind(&body.episode)
    .bind(body.shooting_day)
    .bind(body.shoot_date)
    .bind(&body.weather)
    .bind(&body.temp_min)
    .bind(&body.temp_max)
    .bind(&body.precipitation)
    .bind(&body.sunrise)
    .bind(&body.sunset)
    .bind(&body.director)
    .bind(&body.producer)
    .bind(&body.ad_name)
    .bind(&body.location)
    .bind(&body.address)
    .bind(&body.meeting_place)
    .bind(&body.parking_info)
    .bind(&body.emergency_contact)
    .bind(&body.crew_call_time)
    .bind(&body.talent_call_time)
    .bind(&body.general_notes)
    .bind(&body.detail_direction)
    .bind(&body.detail_assist_dir)
    .bind(&body.detail_camera)
    .bind(&body.detail_lighting)
    .bind(&body.detail_sound)
    .bind(&body.detail_art)
    .bind(&body.detail_wardrobe)
    .bind(&body.detail_production)
    .bind(&body.detail_etc)
    .bind(&id)
    .execute(&mut *tx)
    .await?;

    for table in ["scenes", "schedule_entries", "staff_entries", "cast_members"] {
        sqlx::query(&format!("DELETE FROM {table} WHERE call_sheet_id = ?"))
            .bind(&id)
            .execute(&mut *tx)
            .await?;
    }

    insert_children(&mut tx, &id, &body).await?;
    tx.commit().await?;

    let document = load_call_sheet_document(&state.pool, &id).await?;
    Ok(Json(document))
}

async fn delete_call_sheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let result = sqlx::query("DELETE FROM call_sheets WHERE id = ?")
        .bind(&id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── Child inserts ────────────────────────────────────────────

/// Insert all four child collections. Positions use the supplied ordinal when
/// present, otherwise the array index, so every save leaves a contiguous
/// zero-based ordering.
async fn insert_children(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    sheet_id: &str,
    body: &CallSheetBody,
) -> AppResult<()> {
    for (index, scene) in body.scenes.iter().enumerate() {
        sqlx::query(
            "INSERT INTO scenes
             (id, call_sheet_id, ord, scene_number, description, location_type, location_name,
              day_night, pages, estimated_time, start_time, `cast`, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(sheet_id)
        .bind(scene.ord.unwrap_or(index as i32))
        .bind(&scene.scene_number)
        .bind(&scene.description)
        .bind(&scene.location_type)
        .bind(&scene.location_name)
        .bind(&scene.day_night)
        .bind(&scene.pages)
        .bind(scene.estimated_time)
        .bind(&scene.start_time)
        .bind(&scene.cast)
        .bind(&scene.notes)
        .execute(&mut **tx)
        .await?;
    }

    for (index, entry) in body.schedules.iter().enumerate() {
        sqlx::query(
            "INSERT INTO schedule_entries (id, call_sheet_id, ord, time, content) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(sheet_id)
        .bind(entry.ord.unwrap_or(index as i32))
        .bind(&entry.time)
        .bind(&entry.content)
        .execute(&mut **tx)
        .await?;
    }

    for (index, entry) in body.staff.iter().enumerate() {
        sqlx::query(
            "INSERT INTO staff_entries (id, call_sheet_id, ord, position, name, contact) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(sheet_id)
        .bind(entry.ord.unwrap_or(index as i32))
        .bind(&entry.position)
        .bind(&entry.name)
        .bind(&entry.contact)
        .execute(&mut **tx)
        .await?;
    }

    for (index, member) in body.cast.iter().enumerate() {
        sqlx::query(
            "INSERT INTO cast_members
             (id, call_sheet_id, ord, role, actor_name, call_time, call_location, scenes, preparation, contact)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(sheet_id)
        .bind(member.ord.unwrap_or(index as i32))
        .bind(&member.role)
        .bind(&member.actor_name)
        .bind(&member.call_time)
        .bind(&member.call_location)
        .bind(&member.scenes)
        .bind(&member.preparation)
        .bind(&member.contact)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
