#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ── Users ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id:            String,
    pub email:         String,
    pub password_hash: String,
    pub created_at:    NaiveDateTime,
    pub updated_at:    NaiveDateTime,
}

// ── Sessions ─────────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserSession {
    pub id:         String,
    pub user_id:    String,
    pub token:      String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

// ── Projects ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "VARCHAR", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    Prep,
    Shooting,
    Post,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectStatus::Prep      => "PREP",
            ProjectStatus::Shooting  => "SHOOTING",
            ProjectStatus::Post      => "POST",
            ProjectStatus::Completed => "COMPLETED",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id:            String,
    pub user_id:       Option<String>,
    pub title:         String,
    pub r#type:        Option<String>,
    pub production_co: Option<String>,
    pub director:      Option<String>,
    pub producer:      Option<String>,
    pub ad_name:       Option<String>,
    pub start_date:    Option<NaiveDate>,
    pub end_date:      Option<NaiveDate>,
    pub status:        ProjectStatus,
    pub created_at:    NaiveDateTime,
    pub updated_at:    NaiveDateTime,
}

// ── Project pools ─────────────────────────────────────────────
// Reusable rosters scoped to a project. Call-sheet entries copied from a pool
// are independent value snapshots; editing one never touches the other.

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectStaff {
    pub id:         String,
    pub project_id: String,
    pub name:       String,
    pub position:   String,
    pub contact:    Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectCast {
    pub id:         String,
    pub project_id: String,
    pub actor_name: String,
    pub role:       String,
    pub contact:    Option<String>,
    pub created_at: NaiveDateTime,
}

// ── Call sheets ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CallSheet {
    pub id:                String,
    pub project_id:        String,
    pub episode:           Option<String>,
    pub shooting_day:      i32,
    pub shoot_date:        NaiveDate,
    pub weather:           Option<String>,
    pub temp_min:          Option<String>,
    pub temp_max:          Option<String>,
    pub precipitation:     Option<String>,
    pub sunrise:           Option<String>,
    pub sunset:            Option<String>,
    pub director:          Option<String>,
    pub producer:          Option<String>,
    pub ad_name:           Option<String>,
    pub location:          Option<String>,
    pub address:           Option<String>,
    pub meeting_place:     Option<String>,
    pub parking_info:      Option<String>,
    pub emergency_contact: Option<String>,
    pub crew_call_time:    Option<String>,
    pub talent_call_time:  Option<String>,
    pub general_notes:     Option<String>,
    pub detail_direction:  Option<String>,
    pub detail_assist_dir: Option<String>,
    pub detail_camera:     Option<String>,
    pub detail_lighting:   Option<String>,
    pub detail_sound:      Option<String>,
    pub detail_art:        Option<String>,
    pub detail_wardrobe:   Option<String>,
    pub detail_production: Option<String>,
    pub detail_etc:        Option<String>,
    pub created_at:        NaiveDateTime,
    pub updated_at:        NaiveDateTime,
}

// ── Call sheet children ───────────────────────────────────────
// `ord` is the explicit render/print position, renumbered on every save.

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Scene {
    pub id:             String,
    pub call_sheet_id:  String,
    pub ord:            i32,
    pub scene_number:   String,
    pub description:    Option<String>,
    pub location_type:  Option<String>,
    pub location_name:  Option<String>,
    pub day_night:      Option<String>,
    pub pages:          Option<String>,
    pub estimated_time: Option<i32>,
    pub start_time:     Option<String>,
    pub cast:           Option<String>,
    pub notes:          Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScheduleEntry {
    pub id:            String,
    pub call_sheet_id: String,
    pub ord:           i32,
    pub time:          Option<String>,
    pub content:       Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffEntry {
    pub id:            String,
    pub call_sheet_id: String,
    pub ord:           i32,
    pub position:      Option<String>,
    pub name:          Option<String>,
    pub contact:       Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CastMember {
    pub id:            String,
    pub call_sheet_id: String,
    pub ord:           i32,
    pub role:          Option<String>,
    pub actor_name:    Option<String>,
    pub call_time:     Option<String>,
    pub call_location: Option<String>,
    pub scenes:        Option<String>,
    pub preparation:   Option<String>,
    pub contact:       Option<String>,
}

// ── Joined document ───────────────────────────────────────────

/// A fully loaded call sheet with its project and ordered children — the
/// snapshot both document renderers consume.
#[derive(Debug, Clone, Serialize)]
pub struct CallSheetDocument {
    pub project:   Project,
    pub sheet:     CallSheet,
    pub scenes:    Vec<Scene>,
    pub schedules: Vec<ScheduleEntry>,
    pub staff:     Vec<StaffEntry>,
    pub cast:      Vec<CastMember>,
}
