//! Shared formatting contract for the two document renderers.
//!
//! Every data-driven string that appears in both the paginated PDF and the
//! grid workbook is produced here, so the renderers stay thin layout adapters
//! and can never disagree on a cell value. Two deliberate asymmetries from the
//! form layer are kept: absent optional fields render as `"-"` in the info
//! grid but as `""` in table bodies.

use chrono::{Datelike, NaiveDate};

use crate::models::{CallSheet, CallSheetDocument, CastMember, Scene, ScheduleEntry, StaffEntry};
use super::derive::{
    calculate_end_time, format_total_minutes, shooting_end_time, total_shooting_minutes,
};

// ── Section titles and table headers (the printed output contract) ──

pub const SCENE_SECTION_TITLE:    &str = "촬영 씬";
pub const NOTES_SECTION_TITLE:    &str = "공지사항";
pub const SCHEDULE_SECTION_TITLE: &str = "전체일정";
pub const STAFF_SECTION_TITLE:    &str = "스태프";
pub const DETAIL_SECTION_TITLE:   &str = "세부진행";
pub const CAST_SECTION_TITLE:     &str = "캐스트리스트 및 배우집합";

pub const NO_SCENES_MESSAGE:    &str = "등록된 씬이 없습니다";
pub const NO_SCHEDULES_MESSAGE: &str = "등록된 일정이 없습니다";
pub const NO_STAFF_MESSAGE:     &str = "등록된 스태프가 없습니다";

pub const SCENE_COLUMNS: [&str; 12] = [
    "#", "S#", "CUT", "M/D\nE/N", "시작", "소요", "끝", "I/E",
    "장소", "촬영내용", "출연진", "비고",
];

pub const SCHEDULE_COLUMNS: [&str; 2] = ["일정", "내용"];
pub const STAFF_COLUMNS:    [&str; 3] = ["직책", "이름", "연락처"];
pub const CAST_COLUMNS:     [&str; 7] = [
    "배역", "연기자", "집합시간", "집합위치", "등장면", "배우 준비 의상/소품", "연락처",
];

// ── Titles and filenames ──────────────────────────────────────

pub fn document_title(doc: &CallSheetDocument) -> String {
    format!(
        "< {} > 일일촬영계획표 - {}회차",
        doc.project.title, doc.sheet.shooting_day
    )
}

pub fn detail_page_title(doc: &CallSheetDocument) -> String {
    format!(
        "< {} > {}회차 - 상세 정보",
        doc.project.title, doc.sheet.shooting_day
    )
}

/// `[{project title}]_일촬표_{day}회차.{ext}` — the download name for both
/// export formats.
pub fn export_filename(doc: &CallSheetDocument, ext: &str) -> String {
    format!(
        "[{}]_일촬표_{}회차.{}",
        doc.project.title, doc.sheet.shooting_day, ext
    )
}

// ── Conditional sections ──────────────────────────────────────

/// Which optional sections a call sheet carries. The single source of truth
/// for the second page/sheet trigger in both renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFlags {
    pub schedules: bool,
    pub staff:     bool,
    pub cast:      bool,
    pub details:   bool,
}

impl SectionFlags {
    pub fn of(doc: &CallSheetDocument) -> Self {
        Self {
            schedules: !doc.schedules.is_empty(),
            staff:     !doc.staff.is_empty(),
            cast:      !doc.cast.is_empty(),
            details:   !detail_entries(&doc.sheet).is_empty(),
        }
    }

    /// The second page/sheet exists only when at least one section does.
    pub fn second_page(&self) -> bool {
        self.schedules || self.staff || self.cast || self.details
    }
}

/// The nine per-department detail fields that are non-empty, in fixed label
/// order. Empty fields are omitted entirely.
pub fn detail_entries(sheet: &CallSheet) -> Vec<(&'static str, String)> {
    let fields: [(&'static str, &Option<String>); 9] = [
        ("연출",        &sheet.detail_direction),
        ("조연출",      &sheet.detail_assist_dir),
        ("촬영/관련장비", &sheet.detail_camera),
        ("조명",        &sheet.detail_lighting),
        ("음향",        &sheet.detail_sound),
        ("미술",        &sheet.detail_art),
        ("의상",        &sheet.detail_wardrobe),
        ("제작",        &sheet.detail_production),
        ("기타",        &sheet.detail_etc),
    ];

    fields
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (label, v.to_string()))
        })
        .collect()
}

// ── Info grid (page 1 metadata) ───────────────────────────────

/// One cell of the fixed 5-row metadata grid. Header cells are visually
/// distinguished (shaded/bold) by both renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoCell {
    Header(String),
    Value(String),
}

/// The 5-row metadata grid shared by both renderers. Rows 4 and 5 have a
/// single value cell spanning the remaining width.
pub fn info_rows(doc: &CallSheetDocument) -> Vec<Vec<InfoCell>> {
    let sheet = &doc.sheet;
    let total = total_shooting_minutes(&doc.scenes);
    let corner = format!("{}회차", sheet.shooting_day);

    let header = |s: &str| InfoCell::Header(s.to_string());
    let value = |v: &Option<String>| InfoCell::Value(dash(v));

    vec![
        vec![
            InfoCell::Header(corner),
            header("촬영일시"),
            InfoCell::Value(format_shoot_date(sheet.shoot_date)),
            header("날씨"),
            value(&sheet.weather),
            header("기온"),
            InfoCell::Value(format!("{} ~ {}", dash(&sheet.temp_min), dash(&sheet.temp_max))),
            header("강수"),
            value(&sheet.precipitation),
        ],
        vec![
            header(""),
            header("집합시간"),
            value(&sheet.crew_call_time),
            header("일출/일몰"),
            InfoCell::Value(format!("{} / {}", dash(&sheet.sunrise), dash(&sheet.sunset))),
            header("Shooting"),
            InfoCell::Value(format_total_minutes(total)),
            header("촬영종료"),
            InfoCell::Value(shooting_end_time(&doc.scenes)),
        ],
        vec![
            header(""),
            header("촬영장소"),
            value(&sheet.location),
            header("감독"),
            value(&sheet.director),
            header("프로듀서"),
            value(&sheet.producer),
            header("조연출"),
            value(&sheet.ad_name),
        ],
        vec![
            header(""),
            header("집합장소"),
            InfoCell::Value(meeting_place_display(sheet)),
        ],
        vec![header(""), header("주소"), value(&sheet.address)],
    ]
}

/// Meeting place falls back to "same as the shoot location".
pub fn meeting_place_display(sheet: &CallSheet) -> String {
    sheet
        .meeting_place
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("촬영장소와 동일")
        .to_string()
}

/// `YYYY.MM.DD (요일)` with the Korean weekday letter.
pub fn format_shoot_date(date: NaiveDate) -> String {
    let weekday = match date.weekday() {
        chrono::Weekday::Mon => "월",
        chrono::Weekday::Tue => "화",
        chrono::Weekday::Wed => "수",
        chrono::Weekday::Thu => "목",
        chrono::Weekday::Fri => "금",
        chrono::Weekday::Sat => "토",
        chrono::Weekday::Sun => "일",
    };
    format!("{} ({})", date.format("%Y.%m.%d"), weekday)
}

// ── Table rows ────────────────────────────────────────────────

/// The scene table row in the shared 12-column order: row index, scene number
/// (with any literal "S#" prefix stripped), cut/pages, day-night code, start,
/// duration minutes, derived end, I/E abbreviation, location, description,
/// cast, notes. Table blanks are empty strings, not dashes.
pub fn scene_row_cells(index: usize, scene: &Scene) -> [String; 12] {
    let end_time = calculate_end_time(scene.start_time.as_deref(), scene.estimated_time);
    [
        (index + 1).to_string(),
        scene.scene_number.replacen("S#", "", 1),
        blank(&scene.pages),
        blank(&scene.day_night),
        blank(&scene.start_time),
        match scene.estimated_time {
            Some(m) if m != 0 => m.to_string(),
            _ => String::new(),
        },
        end_time,
        location_type_abbrev(scene.location_type.as_deref()),
        blank(&scene.location_name),
        blank(&scene.description),
        blank(&scene.cast),
        blank(&scene.notes),
    ]
}

pub fn schedule_row_cells(entry: &ScheduleEntry) -> [String; 2] {
    [blank(&entry.time), blank(&entry.content)]
}

pub fn staff_row_cells(entry: &StaffEntry) -> [String; 3] {
    [blank(&entry.position), blank(&entry.name), blank(&entry.contact)]
}

pub fn cast_row_cells(member: &CastMember) -> [String; 7] {
    [
        blank(&member.role),
        blank(&member.actor_name),
        blank(&member.call_time),
        blank(&member.call_location),
        blank(&member.scenes),
        blank(&member.preparation),
        blank(&member.contact),
    ]
}

/// INT → I, EXT → E, INT/EXT → I/E; anything else renders empty.
pub fn location_type_abbrev(location_type: Option<&str>) -> String {
    match location_type {
        Some("INT") => "I".to_string(),
        Some("EXT") => "E".to_string(),
        Some("INT/EXT") => "I/E".to_string(),
        _ => String::new(),
    }
}

// ── Field helpers ─────────────────────────────────────────────

/// Info-grid rendering of an optional field: blanks become `"-"`.
pub fn dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("-")
        .to_string()
}

/// Table-body rendering of an optional field: blanks stay empty.
pub fn blank(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallSheetDocument, Project, ProjectStatus};
    use chrono::NaiveDateTime;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn project() -> Project {
        Project {
            id:            "p1".into(),
            user_id:       None,
            title:         "가을의 끝".into(),
            r#type:        Some("영화".into()),
            production_co: None,
            director:      Some("김감독".into()),
            producer:      None,
            ad_name:       None,
            start_date:    None,
            end_date:      None,
            status:        ProjectStatus::Shooting,
            created_at:    ts(),
            updated_at:    ts(),
        }
    }

    fn empty_sheet() -> CallSheet {
        CallSheet {
            id:                "cs1".into(),
            project_id:        "p1".into(),
            episode:           None,
            shooting_day:      3,
            shoot_date:        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            weather:           None,
            temp_min:          None,
            temp_max:          None,
            precipitation:     None,
            sunrise:           None,
            sunset:            None,
            director:          None,
            producer:          None,
            ad_name:           None,
            location:          None,
            address:           None,
            meeting_place:     None,
            parking_info:      None,
            emergency_contact: None,
            crew_call_time:    None,
            talent_call_time:  None,
            general_notes:     None,
            detail_direction:  None,
            detail_assist_dir: None,
            detail_camera:     None,
            detail_lighting:   None,
            detail_sound:      None,
            detail_art:        None,
            detail_wardrobe:   None,
            detail_production: None,
            detail_etc:        None,
            created_at:        ts(),
            updated_at:        ts(),
        }
    }

    fn empty_doc() -> CallSheetDocument {
        CallSheetDocument {
            project:   project(),
            sheet:     empty_sheet(),
            scenes:    vec![],
            schedules: vec![],
            staff:     vec![],
            cast:      vec![],
        }
    }

    fn scene(number: &str) -> Scene {
        Scene {
            id:             String::new(),
            call_sheet_id:  String::new(),
            ord:            0,
            scene_number:   number.to_string(),
            description:    Some("옥상 대화".into()),
            location_type:  Some("INT".into()),
            location_name:  Some("스튜디오 A".into()),
            day_night:      Some("N".into()),
            pages:          Some("3/8".into()),
            estimated_time: Some(90),
            start_time:     Some("09:00".into()),
            cast:           Some("지수, 민호".into()),
            notes:          None,
        }
    }

    #[test]
    fn empty_sheet_has_single_page() {
        let flags = SectionFlags::of(&empty_doc());
        assert!(!flags.schedules);
        assert!(!flags.staff);
        assert!(!flags.cast);
        assert!(!flags.details);
        assert!(!flags.second_page());
    }

    #[test]
    fn staff_only_triggers_second_page() {
        let mut doc = empty_doc();
        doc.staff.push(StaffEntry {
            id:            String::new(),
            call_sheet_id: String::new(),
            ord:           0,
            position:      Some("촬영감독".into()),
            name:          Some("박촬영".into()),
            contact:       None,
        });
        let flags = SectionFlags::of(&doc);
        assert!(flags.staff);
        assert!(!flags.schedules);
        assert!(!flags.cast);
        assert!(!flags.details);
        assert!(flags.second_page());
    }

    #[test]
    fn one_detail_field_triggers_details_section() {
        let mut doc = empty_doc();
        doc.sheet.detail_lighting = Some("야간 조명 2조".into());
        let flags = SectionFlags::of(&doc);
        assert!(flags.details);
        assert!(flags.second_page());
        assert_eq!(
            detail_entries(&doc.sheet),
            vec![("조명", "야간 조명 2조".to_string())]
        );
    }

    #[test]
    fn empty_string_detail_fields_do_not_count() {
        let mut doc = empty_doc();
        doc.sheet.detail_etc = Some(String::new());
        assert!(!SectionFlags::of(&doc).details);
    }

    #[test]
    fn scene_number_prefix_is_stripped() {
        let cells = scene_row_cells(0, &scene("S#12"));
        assert_eq!(cells[1], "12");
        let cells = scene_row_cells(0, &scene("12"));
        assert_eq!(cells[1], "12");
    }

    #[test]
    fn scene_row_populated_case() {
        let cells = scene_row_cells(2, &scene("S#7"));
        assert_eq!(
            cells,
            [
                "3", "7", "3/8", "N", "09:00", "90", "10:30", "I",
                "스튜디오 A", "옥상 대화", "지수, 민호", "",
            ]
            .map(String::from)
        );
    }

    #[test]
    fn scene_row_empty_fields_stay_blank() {
        let mut s = scene("S#1");
        s.pages = None;
        s.day_night = None;
        s.location_type = None;
        s.start_time = None;
        s.estimated_time = None;
        s.location_name = None;
        s.description = None;
        s.cast = None;
        let cells = scene_row_cells(0, &s);
        assert_eq!(
            cells,
            ["1", "1", "", "", "", "", "", "", "", "", "", ""].map(String::from)
        );
    }

    #[test]
    fn location_type_abbreviations() {
        assert_eq!(location_type_abbrev(Some("INT")), "I");
        assert_eq!(location_type_abbrev(Some("EXT")), "E");
        assert_eq!(location_type_abbrev(Some("INT/EXT")), "I/E");
        assert_eq!(location_type_abbrev(Some("기타")), "");
        assert_eq!(location_type_abbrev(None), "");
    }

    #[test]
    fn info_grid_dashes_blanks_and_derives() {
        let mut doc = empty_doc();
        doc.scenes.push(scene("S#1"));
        doc.scenes.push({
            let mut s = scene("S#2");
            s.start_time = Some("10:00".into());
            s.estimated_time = Some(120);
            s
        });
        let rows = info_rows(&doc);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0][0], InfoCell::Header("3회차".into()));
        assert_eq!(rows[0][2], InfoCell::Value("2024.03.15 (금)".into()));
        // Blank weather renders as a dash in the info grid.
        assert_eq!(rows[0][4], InfoCell::Value("-".into()));
        assert_eq!(rows[1][6], InfoCell::Value("3h 30m".into()));
        assert_eq!(rows[1][8], InfoCell::Value("12:00".into()));
        // Blank meeting place falls back to the shoot location note.
        assert_eq!(rows[3][2], InfoCell::Value("촬영장소와 동일".into()));
    }

    #[test]
    fn titles_and_filename() {
        let doc = empty_doc();
        assert_eq!(document_title(&doc), "< 가을의 끝 > 일일촬영계획표 - 3회차");
        assert_eq!(detail_page_title(&doc), "< 가을의 끝 > 3회차 - 상세 정보");
        assert_eq!(export_filename(&doc, "xlsx"), "[가을의 끝]_일촬표_3회차.xlsx");
        assert_eq!(export_filename(&doc, "pdf"), "[가을의 끝]_일촬표_3회차.pdf");
    }
}
