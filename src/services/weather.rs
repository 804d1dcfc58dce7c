//! External weather lookup (weatherapi.com).
//!
//! Called by the weather route only; the document renderers never touch this —
//! they read the snapshot already stored on the call sheet.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

const WEATHER_API_BASE: &str = "https://api.weatherapi.com/v1";

/// The resolved snapshot stored on a call sheet by the form layer.
#[derive(Debug, Serialize, Clone)]
pub struct WeatherSnapshotDto {
    pub weather:       String,
    pub temp_min:      String,
    pub temp_max:      String,
    pub precipitation: String,
    pub sunrise:       String,
    pub sunset:        String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day:   Day,
    astro: Astro,
}

#[derive(Debug, Deserialize)]
struct Day {
    maxtemp_c:            f64,
    mintemp_c:            f64,
    daily_chance_of_rain: i64,
    condition:            Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
    code: i64,
}

#[derive(Debug, Deserialize)]
struct Astro {
    sunrise: String,
    sunset:  String,
}

/// Fetch the forecast for a location and ISO date and map it into the
/// call-sheet snapshot shape.
pub async fn fetch_daily_forecast(
    config: &Config,
    location: &str,
    date: &str,
) -> AppResult<WeatherSnapshotDto> {
    if config.weather_api_key.is_empty() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "WEATHER_API_KEY is not configured"
        )));
    }

    let url = format!("{WEATHER_API_BASE}/forecast.json");
    let response = reqwest::Client::new()
        .get(&url)
        .query(&[
            ("key", config.weather_api_key.as_str()),
            ("q", location),
            ("dt", date),
            ("lang", "ko"),
        ])
        .send()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Weather API request failed: {e}")))?;

    if response.status() == reqwest::StatusCode::BAD_REQUEST {
        return Err(AppError::BadRequest("Invalid location or date".into()));
    }
    if !response.status().is_success() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Weather API returned status {}",
            response.status()
        )));
    }

    let data: ForecastResponse = response
        .json()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Weather API response malformed: {e}")))?;

    let day = data
        .forecast
        .forecastday
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)?;

    // Mapped condition text, falling back to the upstream text for codes the
    // table does not know.
    let weather = condition_text(day.day.condition.code)
        .map(str::to_string)
        .unwrap_or(day.day.condition.text);

    Ok(WeatherSnapshotDto {
        weather,
        temp_min:      format!("{}℃", day.day.mintemp_c.round() as i64),
        temp_max:      format!("{}℃", day.day.maxtemp_c.round() as i64),
        precipitation: format!("{}%", day.day.daily_chance_of_rain),
        sunrise:       convert_to_24_hour(&day.astro.sunrise),
        sunset:        convert_to_24_hour(&day.astro.sunset),
    })
}

/// Fixed condition-code → Korean text table. Codes follow the weatherapi.com
/// condition list.
pub fn condition_text(code: i64) -> Option<&'static str> {
    let text = match code {
        1000 => "맑음",
        1003 => "구름조금",
        1006 => "구름많음",
        1009 => "흐림",
        1030 | 1135 => "안개",
        1147 => "짙은안개",
        1063 => "가끔 비",
        1066 => "가끔 눈",
        1069 => "가끔 진눈깨비",
        1072 => "가끔 이슬비",
        1087 => "천둥",
        1114 => "눈보라",
        1117 | 1222 | 1225 => "폭설",
        1150 | 1153 | 1168 | 1171 => "이슬비",
        1180 | 1183 | 1186 | 1189 => "비",
        1192 | 1195 | 1246 => "폭우",
        1198 | 1201 | 1204 | 1207 | 1249 | 1252 => "진눈깨비",
        1210 | 1213 | 1216 | 1219 | 1255 | 1258 => "눈",
        1237 | 1261 | 1264 => "우박",
        1240 | 1243 => "소나기",
        1273 | 1276 => "뇌우",
        1279 => "뇌우+눈",
        1282 => "뇌우+폭설",
        _ => return None,
    };
    Some(text)
}

/// Convert a 12-hour `"hh:mm AM/PM"` string to 24-hour `"HH:MM"`. Inputs that
/// do not match the shape pass through unchanged.
pub fn convert_to_24_hour(time_12h: &str) -> String {
    let mut parts = time_12h.split_whitespace();
    let (Some(time), Some(modifier)) = (parts.next(), parts.next()) else {
        return time_12h.to_string();
    };

    let mut hm = time.splitn(2, ':');
    let (Some(hours), Some(minutes)) = (hm.next(), hm.next()) else {
        return time_12h.to_string();
    };
    let Ok(mut hours_num) = hours.parse::<u32>() else {
        return time_12h.to_string();
    };

    match modifier.to_ascii_uppercase().as_str() {
        "PM" if hours_num != 12 => hours_num += 12,
        "AM" if hours_num == 12 => hours_num = 0,
        "AM" | "PM" => {}
        _ => return time_12h.to_string(),
    }

    format!("{hours_num:02}:{minutes}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_morning_and_evening_times() {
        assert_eq!(convert_to_24_hour("06:45 AM"), "06:45");
        assert_eq!(convert_to_24_hour("07:30 PM"), "19:30");
    }

    #[test]
    fn converts_noon_and_midnight() {
        assert_eq!(convert_to_24_hour("12:00 PM"), "12:00");
        assert_eq!(convert_to_24_hour("12:15 AM"), "00:15");
    }

    #[test]
    fn passes_through_unrecognized_shapes() {
        assert_eq!(convert_to_24_hour("18:00"), "18:00");
        assert_eq!(convert_to_24_hour("noonish"), "noonish");
    }

    #[test]
    fn maps_known_condition_codes() {
        assert_eq!(condition_text(1000), Some("맑음"));
        assert_eq!(condition_text(1282), Some("뇌우+폭설"));
        assert_eq!(condition_text(9999), None);
    }
}
