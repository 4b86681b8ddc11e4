//! Card-style terminal output with the app's Spanish copy.

use chrono::Locale;

use clima_core::model::{self, CurrentReport, ForecastSlot, IconScale};
use clima_core::LocationError;

pub const LOADING_WEATHER: &str = "Cargando clima...";
pub const LOADING_FORECAST: &str = "Cargando pronóstico...";
pub const LOADING_HOURLY: &str = "Cargando...";

pub const EMPTY_QUERY: &str = "Por favor, ingresa una ciudad para buscar.";
pub const CITY_NOT_FOUND: &str = "Ciudad no encontrada ❌";
pub const ERROR_WEATHER: &str = "No se pudo obtener el clima.";
pub const ERROR_FORECAST: &str = "No se pudo cargar el pronóstico.";
pub const ERROR_HOURLY: &str = "No se pudo obtener el pronóstico por hora.";

pub const PERMISSION_DENIED: &str = "Permiso denegado: activa los permisos de ubicación.";
pub const HOURLY_TITLE: &str = "🌤 Pronóstico por Hora";

/// Alert text for an acquisition failure. Permission problems keep the
/// app's original wording; anything else carries the cause.
pub fn location_alert(err: &LocationError) -> String {
    match err {
        LocationError::PermissionDenied => PERMISSION_DENIED.to_string(),
        other => format!("No se pudo obtener la ubicación: {other}"),
    }
}

/// The big current-weather card: place, icon, temperature, description,
/// then the details panel.
pub fn current_card(report: &CurrentReport) -> String {
    let place = if report.country.is_empty() {
        report.city.clone()
    } else {
        format!("{}, {}", report.city, report.country)
    };

    [
        place,
        format!("{}  {:.1}°C", model::icon_emoji(&report.icon), report.temperature_c),
        capitalize(&report.description),
        String::new(),
        format!("🌡️ Mín: {}°C / Máx: {}°C", report.temp_min_c, report.temp_max_c),
        format!("💧 Humedad: {}%", report.humidity_pct),
        format!("💨 Viento: {} m/s", report.wind_speed_mps),
        format!("🥵 Sensación: {}°C", report.feels_like_c),
        format!("🖼 {}", model::icon_url(&report.icon, IconScale::Large)),
    ]
    .join("\n")
}

/// One day of the forecast: Spanish date, description, max/min, details.
pub fn forecast_card(slot: &ForecastSlot) -> String {
    let date = slot.stamp.date().format_localized("%A %-d de %B", Locale::es_ES).to_string();

    [
        format!("{}  {}", capitalize(&date), model::icon_emoji(&slot.icon)),
        capitalize(&slot.description),
        format!("🌡️ {:.0}° / {:.0}°", slot.temp_max_c, slot.temp_min_c),
        format!("💧 {}%  💨 {} m/s", slot.humidity_pct, slot.wind_speed_mps),
    ]
    .join("\n")
}

/// One 3-hour slot of the hourly strip.
pub fn hourly_card(slot: &ForecastSlot) -> String {
    format!(
        "{}  {}  {:.1}°C  {}",
        slot.stamp.format("%H:%M"),
        model::icon_emoji(&slot.icon),
        slot.temperature_c,
        capitalize(&slot.description),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn cdmx_report() -> CurrentReport {
        CurrentReport {
            city: "Ciudad de México".to_string(),
            country: "MX".to_string(),
            temperature_c: 21.4,
            temp_min_c: 18.0,
            temp_max_c: 24.0,
            feels_like_c: 20.5,
            humidity_pct: 40,
            wind_speed_mps: 3.1,
            group: "Clear".to_string(),
            description: "cielo claro".to_string(),
            icon: "01d".to_string(),
        }
    }

    fn noon_slot() -> ForecastSlot {
        ForecastSlot {
            stamp: NaiveDateTime::parse_from_str("2026-08-24 12:00:00", "%Y-%m-%d %H:%M:%S")
                .expect("test stamp must parse"),
            temperature_c: 24.3,
            temp_min_c: 18.0,
            temp_max_c: 25.0,
            humidity_pct: 35,
            wind_speed_mps: 2.4,
            group: "Clouds".to_string(),
            description: "nubes dispersas".to_string(),
            icon: "03d".to_string(),
        }
    }

    #[test]
    fn current_card_shows_city_temperature_and_description() {
        let card = current_card(&cdmx_report());

        assert!(card.contains("Ciudad de México, MX"));
        assert!(card.contains("21.4°C"));
        assert!(card.contains("Cielo claro"));
        assert!(card.contains("🌡️ Mín: 18°C / Máx: 24°C"));
        assert!(card.contains("💧 Humedad: 40%"));
        assert!(card.contains("💨 Viento: 3.1 m/s"));
        assert!(card.contains("🥵 Sensación: 20.5°C"));
        assert!(card.contains("https://openweathermap.org/img/wn/01d@4x.png"));
    }

    #[test]
    fn current_card_omits_a_missing_country() {
        let mut report = cdmx_report();
        report.country.clear();

        let card = current_card(&report);
        assert!(card.starts_with("Ciudad de México\n"));
    }

    #[test]
    fn forecast_card_formats_the_date_in_spanish() {
        let card = forecast_card(&noon_slot());

        assert!(card.contains("24 de agosto"));
        assert!(card.contains("Nubes dispersas"));
        assert!(card.contains("🌡️ 25° / 18°"));
        assert!(card.contains("💧 35%  💨 2.4 m/s"));
    }

    #[test]
    fn hourly_card_leads_with_the_time_of_day() {
        let card = hourly_card(&noon_slot());

        assert!(card.starts_with("12:00"));
        assert!(card.contains("24.3°C"));
        assert!(card.contains("Nubes dispersas"));
    }

    #[test]
    fn location_alert_keeps_the_permission_wording() {
        assert_eq!(location_alert(&LocationError::PermissionDenied), PERMISSION_DENIED);

        let other = location_alert(&LocationError::Unavailable("offline".to_string()));
        assert!(other.contains("No se pudo obtener la ubicación"));
    }
}
