//! Heures et dates locales affichées dans l'interface

use wasm_bindgen::JsValue;

fn local_date(timestamp_ms: f64) -> js_sys::Date {
    js_sys::Date::new(&JsValue::from_f64(timestamp_ms))
}

/// HH:MM locale d'un message
pub fn time_label(timestamp_ms: i64) -> String {
    let date = local_date(timestamp_ms as f64);
    clock(date.get_hours(), date.get_minutes())
}

/// JJ/MM/AAAA locale du jour
pub fn today_label() -> String {
    let date = local_date(js_sys::Date::now());
    calendar(date.get_date(), date.get_month() + 1, date.get_full_year())
}

fn clock(hours: u32, minutes: u32) -> String {
    format!("{:02}:{:02}", hours, minutes)
}

fn calendar(day: u32, month: u32, year: u32) -> String {
    format!("{:02}/{:02}/{}", day, month, year)
}
