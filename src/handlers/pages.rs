//! Minimal HTML views

use axum::response::Html;

use crate::model::PredictionLabel;
use crate::models::StatusRecord;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/current-status\">Current status</a></nav>\n\
         </body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

/// Escape text for HTML element content and attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn status_page(record: &StatusRecord) -> String {
    let body = format!(
        "<dl>\n<dt>Room</dt><dd id=\"room\">{}</dd>\n\
         <dt>People count</dt><dd id=\"people_count\">{}</dd>\n\
         <dt>Door status</dt><dd id=\"door_status\">{}</dd>\n</dl>",
        escape(&record.room),
        record.people_count,
        record.door().as_str(),
    );
    layout("Current Status", &body)
}

pub fn no_data_page() -> String {
    layout(
        "Current Status",
        "<p id=\"no_data\">No status data received from the door sensor yet.</p>",
    )
}

pub fn prediction_page(label: PredictionLabel) -> String {
    let body = format!(
        "<p>Predicted door state: <strong id=\"prediction\">{}</strong></p>",
        label.as_str()
    );
    layout("Prediction Result", &body)
}

pub async fn home() -> Html<String> {
    let body = "<form method=\"post\" action=\"/predict\">\n\
        <label>Date <input type=\"date\" name=\"date\" required></label>\n\
        <label>Time <input type=\"time\" name=\"time\" required></label>\n\
        <label>Recent activity <input type=\"number\" step=\"any\" name=\"recent_activity\"></label>\n\
        <label>Temperature <input type=\"number\" step=\"any\" name=\"temperature\"></label>\n\
        <button type=\"submit\">Predict</button>\n</form>";
    Html(layout("Door State Prediction", body))
}
