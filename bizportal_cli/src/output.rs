use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// How a column's JSON value is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Money,
    Date,
}

/// One table/CSV column: the record key it reads and the header it shows.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: CellKind,
}

pub const fn text(key: &'static str, header: &'static str) -> Column {
    Column {
        key,
        header,
        kind: CellKind::Text,
    }
}

pub const fn money(key: &'static str, header: &'static str) -> Column {
    Column {
        key,
        header,
        kind: CellKind::Money,
    }
}

pub const fn date(key: &'static str, header: &'static str) -> Column {
    Column {
        key,
        header,
        kind: CellKind::Date,
    }
}

// -- Row builders --

fn build_rows(records: &[Value], columns: &[Column]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| format_cell(record.get(c.key), c.kind))
                .collect()
        })
        .collect()
}

fn headers(columns: &[Column]) -> Vec<&'static str> {
    columns.iter().map(|c| c.header).collect()
}

pub fn render_table(records: &[Value], columns: &[Column]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers(columns));
    for row in build_rows(records, columns) {
        builder.push_record(row);
    }
    builder.build().to_string()
}

/// Two-column field/value table for a single record.
pub fn render_detail(record: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    match record.as_object() {
        Some(map) => {
            for (key, value) in map {
                builder.push_record([key.clone(), format_cell(Some(value), CellKind::Text)]);
            }
        }
        None => {
            builder.push_record(["value".to_string(), format_cell(Some(record), CellKind::Text)]);
        }
    }
    builder.build().to_string()
}

pub fn write_csv<W: std::io::Write>(writer: W, records: &[Value], columns: &[Column]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers(columns))?;
    for row in build_rows(records, columns) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- Printers --

pub fn print_records(records: &[Value], columns: &[Column], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(records, columns)),
        OutputFormat::Json => print_json(records),
        OutputFormat::Csv => write_csv(std::io::stdout(), records, columns)?,
    }
    Ok(())
}

pub fn print_record(record: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_detail(record)),
        OutputFormat::Json => print_json(record),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            if let Some(map) = record.as_object() {
                wtr.write_record(map.keys())?;
                wtr.write_record(map.values().map(|v| format_cell(Some(v), CellKind::Text)))?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Serializes typed records into JSON objects for generic rendering.
pub fn to_values<T: Serialize>(items: &[T]) -> serde_json::Result<Vec<Value>> {
    items.iter().map(serde_json::to_value).collect()
}

// -- Cell formatting --

fn format_cell(value: Option<&Value>, kind: CellKind) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match (kind, value) {
        (_, Value::Null) => String::new(),
        (CellKind::Money, v) => match as_f64(v) {
            Some(amount) => format_money(amount),
            None => plain(v),
        },
        (CellKind::Date, Value::String(s)) => format_date(s),
        (_, v) => plain(v),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text for a cell. Referenced records show their name rather than raw JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
        Value::Object(map) => {
            let name = ["name", "title", "email"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_string);
            let full_name = match (
                map.get("firstName").and_then(Value::as_str),
                map.get("lastName").and_then(Value::as_str),
            ) {
                (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
                _ => None,
            };
            name.or(full_name).unwrap_or_else(|| value.to_string())
        }
    }
}

/// `$1,234.50`, with a leading minus for negative amounts.
fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// RFC 3339 timestamps become `YYYY-MM-DD HH:MM` (UTC), or just the date at
/// midnight. Anything else is shown unchanged.
fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => {
            let utc = ts.with_timezone(&Utc);
            if utc.format("%H:%M:%S").to_string() == "00:00:00" {
                utc.format("%Y-%m-%d").to_string()
            } else {
                utc.format("%Y-%m-%d %H:%M").to_string()
            }
        }
        Err(_) => raw.to_string(),
    }
}
