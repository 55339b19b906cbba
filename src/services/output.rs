use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

fn envelope_json<T: Serialize>(body: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(body)
}

/// Prints a list: one `{"ok":true,"data":[...]}` document, or one text row per item.
pub fn print_out<T: Serialize>(
    json: bool,
    items: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", envelope_json(&JsonOut { ok: true, data: items })?);
        return Ok(());
    }
    for item in items {
        println!("{}", row(item));
    }
    Ok(())
}

/// Prints a single report either as the success envelope or through `render`.
pub fn print_one<T: Serialize>(
    json: bool,
    report: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    let text = if json {
        envelope_json(&JsonOut { ok: true, data: &report })?
    } else {
        render(&report)
    };
    println!("{}", text);
    Ok(())
}

/// JSON failures go to stdout so callers parse one stream; text failures go to stderr.
pub fn print_failure(json: bool, code: &'static str, message: String) {
    if !json {
        eprintln!("error [{}]: {}", code, message);
        return;
    }
    let body = JsonErr {
        ok: false,
        error: ErrorBody { code, message },
    };
    match envelope_json(&body) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{{\"ok\":false,\"error\":{{\"code\":\"{}\"}}}}", code),
    }
}
