// src/core/sanitize.rs

/// Collapse runs of whitespace (incl. `&nbsp;` after decoding) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "12", "3.5" and "0.25" are numeric; "", "$1", "Sol Ring" are not.
pub fn is_numeric(s: &str) -> bool {
    let digits: String = s.chars().filter(|&c| c != '.').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// File stem for a deck: keep `[A-Za-z0-9_-]`, squash the rest into single underscores.
pub fn sanitize_deck_filename(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut last_us = false;
    for ch in id.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("deck") } else { out }
}
