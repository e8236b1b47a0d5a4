// src/core/sanitize.rs

/// Collapse runs of whitespace (including newlines) to one space and trim.
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

/// Normalized text, or None when nothing visible is left.
pub fn clean_text(s: &str) -> Option<String> {
    let out = normalize_ws(s);
    if out.is_empty() { None } else { Some(out) }
}

/// Safe file stem from a category label: ASCII alphanumerics, `-` and `_`,
/// whitespace runs folded to one `_`.
pub fn sanitize_file_stem(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_us = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' || ch == '_' { if !(last_us && ch == '_') { out.push(ch); } last_us = ch == '_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("category") } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_newlines() {
        assert_eq!(normalize_ws("  EPSRC Centre\n for   Doctoral\tTraining "), "EPSRC Centre for Doctoral Training");
    }

    #[test]
    fn clean_text_drops_blank() {
        assert_eq!(clean_text("   \n"), None);
        assert_eq!(clean_text(" Leeds ").as_deref(), Some("Leeds"));
    }

    #[test]
    fn file_stem_variants() {
        assert_eq!(sanitize_file_stem("CDT"), "CDT");
        assert_eq!(sanitize_file_stem("Doctoral  Training/Partnership"), "Doctoral_TrainingPartnership");
        assert_eq!(sanitize_file_stem("../"), "category");
    }
}
