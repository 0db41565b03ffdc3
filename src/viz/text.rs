//! Label text helpers for the rendering backend.

/// Heuristic pixel width of a label at `glyph_px` per character (Plotters
/// has no text measuring on the `ab_glyph` path).
pub fn estimate_label_width_px(text: &str, glyph_px: u32) -> u32 {
    text.chars().count() as u32 * glyph_px
}

/// Truncate `text` to fit `max_px`, appending an ellipsis when shortened.
pub fn truncate_label(text: &str, glyph_px: u32, max_px: u32) -> String {
    if estimate_label_width_px(text, glyph_px) <= max_px {
        return text.to_string();
    }
    let budget = (max_px / glyph_px.max(1)) as usize;
    if budget <= 1 {
        return "…".to_string();
    }
    let mut out: String = text.chars().take(budget - 1).collect();
    out.push('…');
    out
}
