/// Eighth-block glyphs from empty to full.
pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render percentages (0–100) as one glyph each.
///
/// Values outside the range are clamped; non-finite values draw as the
/// lowest bar.
pub fn sparkline<I>(values: I) -> String
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(glyph).collect()
}

fn glyph(percent: f64) -> char {
    if !percent.is_finite() {
        return GLYPHS[0];
    }
    let top = (GLYPHS.len() - 1) as f64;
    let idx = (percent.clamp(0.0, 100.0) / 100.0 * top).round() as usize;
    GLYPHS[idx]
}
