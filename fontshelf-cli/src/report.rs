use fontshelf::{CacheStats, Font};

/// One line describing a loaded font.
pub fn font(font: &Font) -> String {
    let family = font.family_name().unwrap_or("<unnamed>");
    let mut line = format!(
        "{} {}pt  family={family:?} glyphs={} upem={}",
        font.path().display(),
        font.point_size(),
        font.glyph_count(),
        font.units_per_em(),
    );
    if let Some(metrics) = font.line_metrics() {
        line.push_str(&format!(
            " ascent={:.1} descent={:.1} line_gap={:.1} line_height={:.1}",
            metrics.ascent, metrics.descent, metrics.line_gap, metrics.new_line_size
        ));
    }
    line
}

pub fn stats(stats: &CacheStats, resident: usize) -> String {
    format!(
        "cache: {resident} resident, {} hits, {} misses ({} loaded, {} failed), {} evicted",
        stats.hits, stats.misses, stats.loads, stats.failures, stats.evictions
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_line_lists_every_counter() {
        let line = stats(
            &CacheStats {
                hits: 5,
                misses: 3,
                loads: 2,
                failures: 1,
                evictions: 0,
            },
            2,
        );
        assert_eq!(
            line,
            "cache: 2 resident, 5 hits, 3 misses (2 loaded, 1 failed), 0 evicted"
        );
    }
}
