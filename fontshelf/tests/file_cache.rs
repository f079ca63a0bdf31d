use std::path::{Path, PathBuf};

use anyhow::Result;
use fontshelf::{CacheConfig, FileLoader, Font, FontCache, FontSystem, LoadError, PreloadEntry};

/// Font used by the ignored tests; override with `FONTSHELF_TEST_FONT`.
const DEFAULT_FONT: &str = "DejaVuSans.ttf";

fn test_font() -> PathBuf {
    std::env::var_os("FONTSHELF_TEST_FONT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT))
}

fn system_cache() -> FontCache<FileLoader> {
    FontSystem::init().cache(&CacheConfig::default())
}

#[test]
fn missing_font_is_reported_and_not_cached() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = FontCache::new(FileLoader::new().with_search_dirs([dir.path()]));

    let err = cache.get("missing.ttf", 10).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { ref path } if path == Path::new("missing.ttf")));
    assert!(!cache.contains("missing.ttf", 10));
    assert!(cache.is_empty());

    assert!(cache.get("missing.ttf", 10).is_err());
    let stats = cache.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.failures, 2);
}

#[test]
fn corrupt_font_is_a_parse_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("broken.ttf"), b"\x00\x01\x00\x00 truncated")?;
    let cache = FontCache::new(FileLoader::new().with_search_dirs([dir.path()]));

    match cache.get("broken.ttf", 12) {
        Err(LoadError::Parse { path, .. }) => assert_eq!(path, dir.path().join("broken.ttf")),
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert!(cache.is_empty());
    Ok(())
}

#[test]
fn preload_collects_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("broken.ttf"), b"not a font")?;
    let config = CacheConfig {
        search_dirs: vec![dir.path().to_path_buf()],
        system_fonts: false,
        preload: vec![
            PreloadEntry {
                path: PathBuf::from("broken.ttf"),
                sizes: vec![12],
            },
            PreloadEntry {
                path: PathBuf::from("missing.ttf"),
                sizes: vec![12, 0],
            },
        ],
        ..Default::default()
    };
    let cache = FontCache::with_config(config.file_loader(), &config);

    let failures = cache.preload(&config.preload);
    assert_eq!(failures.len(), 3);
    assert!(matches!(failures[0].1, LoadError::Parse { .. }));
    assert!(matches!(failures[1].1, LoadError::NotFound { .. }));
    assert!(matches!(failures[2].1, LoadError::InvalidPointSize(0)));
    Ok(())
}

#[test]
#[ignore]
fn system_font_is_loaded_once_per_size() -> Result<()> {
    let cache = system_cache();
    let path = test_font();

    let first = cache.get(&path, 12)?;
    let second = cache.get(&path, 12)?;
    let large = cache.get(&path, 24)?;

    assert!(Font::ptr_eq(&first, &second));
    assert_ne!(first, large);
    assert_eq!(large.point_size(), 24);
    assert_eq!(cache.stats().loads, 2);
    assert_eq!(cache.stats().hits, 1);
    Ok(())
}

#[test]
#[ignore]
fn system_font_exposes_metrics() -> Result<()> {
    let font = system_cache().get(test_font(), 16)?;

    assert!(font.path().is_file());
    assert!(font.glyph_count() > 0);
    assert_eq!(font.fontdue().glyph_count(), font.glyph_count());
    assert!(font.has_glyph('A'));
    let metrics = font.line_metrics().expect("font should have horizontal metrics");
    assert!(metrics.ascent > 0.0);
    assert!(metrics.new_line_size >= metrics.ascent - metrics.descent);
    Ok(())
}
