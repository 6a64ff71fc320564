//! Integration tests for the complete corpus analysis pipeline
//!
//! These tests write small synthetic drawings into a temporary directory
//! and validate:
//! - Single-drawing color profiles
//! - Corpus tables (features joined with filename fields)
//! - Error propagation for undecodable files and schema mismatches
//! - Repeatability of corpus runs

use drawing_features::constants::color::PROPORTION_EPSILON;
use drawing_features::{
    analyze_corpus, extract_color_profile, parse_filename, AnalysisError, CorpusAnalyzer,
    CorpusConfig, FeatureExtractor, QuantizerConfig,
};
use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn save(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// White canvas with a filled rectangle of ink in the top-left corner
fn drawing(width: u32, height: u32, ink: [u8; 3], ink_w: u32, ink_h: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for y in 0..ink_h {
        for x in 0..ink_w {
            img.put_pixel(x, y, Rgb(ink));
        }
    }
    img
}

fn shapes_corpus() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "square_red.png", &RgbImage::from_pixel(16, 16, Rgb([255, 0, 0])));
    save(dir.path(), "square_white.png", &RgbImage::from_pixel(16, 16, Rgb([255, 255, 255])));
    dir
}

// ============================================================================
// Color Profile Tests
// ============================================================================

#[test]
fn test_uniform_drawing_single_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "blue.png", &RgbImage::from_pixel(9, 4, Rgb([0, 64, 255])));

    for quantizer in [
        QuantizerConfig::new(0, 1).unwrap(),
        QuantizerConfig::default(),
        QuantizerConfig::new(100, 8).unwrap(),
    ] {
        let table = extract_color_profile(&path, quantizer).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].c_code, "#0040FF");
        assert_eq!(table.entries()[0].occurrence, 36);
        assert!((table.entries()[0].proportion - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_proportions_sum_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = drawing(20, 20, [0, 0, 0], 5, 5);
    for x in 10..20 {
        img.put_pixel(x, 19, Rgb([0, 128, 0]));
    }
    img.put_pixel(19, 0, Rgb([255, 0, 255]));
    let path = save(dir.path(), "mixed.png", &img);

    let table = extract_color_profile(&path, QuantizerConfig::default()).unwrap();
    assert!(table.len() <= 32);
    assert_eq!(FeatureExtractor::distinct_color_count(&table), table.len());
    assert!((table.coverage() - 1.0).abs() < PROPORTION_EPSILON);

    let counts: Vec<usize> = table.iter().map(|e| e.occurrence).collect();
    let mut sorted = counts.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(counts, sorted, "entries must be ordered by occurrence");
}

#[test]
fn test_truncated_palette_respects_cap() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(2, 0, Rgb([0, 0, 255]));
    let path = save(dir.path(), "dots.png", &img);

    let table = extract_color_profile(&path, QuantizerConfig::new(0, 2).unwrap()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.entries()[0].c_code, "#FFFFFF");
    assert!(table.coverage() < 1.0);
}

#[test]
fn test_non_background_proportion() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "ink.png", &drawing(10, 10, [20, 20, 20], 10, 4));

    let table = extract_color_profile(&path, QuantizerConfig::default()).unwrap();
    let prop = FeatureExtractor::non_background_proportion(&table);
    assert!((prop - 0.4).abs() < 1e-9);
}

// ============================================================================
// Corpus Tests
// ============================================================================

#[test]
fn test_analyze_shapes_corpus() {
    let dir = shapes_corpus();
    let table = analyze_corpus(dir.path(), ".png", "shape_color", QuantizerConfig::default())
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.columns(),
        ["drawingname", "prop_nonwhitepx", "numcolors", "shape", "color"]
    );

    let red = table.by_name("square_red").unwrap();
    assert_eq!(red.numcolors, 1);
    assert_eq!(red.field("shape"), Some("square"));
    assert_eq!(red.field("color"), Some("red"));
    // No white entry at all: reported as 0, not as full coverage.
    assert_eq!(red.prop_nonwhitepx, 0.0);

    let white = table.by_name("square_white").unwrap();
    assert_eq!(white.numcolors, 1);
    assert_eq!(white.prop_nonwhitepx, 0.0);
    assert_eq!(white.field("color"), Some("white"));
}

#[test]
fn test_corpus_joins_features_with_fields() {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "house_immediate_p001.png", &drawing(10, 10, [0, 0, 0], 5, 2));
    save(dir.path(), "house_delay_p001.png", &drawing(10, 10, [0, 0, 255], 10, 5));
    save(dir.path(), "tree_delay_p002.png", &drawing(10, 10, [0, 128, 0], 1, 1));

    let table = analyze_corpus(
        dir.path(),
        ".png",
        "category_timecond_participant",
        QuantizerConfig::default(),
    )
    .unwrap();
    assert_eq!(table.len(), 3);

    let immediate = table.by_name("house_immediate_p001").unwrap();
    assert!((immediate.prop_nonwhitepx - 0.1).abs() < 1e-9);
    assert_eq!(immediate.numcolors, 2);
    assert_eq!(immediate.field("timecond"), Some("immediate"));

    let delay = table.by_name("house_delay_p001").unwrap();
    assert!((delay.prop_nonwhitepx - 0.5).abs() < 1e-9);

    let tree = table.by_name("tree_delay_p002").unwrap();
    assert!((tree.prop_nonwhitepx - 0.01).abs() < 1e-9);
    assert_eq!(tree.field("participant"), Some("p002"));
}

#[test]
fn test_extension_filter() {
    let dir = shapes_corpus();
    std::fs::write(dir.path().join("readme.txt"), "not a drawing").unwrap();
    std::fs::write(dir.path().join("square_blue.json"), "{}").unwrap();

    let table = analyze_corpus(dir.path(), "png", "shape_color", QuantizerConfig::default())
        .unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_empty_directory_gives_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = analyze_corpus(dir.path(), ".png", "shape_color", QuantizerConfig::default())
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns().len(), 5);
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5u8 {
        let img = drawing(12, 12, [i * 40, 0, 255 - i * 40], (i as u32) + 1, 6);
        save(dir.path(), &format!("p{}_t{}.png", i, i % 2), &img);
    }

    let mut config = CorpusConfig::new(dir.path(), "participant_timecond");
    let first = CorpusAnalyzer::new(&config).unwrap().analyze(dir.path()).unwrap();
    let second = CorpusAnalyzer::new(&config).unwrap().analyze(dir.path()).unwrap();
    config.parallel = true;
    let parallel = CorpusAnalyzer::new(&config).unwrap().analyze(dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, parallel);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_schema_parse_examples() {
    let fields = parse_filename("cat_t1_p007", "category_timecond_participant").unwrap();
    assert_eq!(fields["category"], "cat");
    assert_eq!(fields["timecond"], "t1");
    assert_eq!(fields["participant"], "p007");

    assert!(matches!(
        parse_filename("cat_t1", "category_timecond_participant"),
        Err(AnalysisError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_corpus_schema_mismatch_is_hard_stop() {
    let dir = shapes_corpus();
    let result = analyze_corpus(
        dir.path(),
        ".png",
        "shape_color_size",
        QuantizerConfig::default(),
    );
    match result {
        Err(AnalysisError::SchemaMismatch { expected, found, .. }) => {
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("Expected SchemaMismatch, got: {:?}", other),
    }
}

#[test]
fn test_corrupt_drawing_is_hard_stop() {
    let dir = shapes_corpus();
    std::fs::write(dir.path().join("square_broken.png"), b"\x89PNG truncated").unwrap();

    let result = analyze_corpus(dir.path(), ".png", "shape_color", QuantizerConfig::default());
    assert!(matches!(result, Err(AnalysisError::ImageDecodeError { .. })));
}

#[test]
fn test_invalid_quantizer_settings() {
    let dir = shapes_corpus();
    let result = analyze_corpus(
        dir.path(),
        ".png",
        "shape_color",
        QuantizerConfig {
            tolerance: 101,
            max_colors: 32,
        },
    );
    assert!(matches!(result, Err(AnalysisError::InvalidParameter { .. })));

    let result = analyze_corpus(
        dir.path(),
        ".png",
        "shape_color",
        QuantizerConfig {
            tolerance: 12,
            max_colors: 0,
        },
    );
    assert!(matches!(result, Err(AnalysisError::InvalidParameter { .. })));
}

#[test]
fn test_missing_directory() {
    let result = analyze_corpus(
        Path::new("nonexistent_corpus_dir"),
        ".png",
        "shape_color",
        QuantizerConfig::default(),
    );
    assert!(matches!(result, Err(AnalysisError::DirectoryReadError { .. })));
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_result_table_json_records() {
    let dir = shapes_corpus();
    let table = analyze_corpus(dir.path(), ".png", "shape_color", QuantizerConfig::default())
        .unwrap();

    let out = dir.path().join("results.json");
    table.to_json_file(&out).unwrap();

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.get("drawingname").is_some());
        assert!(record.get("prop_nonwhitepx").is_some());
        assert!(record.get("numcolors").is_some());
        assert_eq!(record["shape"], "square");
    }
}
