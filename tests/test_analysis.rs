//! End-to-end tests for a full analysis run

use autolysis::pipeline::{run_analysis, AnalysisError, ConsoleOptions, EXIT_LOAD_FAILED};
use autolysis::plot::{PlotKind, PlottersRenderer};
use autolysis::report::{NO_VISUALIZATIONS, README_FILE};
use autolysis::AnalysisConfig;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::RecordingRenderer;

fn quiet() -> ConsoleOptions {
    ConsoleOptions::default()
}

#[test]
fn test_mixed_quality_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_file(temp_dir.path(), "data.csv", common::id_score_category_csv());
    let config = AnalysisConfig::new(&input).with_output_root(temp_dir.path());
    let renderer = RecordingRenderer::new();

    let outcome = run_analysis(&config, &renderer, quiet()).unwrap();

    assert_eq!(outcome.output_dir, temp_dir.path().join("data"));
    assert_eq!((outcome.rows, outcome.columns), (100, 3));
    assert_eq!(renderer.kinds(), vec![PlotKind::Histogram]);
    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(outcome.artifacts[0].file_name(), "score_histogram.png");

    let readme = std::fs::read_to_string(&outcome.readme).unwrap();
    assert!(readme.contains("**100 rows** and **3 columns**"));
    assert!(readme.contains("- **numeric**: 2 columns"));
    assert!(readme.contains("- **categorical**: 1 columns"));
    assert!(readme.contains("- **0 columns** contain missing values."));
    assert!(readme.contains("- **3 columns** are fully populated."));
    assert!(readme.contains("- **score**: Mean = "));
    assert!(!readme.contains("- **id**: Mean"));
    assert!(readme.contains("- **category**: Top 5 categories - 20, 20, 20, 20, 20"));
    assert!(readme.contains("![score_histogram.png](score_histogram.png)"));
}

#[test]
fn test_rerun_overwrites_with_identical_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_file(temp_dir.path(), "data.csv", common::id_score_category_csv());
    let config = AnalysisConfig::new(&input).with_output_root(temp_dir.path());

    let first = run_analysis(&config, &RecordingRenderer::new(), quiet()).unwrap();
    let first_bytes = std::fs::read(&first.readme).unwrap();
    let second = run_analysis(&config, &RecordingRenderer::new(), quiet()).unwrap();
    let second_bytes = std::fs::read(&second.readme).unwrap();

    assert_eq!(first.readme, second.readme);
    assert_eq!(first_bytes, second_bytes);
}

fn dir_listing(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_rerun_with_different_shape_removes_old_images() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("input");
    std::fs::create_dir(&input_dir).unwrap();
    let input = common::write_file(
        &input_dir,
        "data.csv",
        "a,b,c\n1,10,x\n2,20,y\n3,10,x\n1,30,z\n2,20,x\n3,10,y\n4,40,x\n5,10,z\n1,20,x\n2,30,x\n",
    );
    let config = AnalysisConfig::new(&input).with_output_root(temp_dir.path());

    let first = run_analysis(&config, &RecordingRenderer::new(), quiet()).unwrap();
    assert_eq!(
        dir_listing(&first.output_dir),
        vec!["README.md", "a_histogram.png", "b_box_plot.png"]
    );
    common::write_file(&first.output_dir, "notes.txt", "kept");

    common::write_file(
        &input_dir,
        "data.csv",
        "id,c\n1,x\n2,y\n3,x\n4,z\n5,x\n6,y\n7,x\n8,z\n9,x\n10,x\n",
    );
    let second = run_analysis(&config, &RecordingRenderer::new(), quiet()).unwrap();

    assert_eq!(second.output_dir, first.output_dir);
    assert_eq!(
        dir_listing(&second.output_dir),
        vec!["README.md", "c_categories.png", "notes.txt"]
    );
    let readme = std::fs::read_to_string(&second.readme).unwrap();
    assert!(!readme.contains("a_histogram.png"));
}

#[test]
fn test_load_failure_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = AnalysisConfig::new(temp_dir.path().join("missing.csv"))
        .with_output_root(temp_dir.path());

    let result = run_analysis(&config, &RecordingRenderer::new(), quiet());

    let err = result.unwrap_err();
    assert!(matches!(err, AnalysisError::Load(_)));
    assert_eq!(err.exit_code(), EXIT_LOAD_FAILED);
    assert!(!temp_dir.path().join("missing").exists());
}

#[test]
fn test_header_only_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_file(temp_dir.path(), "header.csv", "id,score,category\n");
    let config = AnalysisConfig::new(&input).with_output_root(temp_dir.path());
    let renderer = RecordingRenderer::new();

    match run_analysis(&config, &renderer, quiet()) {
        Ok(outcome) => {
            assert_eq!(outcome.rows, 0);
            assert!(outcome.artifacts.is_empty());
            assert!(renderer.kinds().is_empty());
            let readme = std::fs::read_to_string(&outcome.readme).unwrap();
            assert!(readme.contains("**0 rows** and **3 columns**"));
            assert!(readme.contains(NO_VISUALIZATIONS));
        }
        Err(e) => {
            assert!(matches!(e, AnalysisError::Load(_)));
            assert!(!temp_dir.path().join("header").exists());
        }
    }
}

#[test]
fn test_output_dir_named_after_last_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_file(temp_dir.path(), "sales.2024.csv", "a,b\n1,x\n2,y\n");
    let out_root = temp_dir.path().join("reports");
    let config = AnalysisConfig::new(&input).with_output_root(&out_root);

    let outcome = run_analysis(&config, &RecordingRenderer::new(), quiet()).unwrap();

    assert_eq!(outcome.output_dir, out_root.join("sales.2024"));
    assert!(out_root.join("sales.2024").join(README_FILE).is_file());
}

#[test]
fn test_no_plots_report_says_so() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_file(temp_dir.path(), "ids.csv", "id,name\n1,a\n2,b\n3,c\n");
    let config = AnalysisConfig::new(&input).with_output_root(temp_dir.path());

    let outcome = run_analysis(&config, &RecordingRenderer::new(), quiet()).unwrap();

    let readme = std::fs::read_to_string(&outcome.readme).unwrap();
    assert!(readme.contains(NO_VISUALIZATIONS));
    assert!(!readme.contains("!["));
}

#[test]
fn test_real_renderer_writes_png_files() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_file(temp_dir.path(), "data.csv", common::id_score_category_csv());
    let config = AnalysisConfig::new(&input).with_output_root(temp_dir.path());

    let outcome = run_analysis(&config, &PlottersRenderer::new(), quiet()).unwrap();

    assert_eq!(outcome.artifacts.len(), 1);
    let bytes = std::fs::read(&outcome.artifacts[0].path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
