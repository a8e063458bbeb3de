use csv_eda::charts::{FigureCollector, FigureKind, SvgDirectory};
use csv_eda::data::{ColumnClassifier, DataLoader, ValueKind};
use csv_eda::{
    stats_report, EdaError, LoadOptions, ReportConfig, ReportDriver, StatsReport, WarningPolicy,
};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir.
fn write_csv(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write CSV");
    (dir, path)
}

/// 100 rows of `age,income,city` with `income` missing on rows 10, 50 and 90.
fn people_csv() -> String {
    let cities = ["Oslo", "Lima", "Pune", "Kyiv"];
    let mut csv = String::from("age,income,city\n");
    for i in 0..100 {
        let income = if i % 40 == 10 {
            String::new()
        } else {
            format!("{:.2}", 1000.0 + i as f64 * 12.5)
        };
        writeln!(csv, "{},{},{}", 20 + i % 50, income, cities[i % 4]).unwrap();
    }
    csv
}

#[test]
fn people_scenario_counts_and_kinds() {
    let (_dir, path) = write_csv("people.csv", &people_csv());
    let table = DataLoader::load_csv(&path, &LoadOptions::default()).unwrap();

    let classified = ColumnClassifier::split(&table);
    assert_eq!(classified.numeric.column_names(), ["age", "income"]);
    assert_eq!(classified.non_numeric.column_names(), ["city"]);

    let report = StatsReport::from_table(&table).unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report.get("income").unwrap().null_count, 3);
    assert_eq!(report.get("age").unwrap().null_count, 0);
    assert_eq!(report.get("city").unwrap().null_count, 0);
    assert_eq!(report.get("age").unwrap().data_type, ValueKind::Integer);
    assert_eq!(report.get("income").unwrap().data_type, ValueKind::Float);
    assert!(report.rows().iter().all(|row| row.entry_count == 100));
    assert!(report.get("city").unwrap().mean.is_none());
}

#[test]
fn stats_report_from_path() {
    let (_dir, path) = write_csv("small.csv", "a,b,note\n1,2.5,x\n3,,y\n5,4.5,\n");
    let report = stats_report(&path, &LoadOptions::default()).unwrap();

    let names: Vec<&str> = report.rows().iter().map(|r| r.column.as_str()).collect();
    assert_eq!(names, ["a", "b", "note"]);
    let a = report.get("a").unwrap();
    assert_eq!(a.mean, Some(3.0));
    assert_eq!(a.min, Some(1.0));
    assert_eq!(a.p50, Some(3.0));
    assert_eq!(a.max, Some(5.0));
    assert_eq!(report.get("b").unwrap().null_count, 1);
    assert_eq!(report.get("note").unwrap().null_count, 1);
}

#[test]
fn full_analysis_renders_three_figures() {
    let (_dir, path) = write_csv("people.csv", &people_csv());
    let mut collector = FigureCollector::new();
    let config = ReportConfig::new(2).unwrap();

    let summary = ReportDriver::run(&path, &config, &mut collector).unwrap();
    assert_eq!(summary.figures, 3);
    assert_eq!(summary.rows, 100);
    assert_eq!(summary.numeric_columns, 2);

    let kinds: Vec<FigureKind> = collector.figures().iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        [FigureKind::BoxGrid, FigureKind::HistogramGrid, FigureKind::Heatmap]
    );
    let layout = collector.figures()[0].layout.unwrap();
    assert_eq!((layout.rows(), layout.cols(), layout.hidden()), (1, 2, 0));
}

#[test]
fn three_numeric_columns_two_wide_hide_one_cell() {
    let (_dir, path) = write_csv("xyz.csv", "x,y,z\n1,2,3\n2,4,1\n3,5,2\n");
    let mut collector = FigureCollector::new();
    ReportDriver::initial_analysis(&path, 2, &mut collector).unwrap();

    for figure in &collector.figures()[..2] {
        let layout = figure.layout.unwrap();
        assert_eq!((layout.rows(), layout.cols()), (2, 2));
        assert_eq!(layout.hidden(), 1);
    }
}

#[test]
fn zero_grid_width_fails_before_any_figure() {
    let (_dir, path) = write_csv("xyz.csv", "x\n1\n2\n");
    let mut collector = FigureCollector::new();

    let err = ReportDriver::initial_analysis(&path, 0, &mut collector).unwrap_err();
    assert!(matches!(err, EdaError::InvalidConfig(_)));
    assert!(collector.figures().is_empty());
}

#[test]
fn missing_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut collector = FigureCollector::new();

    let err =
        ReportDriver::initial_analysis(dir.path().join("absent.csv"), 3, &mut collector).unwrap_err();
    assert!(matches!(err, EdaError::DataAccess { .. }));
    assert!(collector.figures().is_empty());
}

#[test]
fn text_only_table_stops_at_the_heatmap() {
    let (_dir, path) = write_csv("names.csv", "name,city\nann,Oslo\nbob,Lima\n");
    let mut collector = FigureCollector::new();

    let err = ReportDriver::initial_analysis(&path, 3, &mut collector).unwrap_err();
    assert!(matches!(err, EdaError::InsufficientData(_)));

    // Both grids were rendered as empty figures before the heatmap failed.
    assert_eq!(collector.figures().len(), 2);
    assert!(collector
        .figures()
        .iter()
        .all(|f| f.layout.map(|l| l.plots()) == Some(0)));
}

#[test]
fn advisories_do_not_change_results() {
    let csv = "single,flat,other\n5,2,1\n,2,2\n,2,4\n";
    let (_dir, path) = write_csv("edge.csv", csv);

    let report = stats_report(&path, &LoadOptions::default()).unwrap();
    let single = report.get("single").unwrap();
    assert_eq!(single.mean, Some(5.0));
    assert_eq!(single.std, None);

    for policy in [WarningPolicy::Suppress, WarningPolicy::Show] {
        let mut collector = FigureCollector::new();
        let config = ReportConfig::default().with_warnings(policy);
        let summary = ReportDriver::run(&path, &config, &mut collector).unwrap();
        assert_eq!(summary.figures, 3);
        assert!(!summary.advisories.is_empty());
    }
}

#[test]
fn inf_as_missing_is_per_call() {
    let (_dir, path) = write_csv("inf.csv", "v\n1.5\ninf\n2.5\n");

    let kept = stats_report(&path, &LoadOptions::default()).unwrap();
    assert_eq!(kept.get("v").unwrap().null_count, 0);

    let options = LoadOptions::default().with_inf_as_missing(true);
    let dropped = stats_report(&path, &options).unwrap();
    let v = dropped.get("v").unwrap();
    assert_eq!(v.null_count, 1);
    assert_eq!(v.mean, Some(2.0));
}

#[test]
fn svg_directory_receives_every_figure() {
    let (dir, path) = write_csv("people.csv", &people_csv());
    let out = dir.path().join("figures");
    let mut surface = SvgDirectory::new(&out).unwrap();

    ReportDriver::initial_analysis(&path, 3, &mut surface).unwrap();
    assert_eq!(surface.written().len(), 3);
    let heatmap = fs::read_to_string(out.join("03_correlation_heatmap.svg")).unwrap();
    assert!(heatmap.contains("<svg"));
    assert!(heatmap.contains("Correlation Heatmap"));
}
