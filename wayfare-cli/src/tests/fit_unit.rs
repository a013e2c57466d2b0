//! Focused unit tests covering fit CLI configuration and execution.

use super::helpers::{Workspace, stdout_text};
use super::*;
use crate::fit::{FitArgs, FitConfig, FitSummary, run_fit_with};
use rstest::{fixture, rstest};
use wayfare_model::{FitOptions, ModelFitError, read_model_file};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

#[rstest]
fn converting_fit_without_training_errors() {
    let err = FitConfig::try_from(FitArgs::default()).expect_err("missing training should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_TRAINING);
            assert_eq!(env, ENV_FIT_TRAINING);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn fit_config_applies_defaults() {
    let args = FitArgs {
        training: Some("trips.csv".into()),
        ..FitArgs::default()
    };
    let config = FitConfig::try_from(args).expect("config should build");
    assert_eq!(config.output, DEFAULT_MODEL_PATH);
    assert_eq!(config.options, FitOptions::default());
}

#[rstest]
fn fit_config_honours_overrides() {
    let args = FitArgs {
        training: Some("trips.json".into()),
        output: Some("out/model.json".into()),
        max_iterations: Some(50),
        tolerance: Some(1e-6),
    };
    let config = FitConfig::try_from(args).expect("config should build");
    assert_eq!(config.output, "out/model.json");
    assert_eq!(config.options.max_iterations, 50);
    assert_eq!(config.options.tolerance, 1e-6);
}

#[rstest]
fn validate_sources_reports_missing_training(workspace: Workspace) {
    let config = FitConfig {
        training: workspace.path("absent.csv"),
        output: workspace.path("model.json"),
        options: FitOptions::default(),
    };
    match config.validate_sources().expect_err("expected failure") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_TRAINING),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(workspace: Workspace) {
    let config = FitConfig {
        training: workspace.root().to_path_buf(),
        output: workspace.path("model.json"),
        options: FitOptions::default(),
    };
    match config.validate_sources().expect_err("expected failure") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_TRAINING),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn fit_writes_model_and_prints_report(workspace: Workspace) {
    let output = workspace.path("models/latest.json");
    let args = FitArgs {
        training: Some(workspace.trips()),
        output: Some(output.clone()),
        ..FitArgs::default()
    };
    let mut buffer = Vec::new();
    run_fit_with(args, &mut buffer).expect("fit should succeed");

    let summary: FitSummary =
        serde_json::from_str(&stdout_text(buffer)).expect("summary should be JSON");
    assert_eq!(summary.model_path, output);
    assert_eq!(summary.report.iterations, 8);
    assert_eq!(summary.report.records, 10);

    let saved = read_model_file(&output).expect("model file written");
    assert!((saved.coefficients().intercept - summary.coefficients.intercept).abs() < 1e-12);
}

#[rstest]
fn fit_surfaces_separation(workspace: Workspace) {
    let args = FitArgs {
        training: Some(workspace.path("separable.csv")),
        output: Some(workspace.path("model.json")),
        ..FitArgs::default()
    };
    let err = run_fit_with(args, &mut Vec::new()).expect_err("separable data should fail");
    match err {
        CliError::Fit(ModelFitError::PerfectSeparation { .. }) => {}
        other => panic!("expected PerfectSeparation, found {other:?}"),
    }
}

#[rstest]
fn fit_subcommand_parses_flags() {
    let cli = Cli::try_parse_from([
        "wayfare",
        "fit",
        "--training",
        "trips.csv",
        "--output",
        "model.json",
        "--max-iterations",
        "20",
    ])
    .expect("arguments should parse");
    match cli.command {
        Command::Fit(args) => {
            assert_eq!(args.training.as_deref().map(Utf8Path::as_str), Some("trips.csv"));
            assert_eq!(args.max_iterations, Some(20));
        }
        Command::Rank(_) => panic!("expected fit command"),
    }
}
