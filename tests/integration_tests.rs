use crossweb_filter::cli::{
    CheckOptions, CliError, EvalOptions, ShapeOptions, TaskOptions, execute_check, execute_eval,
    execute_shape, execute_task, get_doc_category, read_json_rows,
};
use crossweb_filter::config::Config;
use crossweb_filter::task::{ReportType, TaskError};
use std::{fs, path::PathBuf};

const CATALOG_JSON: &str = r#"{"variables": [
    {"name": "sex", "label": "Sex", "domain": {"kind": "discrete", "codes": [1, 2]}},
    {"name": "ageGroup", "label": "Age group", "domain": {"kind": "discrete", "codes": [1, 2, 3, 4, 5, 6, 7]}},
    {"name": "age", "label": "Age", "domain": {"kind": "range", "min": 12}},
    {"name": "crossMediaResourceId", "label": "Resource"}
]}"#;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cwfilter-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

fn task_options() -> TaskOptions {
    TaskOptions {
        report_type: ReportType::Media,
        name: "Ivi M35-44".to_string(),
        dates: vec!["2021-09-01:2021-09-30".to_string()],
        usage_types: vec![1, 2, 3],
        geo: None,
        demo: Some("sex = 1 AND ageGroup = 4".to_string()),
        media: Some("crossMediaResourceId = 1067".to_string()),
        slices: vec!["researchMonth".to_string()],
        statistics: vec!["reach".to_string()],
        schema: None,
    }
}

#[test]
fn test_check_renders_canonical_form() {
    let result = execute_check(&CheckOptions {
        filter: "sex=1 AND (ageGroup IN (3,4) OR age>=20)".to_string(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(result.rendered, "sex = 1 AND (ageGroup IN (3, 4) OR age >= 20)");
    assert!(!result.validated);
}

#[test]
fn test_check_pretty() {
    let result = execute_check(&CheckOptions {
        filter: "(sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)".to_string(),
        pretty: true,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        result.rendered,
        "(\n  sex = 1 AND ageGroup = 2\n) OR (\n  sex = 2 AND ageGroup = 3\n)"
    );
}

#[test]
fn test_check_against_catalog_file() {
    let schema = write_temp("check-catalog.json", CATALOG_JSON);

    let ok = execute_check(&CheckOptions {
        filter: "sex = 1 AND age >= 20".to_string(),
        schema: Some(schema.clone()),
        pretty: false,
    })
    .unwrap();
    assert!(ok.validated);

    let err = execute_check(&CheckOptions {
        filter: "gender = 1 OR gender = 2 OR sex = 3".to_string(),
        schema: Some(schema.clone()),
        pretty: false,
    })
    .unwrap_err();
    match err {
        CliError::Validation(e) => assert_eq!(e.violations.len(), 2),
        other => panic!("Expected validation error, got {:?}", other),
    }

    fs::remove_file(schema).ok();
}

#[test]
fn test_check_missing_catalog_file() {
    let err = execute_check(&CheckOptions {
        filter: "sex = 1".to_string(),
        schema: Some(PathBuf::from("/nonexistent/cwfilter-catalog.json")),
        pretty: false,
    })
    .unwrap_err();
    assert!(matches!(err, CliError::Catalog(_)));
}

#[test]
fn test_parse_error_shows_caret() {
    let err = execute_check(&CheckOptions {
        filter: "sex == 1".to_string(),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error: unknown operator '==' at position 4\n  sex == 1\n      ^"
    );
}

#[test]
fn test_eval() {
    let matched = execute_eval(&EvalOptions {
        filter: "sex = 1 AND ageGroup IN (3, 4, 5)".to_string(),
        input: Some(r#"{"sex": 1, "ageGroup": 4}"#.to_string()),
    })
    .unwrap();
    assert!(matched);

    let err = execute_eval(&EvalOptions {
        filter: "sex = 1".to_string(),
        input: None,
    })
    .unwrap_err();
    assert!(matches!(err, CliError::NoInput));

    let err = execute_eval(&EvalOptions {
        filter: "sex = 1".to_string(),
        input: Some("[1, 2]".to_string()),
    })
    .unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[test]
fn test_task_descriptor() {
    let body = execute_task(&task_options()).unwrap();
    assert_eq!(body["reportType"], "media");
    assert_eq!(body["filter"]["dateFilter"][0]["to"], "2021-09-30");
    assert_eq!(body["filter"]["demoFilter"], "sex = 1 AND ageGroup = 4");
    assert_eq!(body["filter"]["martFilter"], "crossMediaResourceId = 1067");
}

#[test]
fn test_task_rejects_malformed_period() {
    let mut options = task_options();
    options.dates = vec!["2021-09-01".to_string()];
    assert!(matches!(execute_task(&options), Err(CliError::InvalidInput(_))));

    options.dates = vec!["2021-09-30:2021-09-01".to_string()];
    assert!(matches!(
        execute_task(&options),
        Err(CliError::Task(TaskError::InvalidDescriptor(_)))
    ));
}

#[test]
fn test_task_validates_filters_with_catalog() {
    let schema = write_temp("task-catalog.json", CATALOG_JSON);
    let mut options = task_options();
    options.schema = Some(schema.clone());
    assert!(execute_task(&options).is_ok());

    options.geo = Some("cityPop = 1".to_string());
    assert!(matches!(
        execute_task(&options),
        Err(CliError::Task(TaskError::InvalidFilter { .. }))
    ));

    fs::remove_file(schema).ok();
}

#[test]
fn test_task_filter_parse_error() {
    let mut options = task_options();
    options.demo = Some("sex = 1 OR ageGroup = 4 AND age > 20".to_string());
    assert!(matches!(execute_task(&options), Err(CliError::Parse { .. })));
}

#[test]
fn test_shape_from_wrapped_rows() {
    let table = execute_shape(&ShapeOptions {
        input: Some(
            r#"{"data": [
                {"researchMonth": "2021-09", "reach": 1200},
                {"researchMonth": "2021-09", "adjustedReach": 1100}
            ]}"#
            .to_string(),
        ),
        slices: vec!["researchMonth".to_string()],
        label: "Ivi".to_string(),
    })
    .unwrap();
    assert_eq!(table.to_string(), "prj_name\tresearchMonth\treach\tadjustedReach\nIvi\t2021-09\t1200\t1100\n");
}

#[test]
fn test_read_json_rows_rejects_scalars() {
    assert_eq!(read_json_rows("[]").unwrap().len(), 0);
    assert!(matches!(read_json_rows("42"), Err(CliError::InvalidInput(_))));
    assert!(matches!(read_json_rows(r#"{"rows": []}"#), Err(CliError::InvalidInput(_))));
    assert!(matches!(read_json_rows("{"), Err(CliError::Json(_))));
}

#[test]
fn test_doc_categories() {
    assert!(get_doc_category("grouping").unwrap().contains("ambiguous precedence"));
    assert!(get_doc_category("IN").unwrap().starts_with("MEMBERSHIP"));
    assert!(matches!(get_doc_category("joins"), Err(CliError::UnknownCategory(_))));
}

#[test]
fn test_config_file() {
    let path = write_temp(
        "config.toml",
        "[catalog]\npath = \"catalog.json\"\n\n[logging]\nlevel = \"debug\"\n",
    );
    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.catalog.path, Some(PathBuf::from("catalog.json")));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.polling.interval_ms, 2000);
    fs::remove_file(path).ok();

    let broken = write_temp("broken.toml", "[polling]\ninterval_ms = \"fast\"\n");
    assert!(Config::load(Some(&broken)).is_err());
    fs::remove_file(broken).ok();
}
