// tests/validator_tests.rs

use crossweb_filter::builder::var;
use crossweb_filter::schema::{Domain, Schema, Variable};
use crossweb_filter::{
    FilterError, Literal, LiteralKind, ParseError, Violation, check_structure, parse,
    parse_validated, validate,
};
use rust_decimal::Decimal;

fn catalog() -> Schema {
    Schema::from_variables([
        Variable::new("sex", "Sex", Domain::discrete([1, 2])),
        Variable::new("ageGroup", "Age group", Domain::discrete(1..=7)),
        Variable::new("occupation", "Occupation", Domain::discrete(1..=9)),
        Variable::new(
            "age",
            "Age",
            Domain::range(Some(Decimal::from(12)), Some(Decimal::from(99))),
        ),
        Variable::new("city", "City", Domain::Text),
        Variable::new("crossMediaResourceId", "Resource", Domain::FreeForm),
    ])
    .unwrap()
}

fn violations(input: &str) -> Vec<Violation> {
    validate(&parse(input).unwrap(), &catalog())
        .unwrap_err()
        .violations
}

// ============================================================================
// Valid Filters
// ============================================================================

#[test]
fn test_audience_filters_are_valid() {
    let schema = catalog();
    for input in [
        "sex = 1 AND ageGroup = 4",
        "(sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)",
        "age >= 20 AND age <= 56",
        "ageGroup IN (3, 4, 5) AND occupation != 1",
        "city = 'Moscow' OR city = 'Saint Petersburg'",
        "crossMediaResourceId = 1067",
        "crossMediaResourceId = 'any text'",
    ] {
        let expr = parse(input).unwrap();
        assert!(validate(&expr, &schema).is_ok(), "Failed for input: {}", input);
    }
}

#[test]
fn test_validation_leaves_tree_unchanged() {
    let expr = parse("(sex = 1) AND age > 200").unwrap();
    let before = expr.clone();
    let _ = validate(&expr, &catalog());
    assert_eq!(expr, before);
}

// ============================================================================
// Unknown Variables
// ============================================================================

#[test]
fn test_unknown_variable() {
    assert_eq!(
        violations("gender = 1"),
        vec![Violation::UnknownVariable {
            name: "gender".to_string()
        }]
    );
}

#[test]
fn test_unknown_variable_reported_once() {
    let err = validate(
        &parse("gender = 1 OR gender = 2 OR region IN (1, 2) OR gender != 3").unwrap(),
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err.unknown_variables().collect::<Vec<_>>(), vec!["gender", "region"]);
    assert_eq!(err.violations.len(), 2);
}

#[test]
fn test_variable_names_are_case_sensitive() {
    assert_eq!(
        violations("Sex = 1"),
        vec![Violation::UnknownVariable {
            name: "Sex".to_string()
        }]
    );
}

// ============================================================================
// Literal Kinds and Domains
// ============================================================================

#[test]
fn test_type_mismatch() {
    assert_eq!(
        violations("ageGroup = 'young'"),
        vec![Violation::TypeMismatch {
            variable: "ageGroup".to_string(),
            expected: LiteralKind::Integer,
            found: Literal::from("young"),
        }]
    );
    assert_eq!(
        violations("city = 5"),
        vec![Violation::TypeMismatch {
            variable: "city".to_string(),
            expected: LiteralKind::String,
            found: Literal::Integer(5),
        }]
    );
}

#[test]
fn test_discrete_code_out_of_domain() {
    assert_eq!(
        violations("sex = 9"),
        vec![Violation::ValueOutOfDomain {
            variable: "sex".to_string(),
            value: Literal::Integer(9),
        }]
    );
    // Discrete domains are checked for every operator.
    assert_eq!(violations("sex != 3").len(), 1);
}

#[test]
fn test_membership_values_checked_individually() {
    assert_eq!(
        violations("ageGroup IN (3, 8, 'x', 9)"),
        vec![
            Violation::ValueOutOfDomain {
                variable: "ageGroup".to_string(),
                value: Literal::Integer(8),
            },
            Violation::TypeMismatch {
                variable: "ageGroup".to_string(),
                expected: LiteralKind::Integer,
                found: Literal::from("x"),
            },
            Violation::ValueOutOfDomain {
                variable: "ageGroup".to_string(),
                value: Literal::Integer(9),
            },
        ]
    );
}

#[test]
fn test_range_bounds_apply_to_equality_and_membership() {
    assert_eq!(violations("age = 5").len(), 1);
    assert_eq!(violations("age IN (20, 100)").len(), 1);

    let schema = catalog();
    for input in ["age > 5", "age < 150", "age >= 0", "age != 100"] {
        assert!(validate(&parse(input).unwrap(), &schema).is_ok(), "Failed for input: {}", input);
    }
}

#[test]
fn test_all_violations_collected_in_order() {
    let found = violations("gender = 1 AND (sex = 3 OR city = 4)");
    assert_eq!(found.len(), 3);
    assert!(matches!(found[0], Violation::UnknownVariable { .. }));
    assert!(matches!(found[1], Violation::ValueOutOfDomain { .. }));
    assert!(matches!(found[2], Violation::TypeMismatch { .. }));
}

#[test]
fn test_error_message_lists_violations() {
    let err = validate(&parse("gender = 1 AND sex = 9").unwrap(), &catalog()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid filter: unknown variable 'gender'; 9 is not an allowed value of 'sex'"
    );
}

// ============================================================================
// Hand-built Trees
// ============================================================================

#[test]
fn test_empty_membership_from_builder() {
    let expr = var("ageGroup").is_in(Vec::<i64>::new());
    assert_eq!(
        validate(&expr, &catalog()).unwrap_err().violations,
        vec![Violation::EmptyMembershipList {
            variable: "ageGroup".to_string()
        }]
    );
    assert!(check_structure(&expr).is_err());
}

#[test]
fn test_invalid_identifier_from_builder() {
    let expr = var("age_group").eq(1).and(var("age_group").eq(2));
    let err = check_structure(&expr).unwrap_err();
    assert_eq!(
        err.violations,
        vec![Violation::InvalidIdentifier {
            name: "age_group".to_string()
        }]
    );
}

#[test]
fn test_keyword_variable_names_rejected() {
    let expr = var("OR").eq(1).and(var("sex").eq(2));
    assert_eq!(
        check_structure(&expr).unwrap_err().violations,
        vec![Violation::InvalidIdentifier {
            name: "OR".to_string()
        }]
    );
    assert!(validate(&expr, &catalog()).is_err());
    assert!(Schema::from_variables([Variable::new("IN", "", Domain::FreeForm)]).is_err());
}

#[test]
fn test_check_structure_ignores_catalog() {
    assert!(check_structure(&parse("gender = 'x' AND sex = 99").unwrap()).is_ok());
}

// ============================================================================
// Parse and Validate
// ============================================================================

#[test]
fn test_parse_validated() {
    let schema = catalog();
    assert!(parse_validated("sex = 1", &schema).is_ok());
    assert!(matches!(
        parse_validated("sex == 1", &schema),
        Err(FilterError::Parse(ParseError::UnknownOperator { .. }))
    ));
    assert!(matches!(
        parse_validated("sex = 3", &schema),
        Err(FilterError::Validation(_))
    ));
}
