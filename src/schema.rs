//! Read-only variable catalog snapshot.
//!
//! A [`Schema`] maps variable names to their value domains. It is loaded
//! once per session (usually from a JSON export of the catalog) and shared
//! immutably by every filter built in that session.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::LazyLock,
};

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogError;
use crate::value::{Literal, LiteralKind};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("identifier pattern is valid")
});

/// Words the lexer always reads as keywords.
const RESERVED: [&str; 3] = ["AND", "OR", "IN"];

/// Whether `name` can be written as a variable in a filter string.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !RESERVED.contains(&name)
}

/// The set of values a variable can take.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    /// Coded integers, e.g. `sex` in {1, 2}
    Discrete { codes: BTreeSet<i64> },

    /// Numeric range with optional inclusive bounds, e.g. `age` from 12
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Decimal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Decimal>,
    },

    /// Free text, compared with quoted strings
    Text,

    /// No domain information; any literal passes
    #[default]
    FreeForm,
}

impl Domain {
    pub fn discrete(codes: impl IntoIterator<Item = i64>) -> Self {
        Domain::Discrete {
            codes: codes.into_iter().collect(),
        }
    }

    pub fn range(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Domain::Range { min, max }
    }

    /// Literal kind the domain expects, `None` when anything goes.
    pub fn expected_kind(&self) -> Option<LiteralKind> {
        match self {
            Domain::Discrete { .. } | Domain::Range { .. } => Some(LiteralKind::Integer),
            Domain::Text => Some(LiteralKind::String),
            Domain::FreeForm => None,
        }
    }

    /// Whether a literal of the expected kind is an allowed value.
    ///
    /// Literals of the wrong kind are reported as type mismatches instead,
    /// so they count as contained here.
    pub fn contains(&self, value: &Literal) -> bool {
        match (self, value) {
            (Domain::Discrete { codes }, Literal::Integer(n)) => codes.contains(n),
            (Domain::Range { min, max }, Literal::Integer(n)) => {
                let n = Decimal::from(*n);
                min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
            }
            _ => true,
        }
    }
}

/// A catalog variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Identifier used in filter strings
    pub name: String,

    /// Human-readable catalog label
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub domain: Domain,
}

impl Variable {
    pub fn new(name: impl Into<String>, label: impl Into<String>, domain: Domain) -> Self {
        Variable {
            name: name.into(),
            label: label.into(),
            domain,
        }
    }
}

#[derive(Deserialize, Serialize)]
struct SchemaFile {
    variables: Vec<Variable>,
}

/// Immutable name -> variable map.
///
/// # Examples
///
/// ```
/// use crossweb_filter::schema::{Domain, Schema, Variable};
///
/// let schema = Schema::from_variables([
///     Variable::new("sex", "Sex", Domain::discrete([1, 2])),
///     Variable::new("age", "Age", Domain::range(None, None)),
/// ])
/// .unwrap();
///
/// assert!(schema.get("sex").is_some());
/// assert!(schema.get("gender").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    variables: BTreeMap<String, Variable>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate names and names that are not
    /// valid identifiers.
    pub fn from_variables(
        variables: impl IntoIterator<Item = Variable>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for variable in variables {
            if !is_valid_identifier(&variable.name) {
                return Err(CatalogError::InvalidSchema(format!(
                    "'{}' is not a valid variable name",
                    variable.name
                )));
            }
            if map.contains_key(&variable.name) {
                return Err(CatalogError::InvalidSchema(format!(
                    "variable '{}' is defined twice",
                    variable.name
                )));
            }
            map.insert(variable.name.clone(), variable);
        }
        Ok(Schema { variables: map })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: SchemaFile = serde_json::from_str(json)?;
        let schema = Self::from_variables(file.variables)?;
        debug!(variables = schema.len(), "catalog snapshot loaded");
        Ok(schema)
    }

    /// Loads a catalog snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let file = SchemaFile {
            variables: self.variables.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_snapshot() {
        let schema = Schema::from_json_str(
            r#"{"variables": [
                {"name": "sex", "label": "Sex", "domain": {"kind": "discrete", "codes": [1, 2]}},
                {"name": "age", "domain": {"kind": "range", "min": 12, "max": "99.5"}},
                {"name": "city", "domain": {"kind": "text"}},
                {"name": "work"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(schema.len(), 4);
        assert_eq!(schema.get("sex").unwrap().domain, Domain::discrete([1, 2]));
        assert_eq!(schema.get("work").unwrap().domain, Domain::FreeForm);
        assert!(schema.get("age").unwrap().domain.contains(&Literal::Integer(99)));
        assert!(!schema.get("age").unwrap().domain.contains(&Literal::Integer(100)));
        assert!(!schema.get("age").unwrap().domain.contains(&Literal::Integer(11)));
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let result = Schema::from_variables([
            Variable::new("sex", "", Domain::FreeForm),
            Variable::new("sex", "", Domain::Text),
        ]);
        assert!(matches!(result, Err(CatalogError::InvalidSchema(_))));
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        assert!(is_valid_identifier("crossMediaResourceId"));
        assert!(!is_valid_identifier("age_group"));
        assert!(!is_valid_identifier("1st"));
        assert!(Schema::from_variables([Variable::new("city pop", "", Domain::Text)]).is_err());
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        for keyword in ["AND", "OR", "IN"] {
            assert!(!is_valid_identifier(keyword));
            assert!(matches!(
                Schema::from_variables([Variable::new(keyword, "", Domain::FreeForm)]),
                Err(CatalogError::InvalidSchema(_))
            ));
        }
        assert!(is_valid_identifier("or"));
        assert!(is_valid_identifier("ORDER"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let schema = Schema::from_variables([
            Variable::new("sex", "Sex", Domain::discrete([1, 2])),
            Variable::new("age", "Age", Domain::range(Some(Decimal::from(12)), None)),
        ])
        .unwrap();
        let json = schema.to_json_string().unwrap();
        assert_eq!(Schema::from_json_str(&json).unwrap(), schema);
    }
}
