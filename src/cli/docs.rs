//! Documentation content for cwfilter CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Membership,
    Grouping,
    Validation,
    Tasks,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "membership" | "in" => Some(Self::Membership),
            "grouping" | "groups" | "precedence" => Some(Self::Grouping),
            "validation" | "schema" | "catalog" => Some(Self::Validation),
            "tasks" | "task" | "shape" => Some(Self::Tasks),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"CWFILTER DOCUMENTATION

cwfilter builds and checks audience filter expressions for CrossWeb-style
measurement reports. A filter is a boolean condition over catalog variables
(sex, ageGroup, cityPop, crossMediaResourceId, ...) that selects the
respondents a report is computed for.

DOCUMENTATION CATEGORIES

  syntax            Variables, literals, and the overall grammar
  operators         Comparison operators and AND / OR
  membership        The IN (...) list form
  grouping          Parentheses and why AND / OR never mix without them
  validation        Checking filters against a catalog snapshot
  tasks             Task descriptors and result tables

QUICK REFERENCE

  sex = 1                       Comparison
  age >= 20 AND age <= 56       AND chain
  ageGroup IN (3, 4, 5)         Membership
  (a = 1 AND b = 2) OR c = 3    Grouping

Run 'cwfilter doc <category>' for detailed documentation.
Run 'cwfilter onboard' for a walkthrough of common audience filters.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Membership) => Ok(MEMBERSHIP_DOC),
        Some(DocCategory::Grouping) => Ok(GROUPING_DOC),
        Some(DocCategory::Validation) => Ok(VALIDATION_DOC),
        Some(DocCategory::Tasks) => Ok(TASKS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Variables, Literals, Grammar

GRAMMAR
  expr       := or_expr
  or_expr    := and_expr ( "OR" and_expr )*
  and_expr   := term ( "AND" term )*
  term       := comparison | membership | "(" expr ")"
  comparison := identifier comp_op literal
  comp_op    := "=" | "!=" | ">" | "<" | ">=" | "<="
  membership := identifier "IN" "(" literal ( "," literal )* ")"
  literal    := integer | quoted_string

VARIABLES
  A letter followed by letters or digits, case-sensitive.

    sex
    ageGroup
    crossMediaResourceId

LITERALS
  Integers (catalog codes, ages, resource ids), optionally negative:
    1    1067    -3

  Strings in single or double quotes. Inside them, \\ \' and \" escape
  a backslash or a quote:
    'Moscow'    "O'Hara"    'O\'Hara'

WHITESPACE
  Ignored between tokens. These are the same filter:
    sex=1 AND ageGroup=4
    sex = 1   AND   ageGroup = 4

KEYWORDS
  AND, OR and IN are uppercase. 'and' is read as a variable name and the
  filter is rejected.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison and Logic

COMPARISON OPERATORS
  =     Equal
  !=    Not equal
  <     Less than
  >     Greater than
  <=    Less than or equal
  >=    Greater than or equal

  Examples:
    sex = 1
    occupation != 1
    age >= 20

  Not operators: == <> !
  They are rejected with an "unknown operator" error.

LOGICAL OPERATORS
  AND   Both sides hold
  OR    Either side holds

  Examples:
    sex = 1 AND ageGroup = 4
    cityPop = 1 OR cityPop = 2

  A chain of the same operator reads left to right:
    age >= 20 AND age <= 56 AND sex = 2
"#;

const MEMBERSHIP_DOC: &str = r#"MEMBERSHIP - IN Lists

  variable IN (literal, literal, ...)
    True when the variable equals any listed value. Shorter than an OR
    chain of equalities and kept as a list when printed back.

    Example:
      ageGroup IN (3, 4, 5)
      same audience as: ageGroup = 3 OR ageGroup = 4 OR ageGroup = 5

  Constraints:
    - The list must not be empty: ageGroup IN () is an error
    - Every value must fit the variable's catalog domain
"#;

const GROUPING_DOC: &str = r#"GROUPING - Parentheses and Precedence

  AND and OR have no implicit precedence. Mixing them at one level is an
  error, never silently resolved:

    sex = 1 OR ageGroup = 4 AND occupation = 1
    => error: ambiguous precedence

  Say what you mean with parentheses:

    (sex = 1 OR ageGroup = 4) AND occupation = 1
    sex = 1 OR (ageGroup = 4 AND occupation = 1)

  Parentheses you write are kept when the filter is printed back:

    (sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)

PRETTY OUTPUT
  'cwfilter check --pretty' puts each group on its own indented lines:

    (
      sex = 1 AND ageGroup = 2
    ) OR (
      sex = 2 AND ageGroup = 3
    )
"#;

const VALIDATION_DOC: &str = r#"VALIDATION - Catalog Checks

  'cwfilter check FILTER --schema catalog.json' validates a filter locally
  before it is sent anywhere. Every problem is reported at once:

    unknown variable 'gender'
    'ageGroup' takes integer values, found 'young'
    9 is not an allowed value of 'sex'
    empty membership list for 'ageGroup'

  Each unknown variable is reported once, however often it appears.

CATALOG SNAPSHOT
  {"variables": [
    {"name": "sex", "label": "Sex",
     "domain": {"kind": "discrete", "codes": [1, 2]}},
    {"name": "age", "label": "Age",
     "domain": {"kind": "range", "min": 12}},
    {"name": "city", "domain": {"kind": "text"}},
    {"name": "work"}
  ]}

DOMAIN KINDS
  discrete    Integer codes; values outside the code list are rejected
  range       Integers; values in = and IN must lie within min/max
  text        Quoted strings
  free_form   Anything (the default when no domain is given)
"#;

const TASKS_DOC: &str = r#"TASKS - Descriptors and Results

BUILD A DESCRIPTOR
  cwfilter task --kind media --name "Ivi M35-44" \
    --date 2021-09-01:2021-09-30 --usetype 1,2,3 \
    --demo "sex = 1 AND ageGroup = 4" \
    --media "crossMediaResourceId = 1067" \
    --slice researchMonth --slice crossMediaResourceId \
    --stat reach

  Prints the JSON request body. Filters are embedded in canonical form.
  With --schema the filters are validated first.

SHAPE RAW RESULTS
  cwfilter shape --slice researchMonth --slice crossMediaResourceId \
    --label "Ivi M35-44" < result.json

  Groups raw rows by slice values and turns every other field into a
  statistic column. The first column, prj_name, holds the label.
  Output is tab-separated; --json prints the table as JSON.
"#;
