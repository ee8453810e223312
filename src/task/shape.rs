use std::{collections::HashMap, fmt};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Name of the first column, holding the caller's display label.
pub const LABEL_COLUMN: &str = "prj_name";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("result row {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("result row {index} has no value for slice '{slice}'")]
    MissingSlice { index: usize, slice: String },
}

/// Flat result table: one row per distinct slice combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tab-separated, header first.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(render_cell).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

struct Group {
    slice_values: Vec<Value>,
    statistics: HashMap<String, Value>,
}

/// Groups raw rows by their slice values and pivots every other key into a
/// statistic column.
///
/// Groups keep the order in which they first appear, as do statistic
/// columns. Statistics missing from a group are `null`; when a group sees
/// the same statistic twice, the later row wins.
///
/// # Examples
///
/// ```
/// use crossweb_filter::task::shape_result;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"researchMonth": "2021-09", "reach": 1200}),
///     json!({"researchMonth": "2021-09", "adjustedReach": 1100}),
/// ];
/// let table = shape_result(&rows, &["researchMonth"], "Ivi").unwrap();
///
/// assert_eq!(table.columns, ["prj_name", "researchMonth", "reach", "adjustedReach"]);
/// assert_eq!(table.rows.len(), 1);
/// ```
pub fn shape_result<S: AsRef<str>>(
    rows: &[Value],
    slices: &[S],
    label: &str,
) -> Result<Table, ShapeError> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut statistic_columns: Vec<String> = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or(ShapeError::NotAnObject { index })?;

        let slice_values = slices
            .iter()
            .map(|slice| {
                object
                    .get(slice.as_ref())
                    .cloned()
                    .ok_or_else(|| ShapeError::MissingSlice {
                        index,
                        slice: slice.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let key = Value::Array(slice_values.clone()).to_string();
        let group_index = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(Group {
                slice_values,
                statistics: HashMap::new(),
            });
            groups.len() - 1
        });

        for (name, value) in object {
            if slices.iter().any(|s| s.as_ref() == name) {
                continue;
            }
            if !statistic_columns.contains(name) {
                statistic_columns.push(name.clone());
            }
            groups[group_index]
                .statistics
                .insert(name.clone(), value.clone());
        }
    }

    let mut columns = vec![LABEL_COLUMN.to_string()];
    columns.extend(slices.iter().map(|s| s.as_ref().to_string()));
    columns.extend(statistic_columns.iter().cloned());

    let rows = groups
        .into_iter()
        .map(|mut group| {
            let mut row = vec![Value::String(label.to_string())];
            row.append(&mut group.slice_values);
            row.extend(
                statistic_columns
                    .iter()
                    .map(|name| group.statistics.remove(name).unwrap_or(Value::Null)),
            );
            row
        })
        .collect();

    Ok(Table { columns, rows })
}
