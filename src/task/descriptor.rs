use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde_json::{Value, json};

use crate::{
    ast::Expr,
    output::to_filter_string,
    schema::Schema,
    task::{FilterRole, TaskError},
    validator::validate,
};

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date pattern is valid")
});

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Whether `date` is a real calendar day written as `YYYY-MM-DD`.
fn is_calendar_date(date: &str) -> bool {
    let Some(caps) = DATE.captures(date) else {
        return false;
    };
    let field = |i: usize| caps[i].parse::<u32>().unwrap_or(0);
    let (year, month, day) = (field(1), field(2), field(3));
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

/// Kind of report the remote service computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Per-resource audience statistics
    Media,
    /// Total internet audience
    Total,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Media => "media",
            ReportType::Total => "total",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "media" => Ok(ReportType::Media),
            "total" => Ok(ReportType::Total),
            other => Err(format!("unknown report type '{}' (expected media or total)", other)),
        }
    }
}

/// Inclusive `YYYY-MM-DD` period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    fn check(&self) -> Result<(), TaskError> {
        for date in [&self.from, &self.to] {
            if !is_calendar_date(date) {
                return Err(TaskError::InvalidDescriptor(format!(
                    "'{}' is not a YYYY-MM-DD date",
                    date
                )));
            }
        }
        // Zero-padded ISO dates order lexicographically.
        if self.from > self.to {
            return Err(TaskError::InvalidDescriptor(format!(
                "period {}..{} ends before it starts",
                self.from, self.to
            )));
        }
        Ok(())
    }
}

/// Everything the remote service needs to compute one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    report_type: ReportType,
    name: String,
    date_ranges: Vec<DateRange>,
    usage_types: Vec<u32>,
    geo_filter: Option<Expr>,
    demo_filter: Option<Expr>,
    media_filter: Option<Expr>,
    slices: Vec<String>,
    statistics: Vec<String>,
}

impl TaskDescriptor {
    pub fn builder(report_type: ReportType, name: impl Into<String>) -> TaskDescriptorBuilder {
        TaskDescriptorBuilder {
            descriptor: TaskDescriptor {
                report_type,
                name: name.into(),
                date_ranges: Vec::new(),
                usage_types: Vec::new(),
                geo_filter: None,
                demo_filter: None,
                media_filter: None,
                slices: Vec::new(),
                statistics: Vec::new(),
            },
        }
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    /// Display name of the report
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_ranges(&self) -> &[DateRange] {
        &self.date_ranges
    }

    pub fn usage_types(&self) -> &[u32] {
        &self.usage_types
    }

    pub fn slices(&self) -> &[String] {
        &self.slices
    }

    pub fn statistics(&self) -> &[String] {
        &self.statistics
    }

    pub fn filter(&self, role: FilterRole) -> Option<&Expr> {
        match role {
            FilterRole::Geography => self.geo_filter.as_ref(),
            FilterRole::Demography => self.demo_filter.as_ref(),
            FilterRole::Media => self.media_filter.as_ref(),
        }
    }

    fn filters(&self) -> impl Iterator<Item = (FilterRole, &Expr)> {
        [FilterRole::Geography, FilterRole::Demography, FilterRole::Media]
            .into_iter()
            .filter_map(|role| self.filter(role).map(|expr| (role, expr)))
    }

    /// Validates every present filter, stopping at the first filter with
    /// violations.
    pub fn validate_filters(&self, schema: &Schema) -> Result<(), TaskError> {
        for (role, expr) in self.filters() {
            validate(expr, schema).map_err(|source| TaskError::InvalidFilter { role, source })?;
        }
        Ok(())
    }

    /// Renders the request body. Filters are embedded in canonical form and
    /// absent filters are omitted.
    pub fn to_json(&self) -> Value {
        let mut filter = serde_json::Map::new();
        filter.insert(
            "dateFilter".to_string(),
            self.date_ranges
                .iter()
                .map(|r| json!({"from": r.from, "to": r.to}))
                .collect(),
        );
        filter.insert("usetypeFilter".to_string(), json!(self.usage_types));
        for (role, expr) in self.filters() {
            filter.insert(
                role.json_key().to_string(),
                Value::String(to_filter_string(expr)),
            );
        }

        json!({
            "reportType": self.report_type.as_str(),
            "name": self.name,
            "filter": filter,
            "slices": self.slices,
            "statistics": self.statistics,
        })
    }
}

/// Fluent assembly of a [`TaskDescriptor`]; checked once in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TaskDescriptorBuilder {
    descriptor: TaskDescriptor,
}

impl TaskDescriptorBuilder {
    pub fn date_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.descriptor.date_ranges.push(DateRange {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    pub fn usage_types(mut self, codes: impl IntoIterator<Item = u32>) -> Self {
        self.descriptor.usage_types.extend(codes);
        self
    }

    pub fn geo_filter(mut self, expr: Expr) -> Self {
        self.descriptor.geo_filter = Some(expr);
        self
    }

    pub fn demo_filter(mut self, expr: Expr) -> Self {
        self.descriptor.demo_filter = Some(expr);
        self
    }

    pub fn media_filter(mut self, expr: Expr) -> Self {
        self.descriptor.media_filter = Some(expr);
        self
    }

    pub fn slice(mut self, name: impl Into<String>) -> Self {
        self.descriptor.slices.push(name.into());
        self
    }

    pub fn slices<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.descriptor.slices.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn statistic(mut self, name: impl Into<String>) -> Self {
        self.descriptor.statistics.push(name.into());
        self
    }

    pub fn statistics<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.descriptor
            .statistics
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<TaskDescriptor, TaskError> {
        let descriptor = self.descriptor;

        if descriptor.date_ranges.is_empty() {
            return Err(TaskError::InvalidDescriptor(
                "at least one date range is required".into(),
            ));
        }
        for range in &descriptor.date_ranges {
            range.check()?;
        }
        if descriptor.statistics.is_empty() {
            return Err(TaskError::InvalidDescriptor(
                "at least one statistic is required".into(),
            ));
        }

        Ok(descriptor)
    }
}
