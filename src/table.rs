use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;

/// Cell value, with its type auto detected:
///   if it can be parsed as an int, then its type is i64
///   else if it can be parsed as a float, then its type is f64
///   else if it spells a bool, then its type is bool
///   else it is a raw String
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn parse(raw: &str) -> Self {
        if let Ok(v) = raw.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>() {
            return Value::Float(v);
        }
        match raw {
            "true" | "True" | "TRUE" | "t" | "T" => Value::Bool(true),
            "false" | "False" | "FALSE" | "f" | "F" => Value::Bool(false),
            _ => Value::Str(raw.into()),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

pub enum Aggregate {
    Count,
    Sum,
    Mean,
}

/// In-memory table: named headers over rows of typed cells.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Loads a CSV file. The first record is taken as the header row;
    /// every following record becomes a row of parsed cells.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut rdr = csv::Reader::from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading header row of {}", path.display()))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record =
                record.with_context(|| format!("reading record of {}", path.display()))?;
            rows.push(record.iter().map(Value::parse).collect());
        }
        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows, header excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Folds a named column to a scalar.
    pub fn aggregate(&self, column: &str, op: Aggregate) -> Result<f64> {
        let values = self
            .column(column)
            .ok_or_else(|| anyhow!("column `{}' is not found in table", column))?;
        match op {
            Aggregate::Count => Ok(values.len() as f64),
            Aggregate::Sum => numeric_sum(column, &values),
            Aggregate::Mean => {
                if values.is_empty() {
                    bail!("cannot take the mean of empty column `{}'", column);
                }
                Ok(numeric_sum(column, &values)? / values.len() as f64)
            }
        }
    }
}

fn numeric_sum(column: &str, values: &[&Value]) -> Result<f64> {
    let mut sum = 0f64;
    for value in values {
        sum += value.as_f64().ok_or_else(|| {
            anyhow!("expected int or float when aggregating column `{}'", column)
        })?;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    const CONTENT: &str = "title,year,rating,seen\n\
                           Amadeus,1984,8.5,true\n\
                           Brazil,1985,7.5,False\n";

    fn fixture(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn parse_detects_types_in_order() {
        assert_eq!(Value::parse("1984"), Value::Int(1984));
        assert_eq!(Value::parse("8.5"), Value::Float(8.5));
        assert_eq!(Value::parse("True"), Value::Bool(true));
        assert_eq!(Value::parse("f"), Value::Bool(false));
        assert_eq!(Value::parse("Brazil"), Value::Str("Brazil".into()));
    }

    #[test]
    fn from_path_loads_headers_and_typed_rows() {
        let file = fixture(CONTENT);
        let table = Table::from_path(file.path()).unwrap();
        assert_eq!(table.headers(), ["title", "year", "rating", "seen"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("seen").unwrap(),
            [&Value::Bool(true), &Value::Bool(false)]
        );
    }

    #[test]
    fn column_lookup_is_by_name() {
        let file = fixture(CONTENT);
        let table = Table::from_path(file.path()).unwrap();
        assert_eq!(
            table.column("title").unwrap(),
            [&Value::Str("Amadeus".into()), &Value::Str("Brazil".into())]
        );
        assert!(table.column("director").is_none());
    }

    #[test]
    fn aggregates_over_numeric_columns() {
        let file = fixture(CONTENT);
        let table = Table::from_path(file.path()).unwrap();
        assert_eq!(table.aggregate("rating", Aggregate::Count).unwrap(), 2.0);
        assert_eq!(table.aggregate("rating", Aggregate::Sum).unwrap(), 16.0);
        assert_eq!(table.aggregate("rating", Aggregate::Mean).unwrap(), 8.0);
        assert_eq!(table.aggregate("year", Aggregate::Sum).unwrap(), 3969.0);
    }

    #[test]
    fn aggregate_rejects_non_numeric_and_unknown_columns() {
        let file = fixture(CONTENT);
        let table = Table::from_path(file.path()).unwrap();
        assert!(table.aggregate("title", Aggregate::Sum).is_err());
        assert!(table.aggregate("director", Aggregate::Count).is_err());
    }

    #[test]
    fn mean_of_empty_table_fails() {
        let file = fixture("title,rating\n");
        let table = Table::from_path(file.path()).unwrap();
        assert!(table.is_empty());
        assert!(table.aggregate("rating", Aggregate::Mean).is_err());
        assert_eq!(table.aggregate("rating", Aggregate::Count).unwrap(), 0.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Table::from_path(Path::new("no/such/Filmes.csv")).is_err());
    }
}
