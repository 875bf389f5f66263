/// Case/whitespace normalization applied to every join key: function names,
/// column headers, requirement levels, and response values.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Empty,
}

impl Value {
    pub fn from_cell(cell: &str) -> Value {
        if cell.is_empty() {
            Value::Empty
        } else {
            Value::Text(cell.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::Text(s) => s,
            Value::Empty => "",
        }
    }

    pub fn normalized(&self) -> String {
        normalize(self.as_str())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

/// An in-memory table: ordered headers plus rows of tagged cells. Headers and
/// cell text are kept exactly as read; normalization happens at lookup time.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Table {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating so every row has exactly one cell
    /// per header.
    pub fn push_row(&mut self, mut cells: Vec<Value>) {
        cells.truncate(self.headers.len());
        cells.resize(self.headers.len(), Value::Empty);
        self.rows.push(cells);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the first header matching `name` after normalization.
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = normalize(name);
        self.headers.iter().position(|h| normalize(h) == wanted)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            headers: &self.headers,
            cells,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [Value],
}

impl<'a> Row<'a> {
    /// Cell by position. Rows are padded on insert, so any index below the
    /// header count is valid.
    pub fn cell(self, index: usize) -> &'a Value {
        &self.cells[index]
    }

    /// Cell under the first header matching `name` after normalization.
    pub fn get(self, name: &str) -> Option<&'a Value> {
        let wanted = normalize(name);
        self.headers
            .iter()
            .position(|h| normalize(h) == wanted)
            .map(|idx| &self.cells[idx])
    }

    pub fn columns(self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  LoginSSO "), "loginsso");
        assert_eq!(normalize("Not Required"), "not required");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn value_from_cell_tags_empty() {
        assert_eq!(Value::from_cell(""), Value::Empty);
        assert_eq!(Value::from_cell("Yes"), Value::Text("Yes".into()));
        // Whitespace-only cells are text; they only become blank after
        // normalization.
        assert_eq!(Value::from_cell("  "), Value::Text("  ".into()));
        assert_eq!(Value::from_cell("  ").normalized(), "");
    }

    #[test]
    fn push_row_pads_and_truncates() {
        let mut table = Table::new(vec!["a".into(), "b".into(), "c".into()]);
        table.push_row(vec![Value::from_cell("1")]);
        table.push_row(vec![
            Value::from_cell("1"),
            Value::from_cell("2"),
            Value::from_cell("3"),
            Value::from_cell("4"),
        ]);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].cell(1), &Value::Empty);
        assert_eq!(rows[0].cell(2), &Value::Empty);
        assert_eq!(rows[1].cell(2).as_str(), "3");
        assert_eq!(rows[1].columns().count(), 3);
    }

    #[test]
    fn column_and_get_match_normalized_names() {
        let mut table = Table::new(vec!["  Vendor ".into(), "LoginSSO".into()]);
        table.push_row(vec![Value::from_cell("Acme"), Value::from_cell("Yes")]);

        assert_eq!(table.column("vendor"), Some(0));
        assert_eq!(table.column("VENDOR"), Some(0));
        assert_eq!(table.column("missing"), None);

        let row = table.rows().next().unwrap();
        assert_eq!(row.get(" loginsso ").unwrap().as_str(), "Yes");
        assert_eq!(row.get("nope"), None);
    }

    #[test]
    fn headers_keep_original_text() {
        let table = Table::new(vec!["  Vendor ".into()]);
        assert_eq!(table.headers(), &["  Vendor ".to_string()]);
    }
}
