//! Select query builder
//!
//! Renders filters, ordering and limits as PostgREST query parameters.

/// Sort direction for an ordered select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// A `select *` over one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<usize>,
}

impl SelectQuery {
    /// Select every row, in backend order
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only rows where `column` equals `value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    /// Order by `column`
    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    /// Return at most `n` rows
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Query parameters in PostgREST syntax
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{}", value)));
        }
        if let Some((column, direction)) = &self.order {
            let dir = match direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{}", column, dir)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Requested row limit, if any
    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }
}
