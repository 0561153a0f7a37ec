use mivot_core::table::{Row, Table};

use std::{fmt, sync::Arc};

/// Predicate deciding which rows a cursor yields.
pub type RowFilter = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// Forward-only, restartable cursor over the rows of one table.
///
/// Reading past the end keeps yielding `None` until [`rewind`](Self::rewind)
/// is called.
#[derive(Clone)]
pub struct RowCursor {
    table: Arc<Table>,

    /// Index of the next row to examine.
    next: usize,

    /// Index of the row last returned by `next`.
    current: Option<usize>,

    filter: Option<RowFilter>,
}

impl RowCursor {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            next: 0,
            current: None,
            filter: None,
        }
    }

    /// Only yield rows for which `filter` returns `true`.
    pub fn with_filter(mut self, filter: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.set_filter(Some(Arc::new(filter)));
        self
    }

    pub fn set_filter(&mut self, filter: Option<RowFilter>) {
        self.filter = filter;
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Row> {
        while self.next < self.table.rows.len() {
            let index = self.next;
            self.next += 1;

            let row = &self.table.rows[index];
            if self.filter.as_ref().map_or(true, |filter| filter(row)) {
                self.current = Some(index);
                return Some(row);
            }
        }

        self.current = None;
        None
    }

    /// Restarts the cursor before the first row. The filter is kept.
    pub fn rewind(&mut self) {
        self.next = 0;
        self.current = None;
    }

    /// The row last returned by [`next`](Self::next), if the cursor is on a
    /// row.
    pub fn current(&self) -> Option<&Row> {
        self.current.map(|index| &self.table.rows[index])
    }

    /// Zero-based index of the current row in the table.
    pub fn position(&self) -> Option<usize> {
        self.current
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }
}

impl fmt::Debug for RowCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCursor")
            .field("table", &self.table.label())
            .field("next", &self.next)
            .field("current", &self.current)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
