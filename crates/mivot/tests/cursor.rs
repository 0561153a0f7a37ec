use mivot::table::{Field, Table};
use mivot::{RowCursor, Value};
use std_util::assert_none;

use std::sync::Arc;

fn table() -> Arc<Table> {
    Arc::new(
        Table::new()
            .field(Field::new("n"))
            .row([Value::I64(1)])
            .row([Value::I64(2)])
            .row([Value::I64(3)])
            .row([Value::I64(4)]),
    )
}

fn first_cell(row: Option<&mivot::table::Row>) -> Option<i64> {
    row.and_then(|row| row[0].as_i64())
}

#[test]
fn yields_rows_in_order_then_stays_exhausted() {
    let mut cursor = RowCursor::new(table());

    assert_none!(cursor.current());
    assert_eq!(first_cell(cursor.next()), Some(1));
    assert_eq!(cursor.position(), Some(0));
    assert_eq!(first_cell(cursor.next()), Some(2));
    assert_eq!(first_cell(cursor.next()), Some(3));
    assert_eq!(first_cell(cursor.next()), Some(4));
    assert_eq!(first_cell(cursor.current()), Some(4));

    assert_none!(cursor.next());
    assert_none!(cursor.next());
    assert_none!(cursor.current());
    assert_none!(cursor.position());
}

#[test]
fn rewind_restarts_before_the_first_row() {
    let mut cursor = RowCursor::new(table());

    cursor.next();
    cursor.next();
    cursor.rewind();

    assert_none!(cursor.current());
    assert_eq!(first_cell(cursor.next()), Some(1));
}

#[test]
fn filter_skips_rejected_rows_and_survives_rewind() {
    let mut cursor =
        RowCursor::new(table()).with_filter(|row| row[0].as_i64().is_some_and(|n| n % 2 == 0));

    assert_eq!(first_cell(cursor.next()), Some(2));
    assert_eq!(cursor.position(), Some(1));
    assert_eq!(first_cell(cursor.next()), Some(4));
    assert_none!(cursor.next());

    cursor.rewind();
    assert_eq!(first_cell(cursor.next()), Some(2));

    cursor.set_filter(None);
    assert_eq!(first_cell(cursor.next()), Some(3));
}

#[test]
fn empty_table() {
    let mut cursor = RowCursor::new(Arc::new(Table::new()));
    assert_none!(cursor.next());
}
