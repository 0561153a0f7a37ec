use mivot_core::table::{ColumnBinding, Field, Table};
use mivot_core::{TableIndex, Value};

fn table() -> Table {
    Table::new()
        .id("results")
        .field(Field::new("ra").id("RAJ2000").unit("deg"))
        .field(Field::new("dec").id("DEJ2000").unit("deg"))
        .field(Field::new("RAJ2000").reference("ra"))
        .field(Field::new("mag"))
        .row([Value::F64(10.5), Value::F64(-3.25), Value::Null, Value::F64(12.0)])
}

#[test]
fn declared_id_wins_over_name() {
    let index = TableIndex::new(&table());

    assert_eq!(
        index.binding_for("RAJ2000"),
        Some(&ColumnBinding {
            declared_id: "RAJ2000".into(),
            alt_ref: None,
            position: 0,
            unit: Some("deg".into()),
        })
    );
}

#[test]
fn name_is_the_fallback() {
    let index = TableIndex::new(&table());

    assert_eq!(index.binding_for("dec").map(|b| b.position), Some(1));
    assert_eq!(
        index.binding_for("mag"),
        Some(&ColumnBinding {
            declared_id: "mag".into(),
            alt_ref: None,
            position: 3,
            unit: None,
        })
    );
}

#[test]
fn units_follow_the_binding() {
    let index = TableIndex::new(&table());

    assert_eq!(index.unit_for("DEJ2000"), Some("deg"));
    assert_eq!(index.unit_for("mag"), None);
    assert_eq!(index.unit_for("missing"), None);
}

#[test]
fn unknown_column() {
    let index = TableIndex::new(&table());

    assert!(index.binding_for("pmra").is_none());
    assert_eq!(index.num_columns(), 4);
}
