use mivot_core::value::{cast, is_null_token};
use mivot_core::Value;

// ---------------------------------------------------------------------------
// Null tokens
// ---------------------------------------------------------------------------

#[test]
fn null_tokens_in_any_case() {
    for token in ["NotSet", "noset", "NULL", "None", "NaN", "  null  "] {
        assert!(is_null_token(token), "{token}");
        assert_eq!(cast(token, "ivoa:real"), Value::Null);
        assert_eq!(cast(token, "ivoa:string"), Value::Null);
    }
}

#[test]
fn words_containing_null_tokens_are_kept() {
    assert!(!is_null_token("nonexistent"));
    assert_eq!(
        cast("nonexistent", "ivoa:string"),
        Value::String("nonexistent".into())
    );
}

// ---------------------------------------------------------------------------
// Booleans
// ---------------------------------------------------------------------------

#[test]
fn boolean_forms() {
    for text in ["1", "true", "T", "yes"] {
        assert_eq!(cast(text, "ivoa:boolean"), Value::Bool(true), "{text}");
    }
    for text in ["0", "False", "f", "NO"] {
        assert_eq!(cast(text, "ivoa:boolean"), Value::Bool(false), "{text}");
    }
}

#[test]
fn unknown_boolean_is_null() {
    assert_eq!(cast("maybe", "ivoa:bool"), Value::Null);
    assert_eq!(cast("", "ivoa:boolean"), Value::Null);
}

// ---------------------------------------------------------------------------
// Reals
// ---------------------------------------------------------------------------

#[test]
fn reals_parse_as_f64() {
    assert_eq!(cast("52.234", "ivoa:real"), Value::F64(52.234));
    assert_eq!(cast(" -1e3 ", "ivoa:RealQuantity"), Value::F64(-1000.0));
    assert_eq!(cast("7", "ivoa:double"), Value::F64(7.0));
    assert_eq!(cast("0.5", "xs:float"), Value::F64(0.5));
}

#[test]
fn unparsable_real_is_null() {
    assert_eq!(cast("abc", "ivoa:real"), Value::Null);
    assert_eq!(cast("", "ivoa:real"), Value::Null);
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

#[test]
fn integers_parse_as_i64() {
    assert_eq!(cast("42", "ivoa:integer"), Value::I64(42));
    assert_eq!(cast("-3", "xs:long"), Value::I64(-3));
    assert_eq!(cast("12.0", "xs:short"), Value::I64(12));
}

#[test]
fn kind_comes_from_the_start_of_the_type_name() {
    assert_eq!(cast("1 2", "ivoa:Point"), Value::String("1 2".into()));
    assert_eq!(cast("x > 0", "meas:Constraint"), Value::String("x > 0".into()));
    assert_eq!(cast("3", "mango:IntegerQuantity"), Value::I64(3));
    assert_eq!(cast("icrs", "coords:Unreal"), Value::String("icrs".into()));
}

#[test]
fn fractional_integer_is_null() {
    assert_eq!(cast("1.5", "ivoa:integer"), Value::Null);
    assert_eq!(cast("", "ivoa:integer"), Value::Null);
}

// ---------------------------------------------------------------------------
// Everything else
// ---------------------------------------------------------------------------

#[test]
fn other_types_keep_raw_text() {
    assert_eq!(cast(" ICRS ", "ivoa:string"), Value::String(" ICRS ".into()));
    assert_eq!(cast("", "ivoa:string"), Value::String(String::new()));
    assert_eq!(cast("2015.5", "coords:Epoch"), Value::String("2015.5".into()));
}

#[test]
fn value_cast_goes_through_text() {
    assert_eq!(Value::F64(1.5).cast("ivoa:string"), Value::String("1.5".into()));
    assert_eq!(Value::I64(1).cast("ivoa:boolean"), Value::Bool(true));
    assert_eq!(Value::String("2.5".into()).cast("ivoa:real"), Value::F64(2.5));
    assert_eq!(Value::Null.cast("ivoa:string"), Value::Null);
}
