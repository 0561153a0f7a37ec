use mivot_core::mapping::{MappingNode, Section, ValueSource};
use mivot_core::{MappingIndex, Resource, Value};

const RESOURCE: &str = r#"{
    "mapping": {
        "models": [{"name": "meas", "url": "https://ivoa.net/xml/Meas"}],
        "sections": [
            {"GLOBALS": {"children": [
                {"INSTANCE": {"dmtype": "coords:SpaceSys", "dmid": "_icrs"}}
            ]}},
            {"TEMPLATES": {"tableref": "results", "children": [
                {"INSTANCE": {"dmtype": "meas:Position", "children": [
                    {"ATTRIBUTE": {"dmtype": "ivoa:real", "dmrole": "meas:Position.ra", "ref": "RAJ2000", "unit": "deg"}},
                    {"ATTRIBUTE": {"dmtype": "ivoa:string", "dmrole": "meas:Position.frame", "value": "ICRS"}},
                    {"REFERENCE": {"dmrole": "meas:Position.coordSys", "dmref": "_icrs"}},
                    {"REFERENCE": {"dmrole": "meas:Position.filter", "sourceref": "_filters",
                                   "foreign_key": [{"ref": "band"}]}}
                ]}}
            ]}}
        ]
    },
    "tables": [
        {"ID": "results", "name": "Results",
         "fields": [{"ID": "RAJ2000", "name": "ra", "unit": "deg", "datatype": "double"},
                    {"name": "band"}],
         "rows": [[10.5, "G"], [null, "RP"], [7, "G"]]}
    ]
}"#;

#[test]
fn loads_mapping_and_tables() {
    let resource = Resource::from_json(RESOURCE).unwrap();

    let mapping = resource.mapping.as_ref().unwrap();
    assert_eq!(mapping.models[0].url.as_deref(), Some("https://ivoa.net/xml/Meas"));
    assert_eq!(mapping.sections.len(), 2);

    let Section::Templates { tableref, children } = &mapping.sections[1] else {
        panic!("expected TEMPLATES");
    };
    assert_eq!(tableref.as_deref(), Some("results"));

    let position = children[0].expect_instance();
    assert_eq!(position.children.len(), 4);

    let ra = position.children[0].expect_attribute();
    assert_eq!(ra.value_source(), ValueSource::ColumnRef("RAJ2000"));
    assert_eq!(ra.unit.as_deref(), Some("deg"));

    let frame = position.children[1].expect_attribute();
    assert_eq!(frame.value_source(), ValueSource::Literal("ICRS"));

    let MappingNode::Reference(filter) = &position.children[3] else {
        panic!("expected REFERENCE");
    };
    assert!(filter.is_dynamic());
    assert_eq!(filter.key_column(), Some("band"));
}

#[test]
fn rows_hold_typed_cells() {
    let resource = Resource::from_json(RESOURCE).unwrap();

    let table = resource.find_table("results").unwrap();
    assert_eq!(table.num_rows(), 3);
    assert_eq!(table.rows[0][0], Value::F64(10.5));
    assert_eq!(table.rows[1][0], Value::Null);
    assert_eq!(table.rows[2][0], Value::I64(7));
    assert_eq!(table.rows[1].text_at(1).as_deref(), Some("RP"));
    assert_eq!(table.rows[1].text_at(0).as_deref(), Some(""));
    assert_eq!(table.rows[1].text_at(2), None);
}

#[test]
fn tables_are_found_by_id_then_name() {
    let resource = Resource::from_json(RESOURCE).unwrap();

    assert!(resource.find_table("results").is_some());
    assert!(resource.find_table("Results").is_some());
    assert!(resource.find_table("other").is_none());
}

#[test]
fn parsed_references_are_tagged_by_the_index() {
    let resource = Resource::from_json(RESOURCE).unwrap();
    let index = MappingIndex::new(resource.mapping.unwrap()).unwrap();

    assert_eq!(index.num_references(), 2);

    let position = index.templates_for(Some("results")).unwrap()[0].expect_instance();
    let tags: Vec<String> = position
        .children
        .iter()
        .filter_map(MappingNode::as_reference)
        .map(|reference| reference.tag.to_string())
        .collect();
    assert_eq!(tags, ["REFERENCE_1", "REFERENCE_2"]);
}

#[test]
fn malformed_document_is_an_error() {
    let err = Resource::from_json(r#"{"tables": [{"rows": 3}]}"#).unwrap_err();
    assert!(!err.to_string().is_empty());
}
