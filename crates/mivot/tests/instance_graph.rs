use mivot::instance::Node;
use mivot::mapping::{Attribute, Collection, Instance, MappingNode, Reference};
use mivot::table::{ColumnBinding, Row};
use mivot::{InstanceGraph, Value};
use pretty_assertions::assert_eq;
use serde_json::json;
use std_util::assert_err;

fn bound(attribute: Attribute, position: usize) -> Attribute {
    Attribute {
        binding: Some(ColumnBinding {
            declared_id: attribute.column.clone().unwrap_or_default(),
            alt_ref: None,
            position,
            unit: None,
        }),
        unit: attribute.unit.clone().or(Some(String::new())),
        ..attribute
    }
}

fn position() -> MappingNode {
    Instance::new("meas:Position")
        .dmrole("mango:MangoObject.position")
        .child(bound(
            Attribute::new("ivoa:RealQuantity")
                .dmrole("meas:Position.ra")
                .column("RAJ2000")
                .unit("deg"),
            0,
        ))
        .child(bound(
            Attribute::new("ivoa:RealQuantity")
                .dmrole("meas:Position.dec")
                .column("DEJ2000")
                .unit("deg"),
            1,
        ))
        .child(
            Instance::new("coords:SpaceSys")
                .dmid("_icrs")
                .dmrole("meas:Position.coordSys")
                .child(Attribute::new("ivoa:string").dmrole("coords:SpaceSys.frame").literal("ICRS")),
        )
        .child(
            Collection::new()
                .dmrole("meas:Position.flags")
                .item(bound(Attribute::new("ivoa:boolean").column("flag_a"), 2))
                .item(Attribute::new("ivoa:boolean").literal("no")),
        )
        .into()
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_keys_fields_by_terminal_role() {
    let graph = InstanceGraph::build(&position()).unwrap();

    assert_eq!(graph.key(), "position");

    let root = graph.root_instance().unwrap();
    assert_eq!(root.dmtype, "meas:Position");
    assert_eq!(root.keys().collect::<Vec<_>>(), ["ra", "dec", "coordSys", "flags"]);

    let frame = graph.attribute("coordSys.frame").unwrap();
    assert_eq!(frame.value, Value::String("ICRS".into()));
    assert_eq!(root.instance("coordSys").unwrap().dmid.as_deref(), Some("_icrs"));
}

#[test]
fn build_casts_literals_and_leaves_columns_empty() {
    let graph = InstanceGraph::build(&position()).unwrap();

    let ra = graph.attribute("ra").unwrap();
    assert_eq!(ra.value, Value::Null);
    assert_eq!(ra.unit(), Some("deg"));
    assert_eq!(ra.position, Some(0));
    assert_eq!(ra.column.as_deref(), Some("RAJ2000"));

    let flags = graph.root_instance().unwrap().collection("flags").unwrap();
    assert_eq!(flags.len(), 2);
    assert_eq!(flags.items[1].expect_attribute().value, Value::Bool(false));
    assert_eq!(graph.attribute("flags.1").unwrap().value, Value::Bool(false));
}

#[test]
fn anonymous_root() {
    let node: MappingNode = Instance::new("mango:MangoObject").into();
    let graph = InstanceGraph::build(&node).unwrap();
    assert_eq!(graph.key(), "root");
}

#[test]
fn colliding_roles_keep_their_full_form() {
    let node: MappingNode = Instance::new("meas:Measures")
        .child(Instance::new("meas:Error").dmrole("meas:Position.error"))
        .child(Instance::new("meas:Error").dmrole("meas:Velocity.error"))
        .into();

    let graph = InstanceGraph::build(&node).unwrap();
    let keys: Vec<_> = graph.root_instance().unwrap().keys().collect();
    assert_eq!(keys, ["meas_Position_error", "meas_Velocity_error"]);
}

#[test]
fn unresolved_reference_cannot_be_materialized() {
    let node: MappingNode = Instance::new("meas:Position")
        .child(Reference::to("_icrs").dmrole("meas:Position.coordSys"))
        .into();

    let err = assert_err!(InstanceGraph::build(&node));
    assert!(err.is_configuration());
    assert!(err.to_string().contains("REFERENCE_?"));
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

#[test]
fn paths_and_dmtypes() {
    let graph = InstanceGraph::build(&position()).unwrap();

    assert!(graph.at("").is_some());
    assert!(graph.at("coordSys.frame").is_some());
    assert!(graph.at("ra.value").is_none());
    assert!(graph.at("flags.2").is_none());
    assert!(graph.at("flags.x").is_none());

    assert_eq!(
        graph.dmtypes(),
        [
            "meas:Position",
            "ivoa:RealQuantity",
            "coords:SpaceSys",
            "ivoa:string",
            "ivoa:boolean"
        ]
    );

    let found = graph.find_by_dmtype("SpaceSys");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].dmrole.as_deref(), Some("meas:Position.coordSys"));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_overwrites_bound_values_only() {
    let mut graph = InstanceGraph::build(&position()).unwrap();
    let built = graph.clone();

    let updated = graph.update(&Row::from(vec![
        Value::F64(10.5),
        Value::String("-3.25".into()),
        Value::I64(1),
    ]));
    assert_eq!(updated, 3);

    assert_eq!(graph.attribute("ra").unwrap().value, Value::F64(10.5));
    assert_eq!(graph.attribute("dec").unwrap().value, Value::F64(-3.25));
    assert_eq!(graph.attribute("flags.0").unwrap().value, Value::Bool(true));
    assert_eq!(graph.attribute("flags.1").unwrap().value, Value::Bool(false));
    assert_eq!(
        graph.attribute("coordSys.frame"),
        built.attribute("coordSys.frame")
    );
}

#[test]
fn update_preserves_shape() {
    let mut graph = InstanceGraph::build(&position()).unwrap();

    graph.update(&Row::from(vec![Value::F64(1.0), Value::F64(2.0), Value::I64(0)]));
    let first = graph.clone();

    graph.update(&Row::from(vec![Value::Null, Value::F64(4.0), Value::I64(1)]));

    let shape = |graph: &InstanceGraph| {
        graph
            .nodes()
            .map(|node| match node {
                Node::Instance(instance) => format!("{}{:?}", instance.dmtype, instance.keys().collect::<Vec<_>>()),
                Node::Collection(collection) => format!("[{}]", collection.len()),
                Node::Attribute(attribute) => format!("{}:{:?}", attribute.dmtype, attribute.unit()),
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&graph), shape(&first));

    assert_eq!(graph.attribute("ra").unwrap().value, Value::Null);
    assert_eq!(graph.attribute("dec").unwrap().value, Value::F64(4.0));
}

#[test]
fn short_rows_keep_previous_values() {
    let mut graph = InstanceGraph::build(&position()).unwrap();

    graph.update(&Row::from(vec![Value::F64(1.0), Value::F64(2.0), Value::I64(0)]));
    let updated = graph.update(&Row::from(vec![Value::F64(5.0)]));

    assert_eq!(updated, 1);
    assert_eq!(graph.attribute("ra").unwrap().value, Value::F64(5.0));
    assert_eq!(graph.attribute("dec").unwrap().value, Value::F64(2.0));
}

// ---------------------------------------------------------------------------
// Dictionary form
// ---------------------------------------------------------------------------

#[test]
fn slim_dict() {
    let mut graph = InstanceGraph::build(&position()).unwrap();
    graph.update(&Row::from(vec![Value::F64(10.5), Value::F64(-3.25), Value::I64(1)]));

    assert_eq!(
        graph.to_dict(true),
        json!({
            "dmtype": "meas:Position",
            "ra": {"dmtype": "ivoa:RealQuantity", "value": 10.5, "unit": "deg"},
            "dec": {"dmtype": "ivoa:RealQuantity", "value": -3.25, "unit": "deg"},
            "coordSys": {
                "dmtype": "coords:SpaceSys",
                "frame": {"dmtype": "ivoa:string", "value": "ICRS"}
            },
            "flags": [
                {"dmtype": "ivoa:boolean", "value": true},
                {"dmtype": "ivoa:boolean", "value": false}
            ]
        })
    );
}

#[test]
fn full_dict() {
    let graph = InstanceGraph::build(&position()).unwrap();

    assert_eq!(
        graph.to_dict(false),
        json!({
            "dmtype": "meas:Position",
            "dmrole": "mango:MangoObject.position",
            "ra": {
                "dmtype": "ivoa:RealQuantity",
                "dmrole": "meas:Position.ra",
                "value": null,
                "unit": "deg",
                "ref": "RAJ2000"
            },
            "dec": {
                "dmtype": "ivoa:RealQuantity",
                "dmrole": "meas:Position.dec",
                "value": null,
                "unit": "deg",
                "ref": "DEJ2000"
            },
            "coordSys": {
                "dmtype": "coords:SpaceSys",
                "dmrole": "meas:Position.coordSys",
                "dmid": "_icrs",
                "frame": {
                    "dmtype": "ivoa:string",
                    "dmrole": "coords:SpaceSys.frame",
                    "value": "ICRS",
                    "unit": "",
                    "ref": ""
                }
            },
            "flags": [
                {"dmtype": "ivoa:boolean", "value": null, "unit": "", "ref": "flag_a"},
                {"dmtype": "ivoa:boolean", "value": false, "unit": "", "ref": ""}
            ]
        })
    );
}

#[test]
fn full_dict_round_trips() {
    let mut graph = InstanceGraph::build(&position()).unwrap();
    graph.update(&Row::from(vec![Value::F64(10.5), Value::F64(-3.25), Value::I64(1)]));

    let dict = graph.to_dict(false);
    let rebuilt = InstanceGraph::from_dict(&dict).unwrap();

    assert_eq!(rebuilt.key(), graph.key());
    assert_eq!(rebuilt.to_dict(false), dict);
    assert_eq!(rebuilt.to_dict(true), graph.to_dict(true));
    assert_eq!(rebuilt.dmtypes(), graph.dmtypes());
}

#[test]
fn string_values_are_cast_from_dict() {
    let graph = InstanceGraph::from_dict(&json!({
        "dmtype": "meas:Position",
        "ra": {"dmtype": "ivoa:real", "value": "52.234", "unit": "deg"},
        "flag": {"dmtype": "ivoa:boolean", "value": "1"},
        "epoch": {"dmtype": "ivoa:real", "value": "NotSet"}
    }))
    .unwrap();

    assert_eq!(graph.attribute("ra").unwrap().value, Value::F64(52.234));
    assert_eq!(graph.attribute("ra").unwrap().dmrole.as_deref(), Some("ra"));
    assert_eq!(graph.attribute("flag").unwrap().value, Value::Bool(true));
    assert_eq!(graph.attribute("epoch").unwrap().value, Value::Null);
}

#[test]
fn leaf_without_dmtype_is_malformed() {
    let err = assert_err!(InstanceGraph::from_dict(&json!({
        "dmtype": "meas:Position",
        "ra": {"value": 10.5, "unit": "deg"}
    })));

    assert!(err.is_malformed_leaf());
    assert_eq!(err.to_string(), "malformed leaf `root.ra`: missing `dmtype`");
}

#[test]
fn leaf_without_value_is_malformed() {
    let err = assert_err!(InstanceGraph::from_dict(&json!({
        "dmtype": "meas:Position",
        "ra": {"dmtype": "ivoa:real", "unit": "deg"}
    })));

    assert!(err.is_malformed_leaf());
    assert!(err.to_string().contains("missing `value`"));
}

#[test]
fn scalar_field_is_malformed() {
    let err = assert_err!(InstanceGraph::from_dict(&json!({
        "dmtype": "meas:Position",
        "ra": 10.5
    })));

    assert!(err.is_malformed_leaf());
}
