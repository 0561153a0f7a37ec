use super::{key, Attribute, Collection, Instance, InstanceGraph, Node};
use mivot_core::{value::cast, Error, Result, Value};

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

const DMTYPE: &str = "dmtype";
const DMROLE: &str = "dmrole";
const DMID: &str = "dmid";
const VALUE: &str = "value";
const UNIT: &str = "unit";
const REF: &str = "ref";

impl InstanceGraph {
    /// Projects the graph into its dictionary form.
    ///
    /// With `literal` set the projection is slim: leaves carry only `dmtype`,
    /// `value` and a non-empty `unit`. Otherwise leaves also carry `unit` and
    /// `ref` (empty when absent), and roles and dmids are kept.
    pub fn to_dict(&self, literal: bool) -> Json {
        node_to_dict(&self.root, literal)
    }

    /// Rebuilds a graph from its dictionary form.
    ///
    /// Nodes are keyed exactly as in the dictionary. A node's role is its
    /// `dmrole` entry when present, else its key. String leaf values are cast
    /// per `dmtype`.
    pub fn from_dict(dict: &Json) -> Result<InstanceGraph> {
        let key = dict
            .get(DMROLE)
            .and_then(Json::as_str)
            .map(|role| key::terminal_segment(role).to_string())
            .unwrap_or_else(|| "root".to_string());

        let root = node_from_dict(&key, dict, None)?;
        Ok(InstanceGraph { key, root })
    }
}

fn node_to_dict(node: &Node, literal: bool) -> Json {
    match node {
        Node::Instance(instance) => {
            let mut dict = Map::new();
            dict.insert(DMTYPE.into(), instance.dmtype.clone().into());
            if !literal {
                if let Some(dmrole) = &instance.dmrole {
                    dict.insert(DMROLE.into(), dmrole.clone().into());
                }
                if let Some(dmid) = &instance.dmid {
                    dict.insert(DMID.into(), dmid.clone().into());
                }
            }
            for (key, field) in &instance.fields {
                dict.insert(key.clone(), node_to_dict(field, literal));
            }
            Json::Object(dict)
        }
        Node::Collection(collection) => Json::Array(
            collection
                .items
                .iter()
                .map(|item| node_to_dict(item, literal))
                .collect(),
        ),
        Node::Attribute(attribute) => {
            let mut dict = Map::new();
            dict.insert(DMTYPE.into(), attribute.dmtype.clone().into());
            if !literal {
                if let Some(dmrole) = &attribute.dmrole {
                    dict.insert(DMROLE.into(), dmrole.clone().into());
                }
            }
            dict.insert(VALUE.into(), attribute.value.to_json());

            if literal {
                if let Some(unit) = attribute.unit() {
                    dict.insert(UNIT.into(), unit.into());
                }
            } else {
                dict.insert(UNIT.into(), attribute.unit().unwrap_or_default().into());
                dict.insert(
                    REF.into(),
                    attribute.column.as_deref().unwrap_or_default().into(),
                );
            }
            Json::Object(dict)
        }
    }
}

fn node_from_dict(key: &str, dict: &Json, dmrole: Option<String>) -> Result<Node> {
    match dict {
        Json::Array(items) => Ok(Node::Collection(Collection {
            dmrole,
            items: items
                .iter()
                .enumerate()
                .map(|(i, item)| node_from_dict(&format!("{key}.{i}"), item, None))
                .collect::<Result<_>>()?,
        })),
        Json::Object(entries) => {
            let dmtype = match entries.get(DMTYPE) {
                Some(Json::String(dmtype)) => dmtype.clone(),
                Some(_) => return Err(Error::malformed_leaf(key, "`dmtype` is not a string")),
                None => return Err(Error::malformed_leaf(key, "missing `dmtype`")),
            };

            let dmrole = text(entries, DMROLE).or(dmrole);

            if is_leaf(entries) {
                attribute_from_dict(key, entries, dmtype, dmrole).map(Node::Attribute)
            } else {
                instance_from_dict(key, entries, dmtype, dmrole).map(Node::Instance)
            }
        }
        _ => Err(Error::malformed_leaf(key, "expected a mapping or a sequence")),
    }
}

fn is_leaf(entries: &Map<String, Json>) -> bool {
    let scalar = |name: &str| {
        entries
            .get(name)
            .is_some_and(|entry| !entry.is_object() && !entry.is_array())
    };
    scalar(VALUE) || scalar(UNIT) || scalar(REF)
}

fn attribute_from_dict(
    key: &str,
    entries: &Map<String, Json>,
    dmtype: String,
    dmrole: Option<String>,
) -> Result<Attribute> {
    let value = match entries.get(VALUE) {
        Some(Json::String(text)) => cast(text, &dmtype),
        Some(json) => Value::from_json(json)
            .ok_or_else(|| Error::malformed_leaf(key, "`value` is not a scalar"))?,
        None => return Err(Error::malformed_leaf(key, "missing `value`")),
    };

    Ok(Attribute {
        dmtype,
        dmrole,
        value,
        unit: text(entries, UNIT),
        column: text(entries, REF),
        position: None,
    })
}

fn instance_from_dict(
    key: &str,
    entries: &Map<String, Json>,
    dmtype: String,
    dmrole: Option<String>,
) -> Result<Instance> {
    let mut fields = IndexMap::new();

    for (field, entry) in entries {
        if matches!(field.as_str(), DMTYPE | DMROLE | DMID) {
            continue;
        }

        if !entry.is_object() && !entry.is_array() {
            return Err(Error::malformed_leaf(
                key,
                format!("field `{field}` is neither a mapping nor a sequence"),
            ));
        }

        let path = format!("{key}.{field}");
        fields.insert(field.clone(), node_from_dict(&path, entry, Some(field.clone()))?);
    }

    Ok(Instance {
        dmtype,
        dmrole,
        dmid: text(entries, DMID),
        fields,
    })
}

/// A non-empty string entry.
fn text(entries: &Map<String, Json>, name: &str) -> Option<String> {
    entries
        .get(name)
        .and_then(Json::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
