use super::{
    Collection, Instance, Join, MappingBlock, MappingNode, ModelDecl, NodeTag, Reference, Section,
    TagKind, VisitMut,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::{collections::HashMap, sync::Arc};

/// Lookups over a mapping block.
///
/// Built once per mapping block and immutable afterwards. GLOBALS hold the
/// row-independent declarations; each TEMPLATES block is keyed by its
/// `tableref`, with `None` standing for the one block allowed to omit it.
///
/// # Default table policy
///
/// When no table reference is requested, [`MappingIndex::default_templates`]
/// picks the unnamed TEMPLATES block if there is one, and otherwise the first
/// TEMPLATES block in document order. No other call site falls back
/// implicitly.
#[derive(Debug)]
pub struct MappingIndex {
    models: Vec<ModelDecl>,

    globals: Vec<MappingNode>,

    templates: IndexMap<Option<String>, Vec<MappingNode>>,

    /// Every node declaring a `dmid` anywhere under GLOBALS.
    globals_by_id: HashMap<String, Arc<MappingNode>>,

    /// Nodes declaring a `dmid` under each TEMPLATES block.
    templates_by_id: HashMap<Option<String>, HashMap<String, Arc<MappingNode>>>,

    num_references: usize,

    num_joins: usize,
}

/// Where [`MappingIndex::instance_by_id`] searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupScope<'a> {
    /// GLOBALS only.
    Globals,

    /// GLOBALS first, then the TEMPLATES block of the given table reference.
    Templates(Option<&'a str>),
}

struct AssignTags {
    references: usize,
    joins: usize,
}

impl VisitMut for AssignTags {
    fn visit_reference_mut(&mut self, i: &mut Reference) {
        self.references += 1;
        i.tag = NodeTag::new(TagKind::Reference, self.references);
    }

    fn visit_join_mut(&mut self, i: &mut Join) {
        self.joins += 1;
        i.tag = NodeTag::new(TagKind::Join, self.joins);
    }
}

impl MappingIndex {
    pub fn new(block: MappingBlock) -> Result<Self> {
        let MappingBlock { models, sections } = block;

        let mut globals = None;
        let mut templates = IndexMap::<Option<String>, Vec<MappingNode>>::new();

        for section in sections {
            match section {
                Section::Globals { children } => {
                    if globals.is_some() {
                        return Err(Error::configuration("more than one GLOBALS section"));
                    }
                    globals = Some(children);
                }
                Section::Templates { tableref, children } => {
                    if templates.contains_key(&tableref) {
                        return Err(match tableref {
                            Some(tableref) => Error::configuration(format!(
                                "more than one TEMPLATES block with tableref `{tableref}`"
                            )),
                            None => Error::configuration(
                                "more than one TEMPLATES block without tableref",
                            ),
                        });
                    }
                    templates.insert(tableref, children);
                }
            }
        }

        let mut globals = globals.unwrap_or_default();

        let mut tags = AssignTags {
            references: 0,
            joins: 0,
        };
        for node in globals
            .iter_mut()
            .chain(templates.values_mut().flatten())
        {
            tags.visit_node_mut(node);
        }

        let globals_by_id = index_ids(&globals, true)?;
        let templates_by_id = templates
            .iter()
            .map(|(tableref, children)| Ok((tableref.clone(), index_ids(children, false)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        tracing::debug!(
            globals = globals.len(),
            templates = templates.len(),
            dmids = globals_by_id.len(),
            references = tags.references,
            joins = tags.joins,
            "indexed mapping block"
        );

        Ok(Self {
            models,
            globals,
            templates,
            globals_by_id,
            templates_by_id,
            num_references: tags.references,
            num_joins: tags.joins,
        })
    }

    /// Data models declared by the mapping block.
    pub fn models(&self) -> &[ModelDecl] {
        &self.models
    }

    /// Top-level GLOBALS declarations.
    pub fn globals(&self) -> &[MappingNode] {
        &self.globals
    }

    /// Top-level declarations of the TEMPLATES block for `table_ref`.
    ///
    /// `None` selects the block declared without a `tableref`.
    pub fn templates_for(&self, table_ref: Option<&str>) -> Option<&[MappingNode]> {
        self.templates
            .get(&table_ref.map(String::from))
            .map(Vec::as_slice)
    }

    /// All TEMPLATES blocks, in document order.
    pub fn templates(&self) -> impl Iterator<Item = (Option<&str>, &[MappingNode])> + '_ {
        self.templates
            .iter()
            .map(|(tableref, children)| (tableref.as_deref(), children.as_slice()))
    }

    /// The TEMPLATES block used when no table reference is requested.
    pub fn default_templates(&self) -> Option<(Option<&str>, &[MappingNode])> {
        match self.templates.get(&None) {
            Some(children) => Some((None, children.as_slice())),
            None => self.templates().next(),
        }
    }

    /// Looks up the node declared with `dmid == id`.
    pub fn instance_by_id(&self, id: &str, scope: LookupScope<'_>) -> Option<&Arc<MappingNode>> {
        if let Some(node) = self.globals_by_id.get(id) {
            return Some(node);
        }

        match scope {
            LookupScope::Globals => None,
            LookupScope::Templates(table_ref) => self
                .templates_by_id
                .get(&table_ref.map(String::from))?
                .get(id),
        }
    }

    /// Looks up a GLOBALS collection by its `dmid`.
    pub fn collection_by_id(&self, id: &str) -> Option<&Collection> {
        self.globals_by_id.get(id)?.as_collection()
    }

    /// Instances, in GLOBALS then TEMPLATES, whose dmtype contains `pattern`.
    pub fn instances_by_type_substring(&self, pattern: &str) -> Vec<&Instance> {
        self.globals
            .iter()
            .chain(self.templates.values().flatten())
            .flat_map(MappingNode::descendants)
            .filter_map(MappingNode::as_instance)
            .filter(|instance| instance.dmtype.contains(pattern))
            .collect()
    }

    /// dmtypes of the top-level GLOBALS instances and of the items of
    /// top-level GLOBALS collections, de-duplicated, in document order.
    pub fn globals_dmtypes(&self) -> Vec<&str> {
        let mut dmtypes: Vec<&str> = vec![];

        let candidates = self.globals.iter().flat_map(|node| match node {
            MappingNode::Collection(collection) => collection.items.iter().collect::<Vec<_>>(),
            node => vec![node],
        });

        for node in candidates {
            if let Some(dmtype) = node.as_instance().map(|instance| instance.dmtype.as_str()) {
                if !dmtypes.contains(&dmtype) {
                    dmtypes.push(dmtype);
                }
            }
        }

        dmtypes
    }

    /// Number of REFERENCE nodes tagged in the block.
    pub fn num_references(&self) -> usize {
        self.num_references
    }

    /// Number of JOIN nodes tagged in the block.
    pub fn num_joins(&self) -> usize {
        self.num_joins
    }
}

fn index_ids(roots: &[MappingNode], unique: bool) -> Result<HashMap<String, Arc<MappingNode>>> {
    let mut ids = HashMap::new();

    for node in roots.iter().flat_map(MappingNode::descendants) {
        let Some(dmid) = node.dmid() else {
            continue;
        };

        if ids.contains_key(dmid) {
            if unique {
                return Err(Error::configuration(format!(
                    "dmid `{dmid}` is declared more than once in GLOBALS"
                )));
            }
            tracing::warn!(dmid, "duplicate dmid in TEMPLATES; keeping the first declaration");
            continue;
        }

        ids.insert(dmid.to_string(), Arc::new(node.clone()));
    }

    Ok(ids)
}
