use mivot_core::{
    mapping::{visit, Collection, Instance, LookupScope, MappingNode, Reference},
    Error, MappingIndex, Result,
};

use std::{collections::HashMap, sync::Arc};

/// Replaces REFERENCE nodes with copies of the objects they point to.
///
/// Each pass rebuilds the tree bottom-up from the borrowed input, so a failed
/// pass leaves the caller's tree untouched. Targets are resolved recursively
/// before being spliced in and memoized, so a target referenced from many
/// places is resolved once and shared until it is copied into place.
///
/// Dynamic references (keyed by a row column) and JOIN nodes are left where
/// they are; they are not resolvable until a row is read.
pub struct Resolver<'a> {
    index: &'a MappingIndex,

    scope: LookupScope<'a>,

    /// Fully resolved targets, by lookup key, with the references resolved
    /// inside them.
    resolved: HashMap<String, (Arc<MappingNode>, Tally)>,

    /// Lookup keys currently being resolved, outermost first.
    stack: Vec<String>,
}

/// References replaced while rewriting a sub-tree.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    /// Every reference spliced in, nested ones included.
    count: usize,

    /// Length of the longest reference chain: the number of passes a
    /// resolver splicing one level at a time would need.
    depth: usize,
}

impl Tally {
    fn splice(&mut self, nested: Tally) {
        self.count += 1 + nested.count;
        self.depth = self.depth.max(1 + nested.depth);
    }
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a MappingIndex, scope: LookupScope<'a>) -> Self {
        Self {
            index,
            scope,
            resolved: HashMap::new(),
            stack: vec![],
        }
    }

    /// Runs one resolution pass over `nodes`, returning the number of
    /// references replaced, including those nested inside spliced targets.
    ///
    /// On error `nodes` is left as it was.
    pub fn resolve(&mut self, nodes: &mut Vec<MappingNode>) -> Result<usize> {
        let (rewritten, tally) = self.pass(nodes)?;
        *nodes = rewritten;
        Ok(tally.count)
    }

    /// Resolves every static reference in `nodes`.
    ///
    /// A chain of `n` references nested in each other's targets counts as
    /// `n` passes; a chain longer than `max_passes` fails resolution and
    /// leaves `nodes` as it was. Once this returns, a further
    /// [`resolve`](Self::resolve) replaces nothing.
    pub fn resolve_all(&mut self, nodes: &mut Vec<MappingNode>, max_passes: usize) -> Result<usize> {
        let (rewritten, tally) = self.pass(nodes)?;

        if tally.depth > max_passes {
            return Err(Error::configuration(format!(
                "reference resolution needs {} passes, more than the limit of {max_passes}",
                tally.depth
            )));
        }

        tracing::trace!(resolved = tally.count, passes = tally.depth, "resolved references");

        *nodes = rewritten;
        Ok(tally.count)
    }

    fn pass(&mut self, nodes: &[MappingNode]) -> Result<(Vec<MappingNode>, Tally)> {
        let mut tally = Tally::default();
        let rewritten = self.rewrite_all(nodes, &mut tally)?;
        Ok((rewritten, tally))
    }

    fn rewrite_all(&mut self, nodes: &[MappingNode], tally: &mut Tally) -> Result<Vec<MappingNode>> {
        nodes
            .iter()
            .map(|node| self.rewrite(node, tally))
            .collect()
    }

    fn rewrite(&mut self, node: &MappingNode, tally: &mut Tally) -> Result<MappingNode> {
        Ok(match node {
            MappingNode::Reference(reference) if !reference.is_dynamic() => {
                let (resolved, nested) = self.resolve_reference(reference)?;
                tally.splice(nested);
                resolved
            }
            MappingNode::Instance(instance) => MappingNode::Instance(Instance {
                dmtype: instance.dmtype.clone(),
                dmrole: instance.dmrole.clone(),
                dmid: instance.dmid.clone(),
                primary_keys: instance.primary_keys.clone(),
                children: self.rewrite_all(&instance.children, tally)?,
            }),
            MappingNode::Collection(collection) => MappingNode::Collection(Collection {
                dmrole: collection.dmrole.clone(),
                dmid: collection.dmid.clone(),
                items: self.rewrite_all(&collection.items, tally)?,
            }),
            node => node.clone(),
        })
    }

    fn resolve_reference(&mut self, reference: &Reference) -> Result<(MappingNode, Tally)> {
        let (target, nested) = match (&reference.dmref, &reference.source_ref, reference.key_value()) {
            (Some(dmref), _, _) => self.resolve_dmref(dmref),
            (None, Some(source_ref), Some(key)) => self.resolve_key(source_ref, key),
            _ => Err(Error::configuration(format!(
                "{} has neither a dmref nor a sourceref with a foreign key",
                reference.tag
            ))),
        }
        .map_err(|err| err.context(format!("resolving {}", reference.tag)))?;

        let mut node = MappingNode::clone(&target);

        // A role-less reference is a bare collection element and keeps the
        // target's own role.
        if reference.dmrole.is_some() {
            node.set_dmrole(reference.dmrole.clone());
        }

        tracing::trace!(tag = %reference.tag, role = ?reference.dmrole, "resolved reference");
        Ok((node, nested))
    }

    fn resolve_dmref(&mut self, dmref: &str) -> Result<(Arc<MappingNode>, Tally)> {
        if let Some(done) = self.resolved.get(dmref) {
            return Ok(done.clone());
        }

        let target = self
            .index
            .instance_by_id(dmref, self.scope)
            .ok_or_else(|| Error::unresolved_reference(dmref))?
            .clone();

        self.resolve_target(dmref.to_string(), &target)
    }

    fn resolve_key(&mut self, source_ref: &str, key: &str) -> Result<(Arc<MappingNode>, Tally)> {
        let memo_key = format!("{source_ref}[{key}]");
        if let Some(done) = self.resolved.get(&memo_key) {
            return Ok(done.clone());
        }

        let target = lookup_key(self.index, source_ref, key)?;
        self.resolve_target(memo_key, &target)
    }

    fn resolve_target(&mut self, key: String, target: &MappingNode) -> Result<(Arc<MappingNode>, Tally)> {
        if let Some(start) = self.stack.iter().position(|entry| *entry == key) {
            let cycle = self.stack[start..].join(" -> ");
            return Err(Error::configuration(format!(
                "reference cycle: {cycle} -> {key}"
            )));
        }

        self.stack.push(key);
        let mut nested = Tally::default();
        let resolved = self.rewrite(target, &mut nested);
        let key = self.stack.pop().unwrap_or_default();

        let resolved = Arc::new(resolved?);
        self.resolved.insert(key, (resolved.clone(), nested));
        Ok((resolved, nested))
    }
}

/// Finds the unique item of the GLOBALS collection `source_ref` whose
/// primary key equals `key`.
pub fn lookup_key(index: &MappingIndex, source_ref: &str, key: &str) -> Result<MappingNode> {
    let collection = index
        .collection_by_id(source_ref)
        .ok_or_else(|| Error::unresolved_reference(source_ref))?;

    let mut matches = collection.items.iter().filter(|item| {
        item.as_instance()
            .is_some_and(|instance| instance.has_primary_key(key))
    });

    match (matches.next(), matches.count()) {
        (None, _) => Err(Error::key_not_found(source_ref, key)),
        (Some(item), 0) => Ok(item.clone()),
        (Some(_), more) => Err(Error::ambiguous_key(source_ref, key, more + 1)),
    }
}

/// Counts REFERENCE nodes that can be resolved without reading a row.
pub fn count_static_references(nodes: &[MappingNode]) -> usize {
    let mut count = 0;
    visit::for_each_node(nodes, |node| {
        if node
            .as_reference()
            .is_some_and(|reference| !reference.is_dynamic())
        {
            count += 1;
        }
    });
    count
}
