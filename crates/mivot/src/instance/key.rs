use mivot_core::MappingNode;

const ROOT_KEY: &str = "root";

/// Strips the model prefix (`meas:`) and the type path (`Position.`) from a
/// role, keeping its last segment.
pub(crate) fn terminal_segment(role: &str) -> &str {
    let unprefixed = role.rsplit(':').next().unwrap_or(role);
    unprefixed.rsplit('.').next().unwrap_or(unprefixed)
}

/// Full role with separators turned into underscores.
pub(crate) fn normalized(role: &str) -> String {
    role.replace([':', '.'], "_")
}

/// Key of the node a graph is rooted at.
pub(crate) fn root_key(node: &MappingNode) -> String {
    node.dmrole()
        .map(|role| terminal_segment(role).to_string())
        .unwrap_or_else(|| ROOT_KEY.to_string())
}

/// Keys for the children of one instance, in order.
///
/// Children are keyed by the terminal segment of their role, or of their
/// dmtype when they have no role. When two children share a terminal segment
/// the parent is an instance of instances and every child keeps its full,
/// normalized role instead. Keys that still collide get a numeric suffix.
pub(crate) fn child_keys(children: &[MappingNode]) -> Vec<String> {
    let labels: Vec<&str> = children
        .iter()
        .map(|child| {
            child
                .dmrole()
                .or(child.dmtype())
                .unwrap_or(child.element_name())
        })
        .collect();

    let terminals: Vec<&str> = labels.iter().map(|label| terminal_segment(label)).collect();

    let mut keys: Vec<String> = if has_duplicates(&terminals) {
        labels.iter().map(|label| normalized(label)).collect()
    } else {
        terminals.iter().map(|terminal| terminal.to_string()).collect()
    };

    for i in 1..keys.len() {
        let base = keys[i].clone();
        let mut n = 1;
        while keys[..i].contains(&keys[i]) {
            n += 1;
            keys[i] = format!("{base}_{n}");
        }
    }

    keys
}

fn has_duplicates(keys: &[&str]) -> bool {
    keys.iter()
        .enumerate()
        .any(|(i, key)| keys[..i].contains(key))
}
