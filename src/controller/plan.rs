use std::collections::{BTreeMap, BTreeSet};

use kube::ResourceExt;
use tracing::warn;

use crate::templates::WorkloadTemplate;

/// One write against the cluster. `plan` always orders deletes after
/// creates and replaces, so a pass never tears a resource down before the
/// create/update phase has finished.
#[derive(Clone, Debug)]
pub enum Op<C> {
    Create(C),
    Replace { name: String, manifest: C },
    Delete { name: String },
}

fn is_owned<T: WorkloadTemplate>(child: &T::Child) -> bool {
    child
        .labels()
        .get(T::OWNER_LABEL)
        .is_some_and(|v| v == "true")
}

/// Diff one kind's declarations against the observed children of one child
/// type, producing the minimal op list that converges them.
///
/// Pure with respect to the cluster: callers hand in freshly listed inputs
/// and execute the result. Matching is keyed by name; resources without the
/// ownership label are never written, and a name collision with such a
/// resource is logged and skipped rather than fought over.
pub fn plan<T: WorkloadTemplate>(
    template: &T,
    declarations: &[T::Declaration],
    observed: &[T::Child],
) -> Vec<Op<T::Child>> {
    let mut by_name: BTreeMap<String, &T::Child> = BTreeMap::new();
    for child in observed {
        let name = child.name_any();
        if by_name.contains_key(&name) {
            // Should not happen: names are unique per namespace and type.
            warn!(%name, "duplicate observed resource name; keeping the first");
            continue;
        }
        by_name.insert(name, child);
    }

    let mut retained: BTreeSet<String> = BTreeSet::new();
    let mut ops = Vec::new();

    for decl in declarations {
        let name = decl.name_any();
        retained.insert(name.clone());
        match by_name.get(&name) {
            None => match template.render(decl) {
                Some(manifest) => ops.push(Op::Create(manifest)),
                None => {
                    warn!(%name, "declaration is unusable; skipping");
                }
            },
            Some(child) if is_owned::<T>(child) => {
                if let Some(manifest) = template.revise(decl, child) {
                    ops.push(Op::Replace { name, manifest });
                }
            }
            Some(_) => {
                warn!(
                    %name,
                    owner_label = T::OWNER_LABEL,
                    "name collides with an unmanaged resource; leaving it alone"
                );
            }
        }
    }

    // Garbage collection: owned children with no surviving declaration.
    // A set keeps the deletes deterministic and deduplicates degenerate
    // observed lists.
    let mut doomed: BTreeSet<String> = BTreeSet::new();
    for child in observed {
        if !is_owned::<T>(child) {
            continue;
        }
        let name = child.name_any();
        if !retained.contains(&name) {
            doomed.insert(name);
        }
    }
    ops.extend(doomed.into_iter().map(|name| Op::Delete { name }));

    ops
}
