use std::fmt::Debug;

use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, PostParams};
use kube::{Resource, ResourceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::{OpError, classify};
use crate::controller::plan::Op;

/// Counts of what one apply phase actually did. Failures are counted, not
/// propagated: one declaration's broken resource must not starve its
/// siblings, and the next sweep retries anyway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub failures: usize,
}

impl PassSummary {
    pub fn absorb(&mut self, other: PassSummary) {
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.failures += other.failures;
    }

    /// True when the pass issued at least one write or hit a failure.
    pub fn eventful(&self) -> bool {
        *self != PassSummary::default()
    }
}

/// Execute a planned op list against one child-resource collection.
///
/// Ops run sequentially in plan order, one API call each. Deleting a
/// resource that is already gone is success; conflicts and stale-version
/// races are logged and left for the next sweep.
pub async fn apply<C>(api: &Api<C>, ns: &str, ops: Vec<Op<C>>) -> PassSummary
where
    C: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned,
{
    let kind = C::kind(&()).into_owned();
    let mut summary = PassSummary::default();

    for op in ops {
        match op {
            Op::Create(manifest) => {
                let name = manifest.name_any();
                match api.create(&PostParams::default(), &manifest).await {
                    Ok(_) => {
                        info!(%ns, %kind, %name, "created");
                        summary.created += 1;
                    }
                    Err(err) => match classify(err) {
                        OpError::AlreadyExists(message) => {
                            // A stale list or a concurrent writer; the next
                            // sweep observes whatever won.
                            warn!(%ns, %kind, %name, %message, "create collided");
                            summary.failures += 1;
                        }
                        other => {
                            error!(%ns, %kind, %name, error = %other, "create failed");
                            summary.failures += 1;
                        }
                    },
                }
            }
            Op::Replace { name, manifest } => {
                match api.replace(&name, &PostParams::default(), &manifest).await
                {
                    Ok(_) => {
                        info!(%ns, %kind, %name, "updated");
                        summary.updated += 1;
                    }
                    Err(err) => match classify(err) {
                        OpError::NotFound => {
                            warn!(%ns, %kind, %name, "resource vanished before update; next sweep recreates it");
                            summary.failures += 1;
                        }
                        OpError::Conflict(message) => {
                            warn!(%ns, %kind, %name, %message, "stale version; next sweep retries");
                            summary.failures += 1;
                        }
                        other => {
                            error!(%ns, %kind, %name, error = %other, "update failed");
                            summary.failures += 1;
                        }
                    },
                }
            }
            Op::Delete { name } => {
                match api.delete(&name, &DeleteParams::default()).await {
                    Ok(_) => {
                        info!(%ns, %kind, %name, "deleted orphaned resource");
                        summary.deleted += 1;
                    }
                    Err(err) => match classify(err) {
                        OpError::NotFound => {
                            debug!(%ns, %kind, %name, "already gone");
                            summary.deleted += 1;
                        }
                        other => {
                            error!(%ns, %kind, %name, error = %other, "delete failed");
                            summary.failures += 1;
                        }
                    },
                }
            }
        }
    }

    summary
}
