use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declaration of a cached workload: a fixed-size memcached Deployment
/// fronted by a Service on port 8080.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "metaparticle.io",
    version = "v1beta1",
    kind = "Cached",
    plural = "cached",
    namespaced
)]
pub struct CachedSpec {
    /// Name of the service being cached. Recorded in the declaration but not
    /// consulted by rendering; the cache shape is fixed.
    pub service: Option<String>,
}
