use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declaration of a singleton workload: a single replica of a
/// caller-supplied image, rolled over by tearing the old pod down first.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "metaparticle.io",
    version = "v1beta1",
    kind = "Singleton",
    plural = "singletons",
    namespaced
)]
pub struct SingletonSpec {
    /// Container image to run. The registered schema does not require it;
    /// declarations without an image are skipped during planning.
    pub image: Option<String>,
}
