pub mod cached;
pub mod singleton;

pub use cached::{CachedDeployment, CachedService};
pub use singleton::SingletonDeployment;

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{DeploymentStrategy, RollingUpdateDeployment};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Per-kind strategy tying a declaration type to one managed child type.
///
/// `render` maps a declaration to the full desired manifest (with the
/// ownership label already stamped); `None` means the declaration is
/// unusable and must be skipped, never crashed on. `revise` decides whether
/// an observed child needs a write: `None` means it already matches, and the
/// returned manifest is the observed one with only the reconciled fields
/// replaced, so a replace call carries the observed resourceVersion.
pub trait WorkloadTemplate {
    type Declaration: kube::Resource;
    type Child: kube::Resource + Clone;

    /// Label key marking a child as managed by this controller for this kind.
    /// The value is always `"true"`.
    const OWNER_LABEL: &'static str;

    fn render(&self, decl: &Self::Declaration) -> Option<Self::Child>;

    fn revise(
        &self,
        decl: &Self::Declaration,
        observed: &Self::Child,
    ) -> Option<Self::Child>;
}

/// Both workload kinds roll over by surging one new pod while allowing the
/// whole old replica set to go away. A singleton tolerates the brief outage;
/// anything that doesn't should not be one.
pub(crate) fn rolling_update_strategy() -> DeploymentStrategy {
    DeploymentStrategy {
        type_: Some("RollingUpdate".to_string()),
        rolling_update: Some(RollingUpdateDeployment {
            max_surge: Some(IntOrString::Int(1)),
            max_unavailable: Some(IntOrString::String("100%".to_string())),
        }),
    }
}

pub(crate) fn owner_labels(
    owner_label: &str,
) -> Option<BTreeMap<String, String>> {
    let mut labels = BTreeMap::new();
    labels.insert(owner_label.to_string(), "true".to_string());
    Some(labels)
}

pub(crate) fn app_labels(app: &str) -> Option<BTreeMap<String, String>> {
    let mut labels = BTreeMap::new();
    labels.insert("app".to_string(), app.to_string());
    Some(labels)
}
