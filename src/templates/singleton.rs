use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, ObjectMeta,
};
use kube::ResourceExt;
use tracing::warn;

use super::{
    WorkloadTemplate, app_labels, owner_labels, rolling_update_strategy,
};
use crate::crd::Singleton;

/// Renders one single-replica Deployment per `Singleton` declaration.
///
/// The update contract is deliberately narrow: only the first container's
/// image is compared and replaced. Replica count, strategy and labels are
/// set at creation and never reconciled afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingletonDeployment;

impl WorkloadTemplate for SingletonDeployment {
    type Declaration = Singleton;
    type Child = Deployment;

    const OWNER_LABEL: &'static str = "singleton.metaparticle.io";

    fn render(&self, decl: &Singleton) -> Option<Deployment> {
        let image = decl.spec.image.as_deref()?;
        let name = decl.name_any();
        let app = format!("{name}-singleton");
        Some(Deployment {
            metadata: ObjectMeta {
                name: Some(name),
                namespace: decl.namespace(),
                labels: owner_labels(Self::OWNER_LABEL),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(1),
                selector: LabelSelector {
                    match_labels: app_labels(&app),
                    ..Default::default()
                },
                strategy: Some(rolling_update_strategy()),
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: app_labels(&app),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![Container {
                            name: "singleton".to_string(),
                            image: Some(image.to_string()),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    fn revise(
        &self,
        decl: &Singleton,
        observed: &Deployment,
    ) -> Option<Deployment> {
        // TODO: handle multi-container singletons
        let desired = decl.spec.image.as_deref()?;
        let current = observed
            .spec
            .as_ref()
            .and_then(|s| s.template.spec.as_ref())
            .and_then(|p| p.containers.first())
            .and_then(|c| c.image.as_deref());
        match current {
            Some(image) if image == desired => None,
            Some(_) => {
                let mut updated = observed.clone();
                if let Some(container) = updated
                    .spec
                    .as_mut()
                    .and_then(|s| s.template.spec.as_mut())
                    .and_then(|p| p.containers.first_mut())
                {
                    container.image = Some(desired.to_string());
                }
                Some(updated)
            }
            None => {
                warn!(
                    name = %observed.name_any(),
                    "deployment has no comparable container image; leaving it alone"
                );
                None
            }
        }
    }
}
