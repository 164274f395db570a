use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, ObjectMeta,
};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::ResourceExt;

use super::{
    WorkloadTemplate, app_labels, owner_labels, rolling_update_strategy,
};
use crate::crd::Cached;

pub const CACHED_OWNER_LABEL: &str = "cached.metaparticle.io";
const CACHE_IMAGE: &str = "memcached";
const CACHE_REPLICAS: i32 = 4;
const CACHE_PORT: i32 = 8080;

fn cache_app(decl: &Cached) -> String {
    format!("{}-cached", decl.name_any())
}

/// Renders the memcached Deployment for a `Cached` declaration. Once
/// created, the Deployment is treated as immutable: `revise` never reports
/// a difference, matching the original controller's behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct CachedDeployment;

impl WorkloadTemplate for CachedDeployment {
    type Declaration = Cached;
    type Child = Deployment;

    const OWNER_LABEL: &'static str = CACHED_OWNER_LABEL;

    fn render(&self, decl: &Cached) -> Option<Deployment> {
        let app = cache_app(decl);
        Some(Deployment {
            metadata: ObjectMeta {
                name: Some(decl.name_any()),
                namespace: decl.namespace(),
                labels: owner_labels(Self::OWNER_LABEL),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(CACHE_REPLICAS),
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
                            name: "cache".to_string(),
                            image: Some(CACHE_IMAGE.to_string()),
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

    fn revise(&self, _decl: &Cached, _observed: &Deployment) -> Option<Deployment> {
        None
    }
}

/// Renders the Service in front of the cache pods. Immutable after
/// creation, like the Deployment.
#[derive(Clone, Copy, Debug, Default)]
pub struct CachedService;

impl WorkloadTemplate for CachedService {
    type Declaration = Cached;
    type Child = Service;

    const OWNER_LABEL: &'static str = CACHED_OWNER_LABEL;

    fn render(&self, decl: &Cached) -> Option<Service> {
        let app = cache_app(decl);
        Some(Service {
            metadata: ObjectMeta {
                name: Some(decl.name_any()),
                namespace: decl.namespace(),
                labels: owner_labels(Self::OWNER_LABEL),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                selector: app_labels(&app),
                ports: Some(vec![ServicePort {
                    name: Some("port".to_string()),
                    port: CACHE_PORT,
                    protocol: Some("TCP".to_string()),
                    target_port: Some(IntOrString::Int(CACHE_PORT)),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    fn revise(&self, _decl: &Cached, _observed: &Service) -> Option<Service> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::CachedSpec;

    fn decl(name: &str) -> Cached {
        Cached::new(
            name,
            CachedSpec {
                service: Some("x".to_string()),
            },
        )
    }

    #[test]
    fn renders_fixed_size_memcached_deployment() {
        let dep = CachedDeployment.render(&decl("c")).expect("renderable");
        assert_eq!(dep.metadata.name.as_deref(), Some("c"));
        assert_eq!(
            dep.metadata
                .labels
                .as_ref()
                .and_then(|l| l.get(CACHED_OWNER_LABEL))
                .map(String::as_str),
            Some("true")
        );
        let spec = dep.spec.expect("deployment spec");
        assert_eq!(spec.replicas, Some(4));
        let containers = spec.template.spec.expect("pod spec").containers;
        assert_eq!(containers[0].name, "cache");
        assert_eq!(containers[0].image.as_deref(), Some("memcached"));
    }

    #[test]
    fn renders_service_on_port_8080() {
        let svc = CachedService.render(&decl("c")).expect("renderable");
        let spec = svc.spec.expect("service spec");
        assert_eq!(
            spec.selector
                .as_ref()
                .and_then(|l| l.get("app"))
                .map(String::as_str),
            Some("c-cached")
        );
        let ports = spec.ports.expect("ports");
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].name.as_deref(), Some("port"));
        assert_eq!(ports[0].port, 8080);
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(8080)));
    }

    #[test]
    fn children_are_immutable_after_creation() {
        let dep = CachedDeployment.render(&decl("c")).unwrap();
        let svc = CachedService.render(&decl("c")).unwrap();
        assert!(CachedDeployment.revise(&decl("c"), &dep).is_none());
        assert!(CachedService.revise(&decl("c"), &svc).is_none());
    }
}
