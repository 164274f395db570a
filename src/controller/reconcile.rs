use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::{debug, instrument};

use super::{OpError, classify};
use crate::controller::apply::{PassSummary, apply};
use crate::controller::plan::plan;
use crate::crd::{Cached, Singleton};
use crate::templates::{CachedDeployment, CachedService, SingletonDeployment};

/// One reconciliation pass for the singleton kind in one namespace:
/// list declarations and Deployments, diff, converge.
#[instrument(skip_all, fields(ns = %ns))]
pub async fn reconcile_singletons(
    client: &Client,
    ns: &str,
) -> Result<PassSummary, OpError> {
    let decl_api: Api<Singleton> = Api::namespaced(client.clone(), ns);
    let declarations =
        decl_api.list(&ListParams::default()).await.map_err(classify)?.items;

    let dep_api: Api<Deployment> = Api::namespaced(client.clone(), ns);
    let deployments =
        dep_api.list(&ListParams::default()).await.map_err(classify)?.items;

    let ops = plan(&SingletonDeployment, &declarations, &deployments);
    debug!(
        declarations = declarations.len(),
        observed = deployments.len(),
        ops = ops.len(),
        "singleton plan ready"
    );
    Ok(apply(&dep_api, ns, ops).await)
}

/// One reconciliation pass for the cached kind: the declaration set drives
/// both a Deployment and a Service collection, each converged on its own
/// plan, deployments first.
#[instrument(skip_all, fields(ns = %ns))]
pub async fn reconcile_cached(
    client: &Client,
    ns: &str,
) -> Result<PassSummary, OpError> {
    let decl_api: Api<Cached> = Api::namespaced(client.clone(), ns);
    let declarations =
        decl_api.list(&ListParams::default()).await.map_err(classify)?.items;

    let dep_api: Api<Deployment> = Api::namespaced(client.clone(), ns);
    let deployments =
        dep_api.list(&ListParams::default()).await.map_err(classify)?.items;
    let svc_api: Api<Service> = Api::namespaced(client.clone(), ns);
    let services =
        svc_api.list(&ListParams::default()).await.map_err(classify)?.items;

    let dep_ops = plan(&CachedDeployment, &declarations, &deployments);
    let svc_ops = plan(&CachedService, &declarations, &services);
    debug!(
        declarations = declarations.len(),
        deployment_ops = dep_ops.len(),
        service_ops = svc_ops.len(),
        "cached plan ready"
    );

    let mut summary = apply(&dep_api, ns, dep_ops).await;
    summary.absorb(apply(&svc_api, ns, svc_ops).await);
    Ok(summary)
}
