use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::PostParams;
use kube::{Api, Client, CustomResourceExt, ResourceExt};
use tracing::{debug, info};

use crate::controller::{OpError, classify};
use crate::crd::{Cached, Singleton};

/// Register the singleton and cached CRDs if the cluster does not have them
/// yet. Declarations cannot be listed before their schema exists, so this
/// runs once before the first sweep.
pub async fn ensure_crds(client: &Client) -> Result<(), OpError> {
    let api: Api<CustomResourceDefinition> = Api::all(client.clone());
    for crd in [Singleton::crd(), Cached::crd()] {
        let name = crd.name_any();
        if api.get_opt(&name).await.map_err(classify)?.is_some() {
            debug!(%name, "CRD already registered");
            continue;
        }
        info!(%name, "CRD not found; creating");
        match api.create(&PostParams::default(), &crd).await {
            Ok(_) => info!(%name, "CRD created"),
            Err(err) => match classify(err) {
                // Another instance or an admin won the race; that's fine.
                OpError::AlreadyExists(_) => {
                    debug!(%name, "CRD created concurrently")
                }
                other => return Err(other),
            },
        }
    }
    Ok(())
}
