use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ListParams};
use kube::{Client, ResourceExt};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::SyncConfig;
use crate::controller::apply::PassSummary;
use crate::controller::{OpError, reconcile_cached, reconcile_singletons};

/// Run the fixed-interval sweep loop until a shutdown signal arrives.
///
/// Each tick performs one full cluster sweep to completion; there is never
/// more than one sweep in flight, so no two passes can race on the same
/// `(namespace, kind)` pair.
pub async fn run_all(client: Client, cfg: SyncConfig) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    {
        let token = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                token.cancel();
            }
        });
    }

    let mut ticker = tokio::time::interval(cfg.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_ms = cfg.interval_ms, "starting sweep loop");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => sweep(&client, &cfg).await,
        }
    }

    info!("sweep loop stopped");
    Ok(())
}

/// One full sweep: reconcile every target namespace for every enabled kind.
/// A failing namespace is logged and skipped; its siblings still converge.
pub async fn sweep(client: &Client, cfg: &SyncConfig) {
    let namespaces = match target_namespaces(client, cfg).await {
        Ok(list) => list,
        Err(err) => {
            error!(error = %err, "failed to list namespaces; skipping sweep");
            return;
        }
    };

    for ns in namespaces {
        if cfg.features.singleton {
            report(&ns, "singleton", reconcile_singletons(client, &ns).await);
        }
        if cfg.features.cached {
            report(&ns, "cached", reconcile_cached(client, &ns).await);
        }
    }
}

fn report(ns: &str, kind: &str, outcome: Result<PassSummary, OpError>) {
    match outcome {
        Ok(summary) if summary.eventful() => info!(
            %ns,
            %kind,
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            failures = summary.failures,
            "pass complete"
        ),
        Ok(_) => debug!(%ns, %kind, "pass complete; already converged"),
        Err(err) => error!(%ns, %kind, error = %err, "pass failed"),
    }
}

async fn target_namespaces(
    client: &Client,
    cfg: &SyncConfig,
) -> Result<Vec<String>, OpError> {
    if let Some(ns) = &cfg.namespace {
        return Ok(vec![ns.clone()]);
    }
    let api: Api<Namespace> = Api::all(client.clone());
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(crate::controller::classify)?;
    Ok(list.into_iter().map(|ns| ns.name_any()).collect())
}
