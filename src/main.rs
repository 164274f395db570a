use envconfig::Envconfig;
use kube::Client;
use metaparticle_sync::{bootstrap, config::SyncConfig, init_tracing, runtime};
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    // This avoids runtime errors when no default provider is set.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    let cfg = SyncConfig::init_from_env()?;
    info!(?cfg, "Starting metaparticle sync controller");

    let client = Client::try_default().await?;
    bootstrap::ensure_crds(&client).await?;
    runtime::run_all(client, cfg).await
}
