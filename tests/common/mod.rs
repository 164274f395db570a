#![allow(dead_code)]

use std::time::Duration;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use kube::{
    Client,
    api::{Api, DeleteParams},
};
use tokio::task::JoinHandle;

// DNS-1123 safe numeric suffix for unique names
pub const DIGITS: [char; 10] =
    ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
pub fn uniq(prefix: &str) -> String {
    format!("{prefix}-{}", nanoid::nanoid!(6, &DIGITS))
}

// Env guard utilities
pub struct EnvGuard {
    key: &'static str,
    old: Option<String>,
}
impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            if let Some(ref v) = self.old {
                std::env::set_var(self.key, v);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }
}
pub fn set_env(key: &'static str, val: &str) -> EnvGuard {
    let old = std::env::var(key).ok();
    unsafe {
        std::env::set_var(key, val);
    }
    EnvGuard { key, old }
}

pub async fn wait_for_deployment(ns: &str, name: &str, client: Client) {
    let dep_api: Api<Deployment> = Api::namespaced(client, ns);
    for _ in 0..60 {
        if dep_api.get_opt(name).await.unwrap_or(None).is_some() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1000)).await;
    }
    panic!("deployment {}/{} not found in time", ns, name);
}

pub async fn wait_for_service(
    ns: &str,
    name: &str,
    client: Client,
) -> Service {
    let svc_api: Api<Service> = Api::namespaced(client, ns);
    for _ in 0..60 {
        if let Some(svc) = svc_api.get_opt(name).await.unwrap_or(None) {
            return svc;
        }
        tokio::time::sleep(Duration::from_millis(1000)).await;
    }
    panic!("service {}/{} not found in time", ns, name);
}

pub async fn wait_for_deployment_gone(ns: &str, name: &str, client: Client) {
    let dep_api: Api<Deployment> = Api::namespaced(client, ns);
    for _ in 0..60 {
        if dep_api.get_opt(name).await.unwrap_or(None).is_none() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1000)).await;
    }
    panic!("deployment {}/{} still present after timeout", ns, name);
}

pub async fn cleanup_k8s(ns: &str, name: &str, client: Client) {
    use metaparticle_sync::crd::{Cached, Singleton};
    let singleton_api: Api<Singleton> = Api::namespaced(client.clone(), ns);
    let cached_api: Api<Cached> = Api::namespaced(client.clone(), ns);
    let dep_api: Api<Deployment> = Api::namespaced(client.clone(), ns);
    let svc_api: Api<Service> = Api::namespaced(client.clone(), ns);

    let _ = singleton_api.delete(name, &DeleteParams::default()).await;
    let _ = cached_api.delete(name, &DeleteParams::default()).await;
    let _ = dep_api.delete(name, &DeleteParams::default()).await;
    let _ = svc_api.delete(name, &DeleteParams::default()).await;
}

// RAII guard to ensure controller abort + cleanup
pub struct ControllerGuard {
    ns: String,
    name: String,
    client: Client,
    ctrl: Option<JoinHandle<()>>,
}

impl ControllerGuard {
    pub fn new(ns: &str, name: &str, client: Client) -> Self {
        Self {
            ns: ns.to_string(),
            name: name.to_string(),
            client,
            ctrl: None,
        }
    }
    pub fn with_controller(mut self, ctrl: JoinHandle<()>) -> Self {
        self.ctrl = Some(ctrl);
        self
    }
}

impl Drop for ControllerGuard {
    fn drop(&mut self) {
        if let Some(ctrl) = self.ctrl.take() {
            ctrl.abort();
        }
        let ns = self.ns.clone();
        let name = self.name.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            cleanup_k8s(&ns, &name, client).await;
        });
    }
}
