use kube::core::CustomResourceExt;
use metaparticle_sync::crd::{Cached, Singleton};

fn main() {
    for crd in [Singleton::crd(), Cached::crd()] {
        let yaml = serde_yaml::to_string(&crd).expect("serialize CRD to YAML");
        println!("---\n{}", yaml);
    }
}
