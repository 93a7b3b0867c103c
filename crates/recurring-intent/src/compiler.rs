//! Plan → contract source + manifest, persisted through an [`ArtifactStore`].

use std::sync::atomic::{AtomicU64, Ordering};

use recurring_intent_types::{ConstructorArgs, Manifest, Plan};
use serde::Serialize;
use sha3::{Digest, Keccak256};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info};

use crate::{
    errors::CompileError,
    store::ArtifactStore,
    template::{Template, ARTIFACT_STEM},
};

const CONTRACTS_DIR: &str = "contracts";
const MANIFESTS_DIR: &str = "manifests";
const ID_BYTES: usize = 16;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Compiled {
    pub source: String,
    pub manifest: Manifest,
}

pub struct Compiler<S> {
    template: Template,
    store: S,
}

impl<S: ArtifactStore> Compiler<S> {
    pub fn new(template: Template, store: S) -> Self {
        Self { template, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Render without persisting. Same plan, same text.
    pub fn render(&self, plan: &Plan) -> String {
        self.template.render(plan)
    }

    pub fn compile(&self, plan: &Plan) -> Result<Compiled, CompileError> {
        let source = self.render(plan);

        let now = OffsetDateTime::now_utc();
        let created_at = now.format(&Rfc3339)?;
        let id = manifest_id(plan, now.unix_timestamp_nanos(), SEQUENCE.fetch_add(1, Ordering::Relaxed))?;
        let artifact = format!("{ARTIFACT_STEM}-{id}.sol");
        let manifest = Manifest::new(plan, artifact.as_str(), created_at, id.as_str());
        debug!(%id, chain = plan.chain(), "rendered contract source");

        let contract_path = format!("{CONTRACTS_DIR}/{artifact}");
        self.write(&contract_path, &source)?;

        let manifest_path = format!("{MANIFESTS_DIR}/{id}.json");
        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        self.write(&manifest_path, &manifest_json)?;

        info!(contract = %contract_path, manifest = %manifest_path, "wrote artifacts");
        Ok(Compiled { source, manifest })
    }

    fn write(&self, path: &str, content: &str) -> Result<(), CompileError> {
        self.store
            .write_artifact(path, content)
            .map_err(|source| CompileError::Store {
                path: path.to_string(),
                source,
            })
    }
}

/// Keccak-256 over the canonical constructor args, the creation instant and a
/// process-wide sequence number, truncated to 16 bytes.
fn manifest_id(plan: &Plan, nanos: i128, seq: u64) -> Result<String, serde_json::Error> {
    let args = serde_json::to_vec(&ConstructorArgs::from(plan))?;
    let mut h = Keccak256::new();
    h.update(&args);
    h.update(nanos.to_be_bytes());
    h.update(seq.to_be_bytes());
    let digest = h.finalize();
    Ok(hex::encode(&digest[..ID_BYTES]))
}
