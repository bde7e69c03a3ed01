//! JeuxDeMots API client
//!
//! Speaks to the JDM REST API (`/relations/from/{term}`) and caches every
//! response in two tiers: an in-process map and one JSON file per request
//! shape under the cache directory. Requests are rate limited (minimum
//! spacing between request starts) and retried with backoff; an HTTP 404 is
//! an unknown term, cached as an empty document so it is never re-fetched.
//!
//! The client owns its async runtime, so the public surface is synchronous:
//! the classification core blocks on the first read of a term and hits the
//! cache afterwards. Bulk prefetch fans term fetches out across the runtime
//! with bounded concurrency; the rate limiter still spaces request starts.

use crate::JdmError;
use graspit_domain::relation::{R_INFOPOT, R_ISA, SEM_TAG_PREFIX};
use graspit_domain::LexicalSource;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Default JeuxDeMots API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://jdm-api.demo.lirmm.fr/v0";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default minimum spacing between request starts (milliseconds)
pub const DEFAULT_RATE_LIMIT_MS: u64 = 50;

/// Default maximum number of relations returned per request
pub const DEFAULT_RELATION_LIMIT: u32 = 200;

/// In-flight request cap during bulk prefetch
const PREFETCH_CONCURRENCY: usize = 8;

/// The three request shapes a term's signature is built from
const SIGNATURE_SHAPES: [(Option<u32>, i64); 3] =
    [(Some(R_ISA), 1), (Some(R_INFOPOT), 1), (None, 0)];

/// Tunable client settings.
///
/// Embedded verbatim in the CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdmSettings {
    /// API base URL
    pub endpoint: String,

    /// Minimum spacing between request starts (milliseconds)
    pub rate_limit_ms: u64,

    /// Attempts per request before degrading to empty data
    pub max_retries: u32,

    /// Maximum relations per request
    pub relation_limit: u32,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for JdmSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            relation_limit: DEFAULT_RELATION_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A lexical-network node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Surface form of the node
    pub name: String,
    /// JDM node type
    pub node_type: i64,
    /// Node weight
    pub weight: f64,
}

/// A typed, weighted edge between two nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relation {
    /// Source node id
    pub source: u64,
    /// Target node id
    pub target: u64,
    /// Relation-type id
    pub rel_type: u32,
    /// Association weight
    pub weight: f64,
}

/// Normalized response for one request shape; the unit of caching
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelationDocument {
    /// Nodes referenced by the relations, keyed by id
    pub nodes: HashMap<u64, Node>,
    /// Outgoing relations of the queried term
    pub relations: Vec<Relation>,
}

/// Outcome of a bulk prefetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Terms fetched from the network
    pub fetched: usize,
    /// Terms already fully cached
    pub cached: usize,
}

// Wire format of the JDM API

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    relations: Vec<RawRelation>,
}

#[derive(Deserialize)]
struct RawNode {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    node_type: i64,
    #[serde(rename = "w", default)]
    weight: f64,
}

#[derive(Deserialize)]
struct RawRelation {
    #[serde(default)]
    node1: u64,
    #[serde(default)]
    node2: u64,
    #[serde(rename = "type", default)]
    rel_type: u32,
    #[serde(rename = "w", default)]
    weight: f64,
}

impl From<RawResponse> for RelationDocument {
    fn from(raw: RawResponse) -> Self {
        let nodes = raw
            .nodes
            .into_iter()
            .map(|n| {
                (
                    n.id,
                    Node {
                        name: n.name,
                        node_type: n.node_type,
                        weight: n.weight,
                    },
                )
            })
            .collect();
        let relations = raw
            .relations
            .into_iter()
            .map(|r| Relation {
                source: r.node1,
                target: r.node2,
                rel_type: r.rel_type,
                weight: r.weight,
            })
            .collect();
        Self { nodes, relations }
    }
}

/// Cache key for one request shape
fn cache_key(term: &str, types: Option<u32>, min_weight: i64) -> String {
    let types_str = types.map_or_else(|| "all".to_string(), |t| t.to_string());
    let raw = format!("{}|{}|{}", term, types_str, min_weight);
    let digest = Sha256::digest(raw.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

struct ClientInner {
    settings: JdmSettings,
    cache_dir: PathBuf,
    http: reqwest::Client,
    memory: Mutex<HashMap<String, Arc<RelationDocument>>>,
    next_request_at: Mutex<Option<Instant>>,
}

impl ClientInner {
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Memory tier first, then disk; a disk hit is promoted into memory.
    fn lookup_cache(&self, key: &str) -> Option<Arc<RelationDocument>> {
        if let Some(doc) = self.memory.lock().unwrap().get(key) {
            return Some(Arc::clone(doc));
        }
        let path = self.cache_path(key);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<RelationDocument>(&contents) {
            Ok(doc) => Some(self.remember(key, doc, false)),
            Err(e) => {
                warn!("discarding corrupt cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Insert into the memory tier (first writer wins; concurrent identical
    /// writes are idempotent) and optionally persist to disk.
    fn remember(&self, key: &str, doc: RelationDocument, persist: bool) -> Arc<RelationDocument> {
        if persist {
            let path = self.cache_path(key);
            match serde_json::to_string(&doc) {
                Ok(json) => {
                    if let Err(e) = fs::write(&path, json) {
                        warn!("cache write failed for {}: {}", path.display(), e);
                    }
                }
                Err(e) => warn!("cache serialization failed: {}", e),
            }
        }
        let mut memory = self.memory.lock().unwrap();
        Arc::clone(
            memory
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(doc)),
        )
    }

    /// Reserve the next request slot, sleeping out the spacing if needed
    async fn pace(&self) {
        let wait = {
            let mut next_at = self.next_request_at.lock().unwrap();
            let now = Instant::now();
            let spacing = Duration::from_millis(self.settings.rate_limit_ms);
            match *next_at {
                Some(at) if at > now => {
                    *next_at = Some(at + spacing);
                    at - now
                }
                _ => {
                    *next_at = Some(now + spacing);
                    Duration::ZERO
                }
            }
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    async fn fetch(
        &self,
        term: &str,
        types: Option<u32>,
        min_weight: i64,
    ) -> Result<RelationDocument, JdmError> {
        let mut url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|e| JdmError::Communication(format!("invalid endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| JdmError::Communication("endpoint cannot be a base URL".to_string()))?
            .extend(["relations", "from", term]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("min_weight", &min_weight.to_string());
            query.append_pair("limit", &self.settings.relation_limit.to_string());
            if let Some(t) = types {
                query.append_pair("types_ids", &t.to_string());
            }
        }

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.settings.max_retries {
            self.pace().await;

            match self
                .http
                .get(url.clone())
                .header("Accept", "application/json")
                .send()
                .await
            {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<RawResponse>().await {
                            Ok(raw) => Ok(raw.into()),
                            Err(e) => Err(JdmError::InvalidResponse(format!(
                                "failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        // Unknown term: an answer, not a fault
                        return Ok(RelationDocument::default());
                    } else {
                        let status = response.status();
                        let body = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "unknown error".to_string());
                        last_error =
                            Some(JdmError::Communication(format!("HTTP {}: {}", status, body)));
                    }
                }
                Err(e) => {
                    last_error = Some(JdmError::Communication(format!("request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.settings.max_retries {
                tokio::time::sleep(Duration::from_secs(attempts as u64)).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| JdmError::Communication("max retries exceeded".to_string())))
    }

    /// Full read path for one request shape: cache, then network. Fetch
    /// results are persisted; transport failures degrade to an empty
    /// document memoized in memory only, so a later run can retry.
    async fn document(
        &self,
        term: &str,
        types: Option<u32>,
        min_weight: i64,
    ) -> Arc<RelationDocument> {
        let key = cache_key(term, types, min_weight);
        if let Some(doc) = self.lookup_cache(&key) {
            return doc;
        }
        debug!("fetching '{}' (types: {:?}, min_weight: {})", term, types, min_weight);
        match self.fetch(term, types, min_weight).await {
            Ok(doc) => self.remember(&key, doc, true),
            Err(e) => {
                warn!("lexical fetch failed for '{}': {}", term, e);
                self.remember(&key, RelationDocument::default(), false)
            }
        }
    }

    /// Warm all three signature shapes for one term. Returns true when a
    /// network fetch was needed.
    async fn prefetch_term(&self, term: &str) -> bool {
        let all_cached = SIGNATURE_SHAPES
            .iter()
            .all(|(types, w)| self.lookup_cache(&cache_key(term, *types, *w)).is_some());
        if all_cached {
            return false;
        }
        for (types, w) in SIGNATURE_SHAPES {
            self.document(term, types, w).await;
        }
        true
    }
}

/// JeuxDeMots API client with a two-tier response cache.
///
/// Implements `LexicalSource`; per the trait contract every read is total
/// and degrades failures to empty data, so the classification core never
/// sees an error from this client.
pub struct JdmClient {
    inner: Arc<ClientInner>,
    runtime: tokio::runtime::Runtime,
}

impl JdmClient {
    /// Create a client with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created or the
    /// HTTP client/runtime cannot be constructed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, JdmError> {
        Self::with_settings(cache_dir, JdmSettings::default())
    }

    /// Create a client with explicit settings
    pub fn with_settings(
        cache_dir: impl Into<PathBuf>,
        settings: JdmSettings,
    ) -> Result<Self, JdmError> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| JdmError::Communication(format!("failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| JdmError::Runtime(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                settings,
                cache_dir,
                http,
                memory: Mutex::new(HashMap::new()),
                next_request_at: Mutex::new(None),
            }),
            runtime,
        })
    }

    /// Cached outgoing relations of a term for one request shape.
    ///
    /// `types` restricts the server-side relation types (`None` = all);
    /// `min_weight` is the server-side weight floor.
    pub fn relations(
        &self,
        term: &str,
        types: Option<u32>,
        min_weight: i64,
    ) -> Arc<RelationDocument> {
        let key = cache_key(term, types, min_weight);
        if let Some(doc) = self.inner.lookup_cache(&key) {
            return doc;
        }
        self.runtime
            .block_on(self.inner.document(term, types, min_weight))
    }

    /// Warm the cache for a batch of terms.
    ///
    /// Duplicate terms are fetched once. Fetches run with bounded
    /// concurrency; the rate limiter still spaces request starts.
    pub fn prefetch(&self, terms: &[String]) -> PrefetchReport {
        let mut seen = HashSet::new();
        let unique: Vec<String> = terms
            .iter()
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();
        let total = unique.len();

        let report = self.runtime.block_on(async {
            let mut report = PrefetchReport::default();
            let mut tasks: JoinSet<bool> = JoinSet::new();

            for term in unique {
                if tasks.len() >= PREFETCH_CONCURRENCY {
                    if let Some(Ok(fetched)) = tasks.join_next().await {
                        if fetched {
                            report.fetched += 1;
                        } else {
                            report.cached += 1;
                        }
                    }
                }
                let inner = Arc::clone(&self.inner);
                tasks.spawn(async move { inner.prefetch_term(&term).await });
            }

            while let Some(joined) = tasks.join_next().await {
                if let Ok(fetched) = joined {
                    if fetched {
                        report.fetched += 1;
                    } else {
                        report.cached += 1;
                    }
                }
            }
            report
        });

        info!(
            "prefetch done: {} fetched, {} cached of {} terms",
            report.fetched, report.cached, total
        );
        report
    }
}

impl LexicalSource for JdmClient {
    fn hyperonyms(&self, term: &str) -> HashMap<String, f64> {
        let doc = self.relations(term, Some(R_ISA), 1);
        let mut result = HashMap::new();
        for rel in &doc.relations {
            if rel.rel_type == R_ISA && rel.weight > 0.0 {
                if let Some(node) = doc.nodes.get(&rel.target) {
                    result.insert(node.name.clone(), rel.weight);
                }
            }
        }
        result
    }

    fn semantic_types(&self, term: &str) -> HashSet<String> {
        let doc = self.relations(term, Some(R_INFOPOT), 1);
        doc.relations
            .iter()
            .filter(|r| r.rel_type == R_INFOPOT && r.weight > 0.0)
            .filter_map(|r| doc.nodes.get(&r.target))
            .filter(|n| n.name.starts_with(SEM_TAG_PREFIX))
            .map(|n| n.name.clone())
            .collect()
    }

    fn relation_types_present(&self, term: &str) -> HashSet<u32> {
        self.relations(term, None, 0)
            .relations
            .iter()
            .filter(|r| r.weight > 0.0)
            .map(|r| r.rel_type)
            .collect()
    }

    fn knows(&self, term: &str) -> bool {
        !self.relations(term, None, 0).nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn prime_cache(dir: &TempDir, term: &str, types: Option<u32>, min_weight: i64, doc: &RelationDocument) {
        let key = cache_key(term, types, min_weight);
        let path = dir.path().join(format!("{}.json", key));
        fs::write(path, serde_json::to_string(doc).unwrap()).unwrap();
    }

    fn isa_document() -> RelationDocument {
        RelationDocument {
            nodes: [
                (
                    1,
                    Node {
                        name: "bois".to_string(),
                        node_type: 1,
                        weight: 50.0,
                    },
                ),
                (
                    2,
                    Node {
                        name: "matériau".to_string(),
                        node_type: 1,
                        weight: 40.0,
                    },
                ),
                (
                    3,
                    Node {
                        name: "obsolète".to_string(),
                        node_type: 1,
                        weight: 10.0,
                    },
                ),
            ]
            .into_iter()
            .collect(),
            relations: vec![
                Relation {
                    source: 1,
                    target: 2,
                    rel_type: R_ISA,
                    weight: 120.0,
                },
                // Nonpositive weights never contribute
                Relation {
                    source: 1,
                    target: 3,
                    rel_type: R_ISA,
                    weight: -4.0,
                },
                // Other relation types in the same document are ignored
                Relation {
                    source: 1,
                    target: 2,
                    rel_type: 99,
                    weight: 30.0,
                },
            ],
        }
    }

    #[test]
    fn test_cache_key_deterministic_and_distinct() {
        let a = cache_key("bois", Some(6), 1);
        let b = cache_key("bois", Some(6), 1);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        assert_ne!(cache_key("bois", Some(6), 1), cache_key("bois", Some(36), 1));
        assert_ne!(cache_key("bois", None, 0), cache_key("bois", Some(6), 0));
        assert_ne!(cache_key("bois", None, 0), cache_key("fer", None, 0));
    }

    #[test]
    fn test_wire_format_parsing() {
        let body = r#"{
            "nodes": [
                {"id": 7, "name": "désert", "type": 1, "w": 50.0},
                {"id": 8, "name": "étendue", "type": 1, "w": 12.5}
            ],
            "relations": [
                {"node1": 7, "node2": 8, "type": 6, "w": 33.0}
            ]
        }"#;

        let raw: RawResponse = serde_json::from_str(body).unwrap();
        let doc = RelationDocument::from(raw);

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[&8].name, "étendue");
        assert_eq!(doc.relations.len(), 1);
        assert_eq!(doc.relations[0].rel_type, 6);
        assert_eq!(doc.relations[0].weight, 33.0);
    }

    #[test]
    fn test_wire_format_tolerates_missing_fields() {
        let body = r#"{"relations": [{"node1": 1, "node2": 2, "type": 6}]}"#;
        let raw: RawResponse = serde_json::from_str(body).unwrap();
        let doc = RelationDocument::from(raw);

        assert!(doc.nodes.is_empty());
        assert_eq!(doc.relations[0].weight, 0.0);
    }

    #[test]
    fn test_disk_cache_round_trip() {
        let dir = TempDir::new().unwrap();
        let doc = isa_document();
        prime_cache(&dir, "bois", Some(R_ISA), 1, &doc);

        let client = JdmClient::new(dir.path()).unwrap();
        let loaded = client.relations("bois", Some(R_ISA), 1);
        assert_eq!(*loaded, doc);
    }

    #[test]
    fn test_memory_tier_promotion_is_idempotent() {
        let dir = TempDir::new().unwrap();
        prime_cache(&dir, "bois", Some(R_ISA), 1, &isa_document());

        let client = JdmClient::new(dir.path()).unwrap();
        let first = client.relations("bois", Some(R_ISA), 1);
        let second = client.relations("bois", Some(R_ISA), 1);

        // Second read is served by the memory tier
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_hyperonyms_from_cached_document() {
        let dir = TempDir::new().unwrap();
        prime_cache(&dir, "bois", Some(R_ISA), 1, &isa_document());

        let client = JdmClient::new(dir.path()).unwrap();
        let hyp = client.hyperonyms("bois");

        assert_eq!(hyp.len(), 1);
        assert_eq!(hyp.get("matériau"), Some(&120.0));
    }

    #[test]
    fn test_semantic_types_filter_tag_prefix() {
        let dir = TempDir::new().unwrap();
        let doc = RelationDocument {
            nodes: [
                (
                    10,
                    Node {
                        name: "_INFO-SEM:substance".to_string(),
                        node_type: 2,
                        weight: 5.0,
                    },
                ),
                (
                    11,
                    Node {
                        name: "divers".to_string(),
                        node_type: 2,
                        weight: 5.0,
                    },
                ),
            ]
            .into_iter()
            .collect(),
            relations: vec![
                Relation {
                    source: 1,
                    target: 10,
                    rel_type: R_INFOPOT,
                    weight: 9.0,
                },
                Relation {
                    source: 1,
                    target: 11,
                    rel_type: R_INFOPOT,
                    weight: 9.0,
                },
            ],
        };
        prime_cache(&dir, "bois", Some(R_INFOPOT), 1, &doc);

        let client = JdmClient::new(dir.path()).unwrap();
        let tags = client.semantic_types("bois");

        assert_eq!(tags.len(), 1);
        assert!(tags.contains("_INFO-SEM:substance"));
    }

    #[test]
    fn test_relation_types_present_and_knows() {
        let dir = TempDir::new().unwrap();
        let doc = isa_document();
        prime_cache(&dir, "bois", None, 0, &doc);

        let client = JdmClient::new(dir.path()).unwrap();
        let present = client.relation_types_present("bois");

        // Positive-weight relation types only
        assert!(present.contains(&R_ISA));
        assert!(present.contains(&99));
        assert_eq!(present.len(), 2);
        assert!(client.knows("bois"));
    }

    #[test]
    fn test_corrupt_cache_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let key = cache_key("bois", Some(R_ISA), 1);
        fs::write(dir.path().join(format!("{}.json", key)), "not json").unwrap();

        // The corrupt entry is ignored; the (failing) fetch degrades to empty
        let settings = JdmSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            max_retries: 1,
            rate_limit_ms: 0,
            timeout_secs: 2,
            ..JdmSettings::default()
        };
        let client = JdmClient::with_settings(dir.path(), settings).unwrap();
        let doc = client.relations("bois", Some(R_ISA), 1);
        assert!(doc.nodes.is_empty());
        assert!(doc.relations.is_empty());
    }

    #[test]
    fn test_transport_failure_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let settings = JdmSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            max_retries: 1,
            rate_limit_ms: 0,
            timeout_secs: 2,
            ..JdmSettings::default()
        };
        let client = JdmClient::with_settings(dir.path(), settings).unwrap();

        // The LexicalSource contract: failures become empty data, no panic
        assert!(client.hyperonyms("bois").is_empty());
        assert!(!client.knows("bois"));

        // Failures are not persisted to disk, so a later run can retry
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 0);
    }

    // Integration test (requires network access to the JDM API)
    #[test]
    #[ignore]
    fn test_live_api_integration() {
        let dir = TempDir::new().unwrap();
        let client = JdmClient::new(dir.path()).unwrap();

        let hyp = client.hyperonyms("chat");
        assert!(!hyp.is_empty());
        assert!(client.knows("chat"));
    }
}
