//! Retrieval worker use case
//!
//! Fetches notes or books for an owner from the owner's partner and maps
//! them to canonical records; mapped notes are classified against the
//! owner's tenant thresholds. A partner answering with a non-2xx status is
//! an expected outcome: the status and raw body are returned as data and
//! the mapper is never run on them.

use crate::config::WorkerConfig;
use crate::ports::progress::{NoProgress, RetrievalPhase, RetrievalProgress};
use crate::ports::tenant_directory::{ResolvedTenant, TenantDirectory};
use crate::ports::upstream_client::{
    QueryParams, TransportError, UpstreamClient, UpstreamResource, UpstreamResponse,
};
use notehub_domain::core::string::truncate;
use notehub_domain::{Book, ClassifiedNote, MapperRegistry};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Bytes of a partner error body included in the log line
const LOGGED_BODY_LIMIT: usize = 200;

/// Errors that abort a retrieval
///
/// Everything the partner itself answers is an outcome, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Unknown tenant for owner {0}")]
    UnknownTenant(String),

    #[error("Malformed upstream payload from {tenant}: {reason}")]
    MalformedUpstreamPayload { tenant: String, reason: String },

    #[error("Retrieval aborted: {0}")]
    Aborted(String),
}

/// Input for the retrieval worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalRequest {
    pub resource: UpstreamResource,
    pub params: QueryParams,
}

impl RetrievalRequest {
    pub fn notes(params: QueryParams) -> Self {
        Self {
            resource: UpstreamResource::Notes,
            params,
        }
    }

    pub fn books(params: QueryParams) -> Self {
        Self {
            resource: UpstreamResource::Books,
            params,
        }
    }
}

/// Canonical records produced from a successful partner answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappedPayload {
    Notes(Vec<ClassifiedNote>),
    Books(Vec<Book>),
}

impl MappedPayload {
    pub fn len(&self) -> usize {
        match self {
            MappedPayload::Notes(notes) => notes.len(),
            MappedPayload::Books(books) => books.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// 2xx answer, mapped
    Mapped { status: u16, payload: MappedPayload },
    /// Non-2xx answer, body untouched
    UpstreamError { status: u16, body: String },
    /// No answer was obtained
    TransportFailure(TransportError),
}

impl RetrievalOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RetrievalOutcome::Mapped { .. })
    }

    /// Status the partner answered with, if it answered
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            RetrievalOutcome::Mapped { status, .. } => Some(*status),
            RetrievalOutcome::UpstreamError { status, .. } => Some(*status),
            RetrievalOutcome::TransportFailure(_) => None,
        }
    }

    /// `(status, payload)` pair handed to the response delivery layer
    ///
    /// A failure body that is JSON is passed through as that JSON, any other
    /// body as a JSON string. Transport failures have no partner status and
    /// are reported as 504 (timeout) or 502.
    pub fn to_status_payload(&self) -> (u16, Value) {
        match self {
            RetrievalOutcome::Mapped { status, payload } => (*status, json!(payload)),
            RetrievalOutcome::UpstreamError { status, body } => {
                let payload = serde_json::from_str(body)
                    .unwrap_or_else(|_| Value::String(body.clone()));
                (*status, payload)
            }
            RetrievalOutcome::TransportFailure(e) => {
                let status = if e.is_timeout() { 504 } else { 502 };
                (status, json!({ "error": e.to_string() }))
            }
        }
    }
}

/// Use case fetching partner data for an owner
pub struct RetrievalWorker<D, C>
where
    D: TenantDirectory + 'static,
    C: UpstreamClient + 'static,
{
    directory: Arc<D>,
    client: Arc<C>,
    mappers: MapperRegistry,
    config: WorkerConfig,
}

impl<D, C> RetrievalWorker<D, C>
where
    D: TenantDirectory + 'static,
    C: UpstreamClient + 'static,
{
    pub fn new(directory: Arc<D>, client: Arc<C>) -> Self {
        Self {
            directory,
            client,
            mappers: MapperRegistry::with_defaults(),
            config: WorkerConfig::default(),
        }
    }

    pub fn with_mappers(mut self, mappers: MapperRegistry) -> Self {
        self.mappers = mappers;
        self
    }

    pub fn with_config(mut self, config: WorkerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        owner_reference: &str,
        request: RetrievalRequest,
    ) -> Result<RetrievalOutcome, RetrievalError> {
        self.execute_with_progress(owner_reference, request, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        owner_reference: &str,
        request: RetrievalRequest,
        progress: &dyn RetrievalProgress,
    ) -> Result<RetrievalOutcome, RetrievalError> {
        let tenant = self
            .directory
            .resolve(owner_reference)
            .await
            .ok_or_else(|| RetrievalError::UnknownTenant(owner_reference.to_string()))?;
        let mapper = self
            .mappers
            .get(tenant.family)
            .map_err(|_| RetrievalError::UnknownTenant(owner_reference.to_string()))?;

        info!(
            "Retrieving {} for owner {} from tenant {} ({})",
            request.resource,
            owner_reference,
            tenant.name(),
            tenant.family
        );
        progress.on_phase(owner_reference, RetrievalPhase::Dispatched);

        let response = match self.fetch(&tenant, &request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Tenant {} unreachable: {}", tenant.name(), e);
                progress.on_phase(owner_reference, RetrievalPhase::UpstreamFailure);
                progress.on_phase(owner_reference, RetrievalPhase::Reported);
                return Ok(RetrievalOutcome::TransportFailure(e));
            }
        };

        if !response.is_success() {
            warn!(
                "Tenant {} answered {} for {}: {}",
                tenant.name(),
                response.status,
                request.resource,
                truncate(&response.body, LOGGED_BODY_LIMIT)
            );
            progress.on_phase(owner_reference, RetrievalPhase::UpstreamFailure);
            progress.on_phase(owner_reference, RetrievalPhase::Reported);
            return Ok(RetrievalOutcome::UpstreamError {
                status: response.status,
                body: response.body,
            });
        }
        progress.on_phase(owner_reference, RetrievalPhase::UpstreamSuccess);

        let malformed = |reason: String| RetrievalError::MalformedUpstreamPayload {
            tenant: tenant.name().to_string(),
            reason,
        };
        let document: Value = serde_json::from_str(&response.body)
            .map_err(|e| malformed(format!("body is not JSON: {}", e)))?;

        let payload = match request.resource {
            UpstreamResource::Notes => MappedPayload::Notes(
                mapper
                    .map_notes(&document)
                    .map_err(|e| malformed(e.to_string()))?
                    .into_iter()
                    .map(|note| note.classified(&tenant.profile))
                    .collect(),
            ),
            UpstreamResource::Books => MappedPayload::Books(
                mapper
                    .map_books(&document)
                    .map_err(|e| malformed(e.to_string()))?,
            ),
        };

        debug!(
            "Mapped {} {} from tenant {}",
            payload.len(),
            request.resource,
            tenant.name()
        );
        progress.on_phase(owner_reference, RetrievalPhase::Mapped);

        Ok(RetrievalOutcome::Mapped {
            status: response.status,
            payload,
        })
    }

    /// Issue the upstream call, bounded by the configured timeout
    async fn fetch(
        &self,
        tenant: &ResolvedTenant,
        request: &RetrievalRequest,
    ) -> Result<UpstreamResponse, TransportError> {
        let call = self
            .client
            .fetch(tenant.name(), request.resource, &request.params);

        match self.config.upstream_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(TransportError::Timeout)),
            None => call.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use notehub_domain::{
        ContentLength, DomainError, Note, NoteType, ResponseMapper, TenantFamily, TenantProfile,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockDirectory {
        tenants: HashMap<String, ResolvedTenant>,
    }

    impl MockDirectory {
        fn new() -> Self {
            let mut tenants = HashMap::new();
            tenants.insert(
                "north-user".to_string(),
                ResolvedTenant::new(TenantProfile::north(), TenantFamily::North),
            );
            tenants.insert(
                "south-user".to_string(),
                ResolvedTenant::new(TenantProfile::south(), TenantFamily::South),
            );
            Self { tenants }
        }
    }

    #[async_trait]
    impl TenantDirectory for MockDirectory {
        async fn resolve(&self, owner_reference: &str) -> Option<ResolvedTenant> {
            self.tenants.get(owner_reference).cloned()
        }
    }

    struct MockClient {
        response: Result<UpstreamResponse, TransportError>,
        delay: Option<Duration>,
        calls: Mutex<Vec<(String, UpstreamResource, QueryParams)>>,
    }

    impl MockClient {
        fn answering(status: u16, body: impl Into<String>) -> Self {
            Self {
                response: Ok(UpstreamResponse::new(status, body)),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: TransportError) -> Self {
            Self {
                response: Err(error),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UpstreamClient for MockClient {
        async fn fetch(
            &self,
            tenant: &str,
            resource: UpstreamResource,
            params: &QueryParams,
        ) -> Result<UpstreamResponse, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((tenant.to_string(), resource, params.clone()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.clone()
        }
    }

    /// North mapper that counts how often it is invoked
    struct CountingMapper {
        calls: Arc<AtomicUsize>,
    }

    impl ResponseMapper for CountingMapper {
        fn family(&self) -> TenantFamily {
            TenantFamily::North
        }

        fn map_books(&self, document: &Value) -> Result<Vec<Book>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            notehub_domain::NorthResponseMapper.map_books(document)
        }

        fn map_notes(&self, document: &Value) -> Result<Vec<Note>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            notehub_domain::NorthResponseMapper.map_notes(document)
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        phases: Mutex<Vec<RetrievalPhase>>,
    }

    impl RetrievalProgress for RecordingProgress {
        fn on_phase(&self, _owner_reference: &str, phase: RetrievalPhase) {
            self.phases.lock().unwrap().push(phase);
        }
    }

    // ==================== Helpers ====================

    fn worker(client: MockClient) -> (RetrievalWorker<MockDirectory, MockClient>, Arc<MockClient>) {
        let client = Arc::new(client);
        let worker = RetrievalWorker::new(Arc::new(MockDirectory::new()), Arc::clone(&client));
        (worker, client)
    }

    fn north_notes_body(count: usize) -> String {
        let notes: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "id": i,
                    "titulo": format!("nota {}", i),
                    "tipo": "resenia",
                    "fecha_creacion": "2024-01-01",
                    "contenido": "breve"
                })
            })
            .collect();
        json!({ "notas": notes }).to_string()
    }

    // ==================== Success ====================

    #[tokio::test]
    async fn test_success_maps_every_note() {
        let (worker, _) = worker(MockClient::answering(200, north_notes_body(3)));

        let outcome = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();

        match &outcome {
            RetrievalOutcome::Mapped {
                status,
                payload: MappedPayload::Notes(notes),
            } => {
                assert_eq!(*status, 200);
                assert_eq!(notes.len(), 3);
                assert!(notes.iter().all(|n| n.note.note_type == Some(NoteType::Review)));
                assert!(notes.iter().all(|n| n.content_length == ContentLength::Short));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let (status, payload) = outcome.to_status_payload();
        assert_eq!(status, 200);
        assert_eq!(payload["notes"].as_array().unwrap().len(), 3);
        assert_eq!(payload["notes"][0]["content_length"], "short");
    }

    fn long_note_bodies(words: usize) -> (String, String) {
        let content = vec!["palabra"; words].join(" ");
        let north = json!({"notas": [{"id": 1, "tipo": "resenia", "contenido": content}]});
        let south = json!({"Notas": [{"Id": 1, "ReseniaNota": true, "Contenido": content}]});
        (north.to_string(), south.to_string())
    }

    async fn classified_lengths(owner: &str, body: String) -> Vec<ContentLength> {
        let (worker, _) = worker(MockClient::answering(200, body));
        let outcome = worker
            .execute(owner, RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();
        match outcome {
            RetrievalOutcome::Mapped {
                payload: MappedPayload::Notes(notes),
                ..
            } => notes.iter().map(|n| n.content_length).collect(),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_partner_notes_are_classified_with_tenant_thresholds() {
        // 55 words: medium for north (50/100), short for south (60/120)
        let (north, south) = long_note_bodies(55);
        assert_eq!(
            classified_lengths("north-user", north).await,
            vec![ContentLength::Medium]
        );
        assert_eq!(
            classified_lengths("south-user", south).await,
            vec![ContentLength::Short]
        );

        // 110 words: long for north, medium for south
        let (north, south) = long_note_bodies(110);
        assert_eq!(
            classified_lengths("north-user", north).await,
            vec![ContentLength::Long]
        );
        assert_eq!(
            classified_lengths("south-user", south).await,
            vec![ContentLength::Medium]
        );
    }

    #[tokio::test]
    async fn test_status_payload_carries_content_length() {
        let (north, _) = long_note_bodies(80);
        let (worker, _) = worker(MockClient::answering(200, north));
        let outcome = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();

        let (status, payload) = outcome.to_status_payload();
        assert_eq!(status, 200);
        let note = &payload["notes"][0];
        assert_eq!(note["content_length"], "medium");
        assert_eq!(note["note_type"], "review");
        assert!(note.get("title").is_some());
    }

    #[tokio::test]
    async fn test_success_with_empty_list() {
        let (worker, _) = worker(MockClient::answering(200, r#"{"notas": []}"#));
        let outcome = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            RetrievalOutcome::Mapped {
                status: 200,
                payload: MappedPayload::Notes(vec![])
            }
        );
    }

    #[tokio::test]
    async fn test_books_use_tenant_family_mapper() {
        let body = json!({"Libros": [{"Id": 1, "Titulo": "Ficciones"}, {"Id": 2}]}).to_string();
        let (worker, _) = worker(MockClient::answering(200, body));

        let outcome = worker
            .execute("south-user", RetrievalRequest::books(QueryParams::new()))
            .await
            .unwrap();

        match outcome {
            RetrievalOutcome::Mapped {
                payload: MappedPayload::Books(books),
                ..
            } => {
                assert_eq!(books.len(), 2);
                assert_eq!(books[0].title.as_deref(), Some("Ficciones"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_params_are_forwarded_verbatim() {
        let (worker, client) = worker(MockClient::answering(200, north_notes_body(0)));
        let params = QueryParams::new().with("author", " ").with("page", "2");

        worker
            .execute("north-user", RetrievalRequest::notes(params.clone()))
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "north");
        assert_eq!(calls[0].1, UpstreamResource::Notes);
        assert_eq!(calls[0].2, params);
    }

    // ==================== Upstream failure ====================

    #[tokio::test]
    async fn test_upstream_error_is_returned_unchanged() {
        let mapper_calls = Arc::new(AtomicUsize::new(0));
        let mappers = MapperRegistry::new().with_mapper(Arc::new(CountingMapper {
            calls: Arc::clone(&mapper_calls),
        }));
        let (worker, _) = worker(MockClient::answering(500, r#"{"error":"message"}"#));
        let worker = worker.with_mappers(mappers);

        let outcome = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RetrievalOutcome::UpstreamError {
                status: 500,
                body: r#"{"error":"message"}"#.to_string()
            }
        );
        assert_eq!(mapper_calls.load(Ordering::SeqCst), 0);

        let (status, payload) = outcome.to_status_payload();
        assert_eq!(status, 500);
        assert_eq!(payload, json!({"error": "message"}));
    }

    #[tokio::test]
    async fn test_mapper_runs_on_success() {
        let mapper_calls = Arc::new(AtomicUsize::new(0));
        let mappers = MapperRegistry::new().with_mapper(Arc::new(CountingMapper {
            calls: Arc::clone(&mapper_calls),
        }));
        let (worker, _) = worker(MockClient::answering(200, north_notes_body(2)));
        let worker = worker.with_mappers(mappers);

        worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();
        assert_eq!(mapper_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_as_text() {
        let (worker, _) = worker(MockClient::answering(503, "Service Unavailable"));
        let outcome = worker
            .execute("south-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();
        assert_eq!(
            outcome.to_status_payload(),
            (503, Value::String("Service Unavailable".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct_from_status() {
        let (worker, _) = worker(MockClient::failing(TransportError::Connection(
            "refused".to_string(),
        )));
        let outcome = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RetrievalOutcome::TransportFailure(TransportError::Connection("refused".to_string()))
        );
        assert_eq!(outcome.upstream_status(), None);
        assert_eq!(outcome.to_status_payload().0, 502);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_upstream_times_out() {
        let client = MockClient::answering(200, north_notes_body(1)).with_delay(Duration::from_secs(60));
        let (worker, _) = worker(client);
        let worker = worker.with_config(WorkerConfig::default().with_timeout(Duration::from_secs(1)));

        let outcome = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap();

        assert_eq!(outcome, RetrievalOutcome::TransportFailure(TransportError::Timeout));
        assert_eq!(outcome.to_status_payload().0, 504);
    }

    // ==================== Error channel ====================

    #[tokio::test]
    async fn test_unknown_owner_fails_before_calling_upstream() {
        let (worker, client) = worker(MockClient::answering(200, north_notes_body(1)));
        let err = worker
            .execute("stranger", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap_err();
        assert_eq!(err, RetrievalError::UnknownTenant("stranger".to_string()));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unregistered_family_is_unknown_tenant() {
        let (worker, client) = worker(MockClient::answering(200, north_notes_body(1)));
        let worker = worker.with_mappers(MapperRegistry::new());
        let err = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::UnknownTenant(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed_payload() {
        // North answer handed to a south tenant
        let (worker, _) = worker(MockClient::answering(200, north_notes_body(2)));
        let err = worker
            .execute("south-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::MalformedUpstreamPayload { ref tenant, .. } if tenant == "south"
        ));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_malformed_payload() {
        let (worker, _) = worker(MockClient::answering(200, "<html>ok</html>"));
        let err = worker
            .execute("north-user", RetrievalRequest::notes(QueryParams::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::MalformedUpstreamPayload { .. }));
    }

    // ==================== Progress ====================

    #[tokio::test]
    async fn test_progress_phases_on_success() {
        let (worker, _) = worker(MockClient::answering(200, north_notes_body(1)));
        let progress = RecordingProgress::default();
        worker
            .execute_with_progress(
                "north-user",
                RetrievalRequest::notes(QueryParams::new()),
                &progress,
            )
            .await
            .unwrap();
        assert_eq!(
            *progress.phases.lock().unwrap(),
            vec![
                RetrievalPhase::Dispatched,
                RetrievalPhase::UpstreamSuccess,
                RetrievalPhase::Mapped
            ]
        );
    }

    #[tokio::test]
    async fn test_progress_phases_on_failure() {
        let (worker, _) = worker(MockClient::answering(404, "{}"));
        let progress = RecordingProgress::default();
        worker
            .execute_with_progress(
                "north-user",
                RetrievalRequest::notes(QueryParams::new()),
                &progress,
            )
            .await
            .unwrap();
        let phases = progress.phases.lock().unwrap();
        assert_eq!(
            *phases,
            vec![
                RetrievalPhase::Dispatched,
                RetrievalPhase::UpstreamFailure,
                RetrievalPhase::Reported
            ]
        );
        assert!(phases.last().unwrap().is_terminal());
    }
}
