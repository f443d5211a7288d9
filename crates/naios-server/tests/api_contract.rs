use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use naios_ai::ScriptedModel;
use naios_server::{AppState, EnvReport, build_router};
use naios_store::{
    MemoryStore, NewProducer, ProducerRow, ProducerStore, ProducerUpdate, StoreError,
    TranslationRow,
};
use serde_json::{Value, json};
use uuid::Uuid;

async fn spawn(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(naios_server::serve(listener, state, std::future::pending()));
    format!("http://{addr}")
}

fn enrichment_reply() -> String {
    json!({
        "translations": {
            "en": "We produce extra virgin olive oil from Koroneiki olives.",
            "de": "Wir produzieren natives Olivenöl extra.",
            "fr": "Nous produisons de l'huile d'olive extra vierge.",
            "it": "Produciamo olio extravergine di oliva.",
            "es": "Producimos aceite de oliva virgen extra.",
            "pt": "Produzimos azeite extra virgem."
        },
        "storytelling": {
            "en": "Four generations among the olive groves of Crete.",
            "de": "Vier Generationen in den Olivenhainen Kretas.",
            "fr": "Quatre générations dans les oliveraies de Crète."
        },
        "keywords": ["olive oil", " organic ", "Crete"],
        "category": "Artisan Food"
    })
    .to_string()
}

fn submission() -> Value {
    json!({
        "name": "Manolis Estate",
        "location": "Rethymno, Crete",
        "productType": "Olive Oil",
        "sourceLanguage": "el",
        "description": "Παράγουμε εξαιρετικό παρθένο ελαιόλαδο από ελιές Κορωνέικη."
    })
}

async fn create_producer(client: &reqwest::Client, base: &str) -> Value {
    let resp = client
        .post(format!("{base}/api/process-producer"))
        .json(&submission())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn missing_fields_are_rejected_before_any_work() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::default());
    let base = spawn(AppState::new(store.clone(), model.clone())).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/process-producer"))
        .json(&json!({"name": "Manolis Estate", "location": "Rethymno"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Missing required fields: name, location, description, sourceLanguage"
    );
    assert_eq!(model.calls(), 0);
    assert_eq!(store.producer_count(), 0);
}

#[tokio::test]
async fn unknown_language_and_bad_json_are_client_errors() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::default());
    let base = spawn(AppState::new(store.clone(), model.clone())).await;
    let client = reqwest::Client::new();

    let mut body = submission();
    body["sourceLanguage"] = json!("nl");
    let resp = client
        .post(format!("{base}/api/process-producer"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/api/process-producer"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn create_stores_all_seven_languages() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::new([enrichment_reply()]));
    let base = spawn(AppState::new(store.clone(), model.clone())).await;

    let body = create_producer(&reqwest::Client::new(), &base).await;
    let translations = body["translations"].as_object().unwrap();
    assert_eq!(translations.len(), 7);
    assert_eq!(
        body["translations"]["el"],
        submission()["description"],
        "source text is stored verbatim"
    );
    assert_eq!(body["original"]["name"], "Manolis Estate");
    assert_eq!(body["keywords"], json!(["olive oil", "organic", "Crete"]));
    assert_eq!(body["category"], "Artisan Food");
    assert!(Uuid::parse_str(body["producer_id"].as_str().unwrap()).is_ok());

    assert_eq!(model.calls(), 1);
    assert_eq!(store.producer_count(), 1);
    assert_eq!(store.translation_count(), 7);
}

#[tokio::test]
async fn created_profile_reads_back() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::new([enrichment_reply()]));
    let base = spawn(AppState::new(store, model)).await;
    let client = reqwest::Client::new();

    let created = create_producer(&client, &base).await;
    let id = created["producer_id"].as_str().unwrap();

    let fetched: Value = client
        .get(format!("{base}/api/producers/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["original"]["name"], "Manolis Estate");
    assert_eq!(fetched["original"]["location"], "Rethymno, Crete");
    assert_eq!(fetched["original"]["productType"], "Olive Oil");
    assert_eq!(fetched["original"]["sourceLanguage"], "el");
    assert_eq!(fetched["translations"], created["translations"]);
    assert_eq!(fetched["storytelling"]["en"], created["storytelling"]["en"]);
}

#[tokio::test]
async fn unknown_producer_is_not_found() {
    let base = spawn(AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedModel::default()),
    ))
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/producers/{}", Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Producer not found");

    let resp = client
        .patch(format!("{base}/api/producers/{}", Uuid::new_v4()))
        .json(&json!({"name": "Renamed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn patch_updates_base_fields() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::new([enrichment_reply()]));
    let base = spawn(AppState::new(store, model.clone())).await;
    let client = reqwest::Client::new();

    let created = create_producer(&client, &base).await;
    let id = created["producer_id"].as_str().unwrap();

    let resp = client
        .patch(format!("{base}/api/producers/{id}"))
        .json(&json!({"location": "Chania, Crete"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["original"]["location"], "Chania, Crete");
    assert_eq!(body["original"]["name"], "Manolis Estate");
    assert_eq!(model.calls(), 1);

    let resp = client
        .patch(format!("{base}/api/producers/{id}"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn patched_description_is_the_source_translation() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::new([enrichment_reply()]));
    let base = spawn(AppState::new(store, model)).await;
    let client = reqwest::Client::new();

    let created = create_producer(&client, &base).await;
    let id = created["producer_id"].as_str().unwrap();

    let resp = client
        .patch(format!("{base}/api/producers/{id}"))
        .json(&json!({"description": "Νέα περιγραφή"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let patched: Value = resp.json().await.unwrap();
    assert_eq!(patched["translations"]["el"], "Νέα περιγραφή");

    let fetched: Value = client
        .get(format!("{base}/api/producers/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["original"]["description"], "Νέα περιγραφή");
    assert_eq!(
        fetched["translations"]["el"],
        fetched["original"]["description"]
    );
    assert_eq!(fetched["translations"]["en"], created["translations"]["en"]);
}

#[tokio::test]
async fn malformed_id_is_a_json_client_error() {
    let base = spawn(AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedModel::default()),
    ))
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/producers/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let resp = client
        .patch(format!("{base}/api/producers/not-a-uuid"))
        .json(&json!({"name": "Renamed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn match_returns_at_most_three_ranked_producers() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::default());
    for _ in 0..4 {
        model.push_reply(enrichment_reply());
    }
    model.push_reply(
        json!({
            "matches": [
                {"producerIndex": 2, "score": 140, "reasoning": "Strong fit",
                 "locationFit": 90, "productFit": 95, "qualityFit": 88},
                {"producerIndex": 0, "score": 81, "reasoning": "Good",
                 "locationFit": 70, "productFit": 85, "qualityFit": 80},
                {"producerIndex": 3, "score": 75, "reasoning": "Fair",
                 "locationFit": 60, "productFit": 70, "qualityFit": 75},
                {"producerIndex": 1, "score": 60, "reasoning": "Weak",
                 "locationFit": 50, "productFit": 55, "qualityFit": 60}
            ]
        })
        .to_string(),
    );
    let base = spawn(AppState::new(store, model.clone())).await;
    let client = reqwest::Client::new();
    for _ in 0..4 {
        create_producer(&client, &base).await;
    }

    let resp = client
        .post(format!("{base}/api/match-buyers"))
        .json(&json!({"query": {"query": "organic olive oil for a Berlin deli"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 3);
    for m in matches {
        assert!(m["score"].as_u64().unwrap() <= 100);
        assert_eq!(m["producer"]["original"]["name"], "Manolis Estate");
    }
    assert_eq!(matches[0]["score"], 100);
    assert_eq!(matches[0]["fitAnalysis"]["productFit"], 95);
    assert_eq!(model.calls(), 5);
}

#[tokio::test]
async fn match_without_query_is_rejected() {
    let model = Arc::new(ScriptedModel::default());
    let base = spawn(AppState::new(Arc::new(MemoryStore::new()), model.clone())).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/match-buyers"))
        .json(&json!({"query": {"location": "Berlin"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing search query");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn match_with_no_producers_is_empty() {
    let model = Arc::new(ScriptedModel::default());
    let base = spawn(AppState::new(Arc::new(MemoryStore::new()), model.clone())).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{base}/api/match-buyers"))
        .json(&json!({"query": {"query": "thyme honey"}}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["matches"], json!([]));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn model_failure_is_a_server_error() {
    let store = Arc::new(MemoryStore::new());
    let model = Arc::new(ScriptedModel::failing(429, "rate limited"));
    let base = spawn(AppState::new(store.clone(), model)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/process-producer"))
        .json(&submission())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to process producer");
    assert!(body["details"].as_str().unwrap().contains("429"));
    assert_eq!(store.producer_count(), 0);
}

/// Rejects producer inserts and counts translation inserts.
#[derive(Default)]
struct RejectingStore {
    translation_inserts: AtomicUsize,
}

#[async_trait]
impl ProducerStore for RejectingStore {
    async fn insert_producer(&self, _: &NewProducer) -> Result<ProducerRow, StoreError> {
        Err(StoreError::Server {
            status: 409,
            body: "duplicate key".into(),
        })
    }

    async fn insert_translation(&self, _: &TranslationRow) -> Result<(), StoreError> {
        self.translation_inserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_producers(&self) -> Result<Vec<ProducerRow>, StoreError> {
        Err(StoreError::Other("offline".into()))
    }

    async fn get_producer(&self, _: Uuid) -> Result<Option<ProducerRow>, StoreError> {
        Ok(None)
    }

    async fn translations_for(&self, _: Uuid) -> Result<Vec<TranslationRow>, StoreError> {
        Ok(Vec::new())
    }

    async fn update_producer(
        &self,
        _: Uuid,
        _: &ProducerUpdate,
    ) -> Result<Option<ProducerRow>, StoreError> {
        Ok(None)
    }

    async fn reachable_tables(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Other("connection refused".into()))
    }
}

#[tokio::test]
async fn failed_producer_insert_skips_translations() {
    let store = Arc::new(RejectingStore::default());
    let model = Arc::new(ScriptedModel::new([enrichment_reply()]));
    let base = spawn(AppState::new(store.clone(), model)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/process-producer"))
        .json(&submission())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to save producer");
    assert_eq!(store.translation_inserts.load(Ordering::SeqCst), 0);
}

/// Stores producers in memory but rejects translation rows for one language.
struct FlakyTranslations {
    inner: MemoryStore,
    reject: &'static str,
    attempts: AtomicUsize,
}

impl FlakyTranslations {
    fn rejecting(reject: &'static str) -> Self {
        Self {
            inner: MemoryStore::new(),
            reject,
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProducerStore for FlakyTranslations {
    async fn insert_producer(&self, producer: &NewProducer) -> Result<ProducerRow, StoreError> {
        self.inner.insert_producer(producer).await
    }

    async fn insert_translation(&self, row: &TranslationRow) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if row.language == self.reject {
            return Err(StoreError::Server {
                status: 400,
                body: "value too long".into(),
            });
        }
        self.inner.insert_translation(row).await
    }

    async fn list_producers(&self) -> Result<Vec<ProducerRow>, StoreError> {
        self.inner.list_producers().await
    }

    async fn get_producer(&self, id: Uuid) -> Result<Option<ProducerRow>, StoreError> {
        self.inner.get_producer(id).await
    }

    async fn translations_for(&self, id: Uuid) -> Result<Vec<TranslationRow>, StoreError> {
        self.inner.translations_for(id).await
    }

    async fn update_producer(
        &self,
        id: Uuid,
        update: &ProducerUpdate,
    ) -> Result<Option<ProducerRow>, StoreError> {
        self.inner.update_producer(id, update).await
    }

    async fn reachable_tables(&self) -> Result<Vec<String>, StoreError> {
        self.inner.reachable_tables().await
    }
}

#[tokio::test]
async fn failed_translation_rows_are_reported() {
    let store = Arc::new(FlakyTranslations::rejecting("de"));
    let model = Arc::new(ScriptedModel::new([enrichment_reply()]));
    let base = spawn(AppState::new(store.clone(), model)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/process-producer"))
        .json(&submission())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to save translations");

    let rows = store.inner.list_producers().await.unwrap();
    assert_eq!(rows.len(), 1);
    let details = body["details"].as_str().unwrap();
    assert!(details.contains(&rows[0].id.to_string()), "details: {details}");
    assert!(details.contains("de: "), "details: {details}");
    assert!(!details.contains("en: "), "details: {details}");

    assert_eq!(store.attempts.load(Ordering::SeqCst), 7);
    assert_eq!(store.inner.translation_count(), 6);
}

#[tokio::test]
async fn store_outage_surfaces_on_match_and_probe() {
    let base = spawn(AppState::new(
        Arc::new(RejectingStore::default()),
        Arc::new(ScriptedModel::default()),
    ))
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/match-buyers"))
        .json(&json!({"query": {"query": "wine"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch producers");

    let resp = client.get(format!("{base}/api/test-db")).send().await.unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn probe_and_env_report() {
    let env = EnvReport::default()
        .value("NAIOS_STORE", Some("memory"))
        .secret("OPENAI_API_KEY", true);
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedModel::default()),
    )
    .with_env(env);
    let base = spawn(state).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{base}/api/test-db"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["tables"], json!(["producers", "producer_translations"]));

    let body: Value = client
        .get(format!("{base}/api/_env-check"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["NAIOS_STORE"], "memory");
    assert_eq!(body["OPENAI_API_KEY"], "loaded");
}

#[test]
fn router_builds_without_a_listener() {
    let _ = build_router(AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedModel::default()),
    ));
}
