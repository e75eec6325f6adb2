use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use pdf_qa::{ChunkingConfig, DocumentProcessor, GeminiConfig, GeminiService, QaChain};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorded {
    prompts: Arc<Mutex<Vec<String>>>,
}

async fn generate_ok(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    recorded.prompts.lock().unwrap().push(prompt);

    Json(json!({
        "candidates": [{ "content": { "parts": [{ "text": "Apples grow in the orchard." }] } }]
    }))
}

async fn generate_failing() -> (StatusCode, &'static str) {
    (StatusCode::TOO_MANY_REQUESTS, "quota exhausted")
}

async fn spawn_mock_gemini(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn gemini(base_url: String) -> Arc<GeminiService> {
    Arc::new(GeminiService::new(GeminiConfig {
        api_key: "test-key".to_string(),
        model: "gemini-test".to_string(),
        base_url,
    }))
}

fn orchard_chain(gemini_service: Arc<GeminiService>) -> QaChain {
    let text = "Apples grow in the orchard behind the farmhouse. \
                The river floods every spring and reaches the old mill. \
                Taxes are filed at the town hall in April.";
    let document = DocumentProcessor::with_config(ChunkingConfig {
        chunk_size: 60,
        overlap: 5,
    })
    .process_text("farm.pdf", text)
    .unwrap();

    QaChain::build(document, gemini_service).with_top_k(1)
}

#[tokio::test]
async fn invoke_sends_best_chunk_and_question_to_generator() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/models/:model", post(generate_ok))
        .with_state(recorded.clone());
    let base_url = spawn_mock_gemini(app).await;

    let chain = orchard_chain(gemini(base_url));
    assert!(chain.chunk_count() >= 3);

    let answer = chain.invoke("Where do apples grow?").await.unwrap();
    assert_eq!(answer, "Apples grow in the orchard.");

    let prompts = recorded.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Apples grow in the orchard behind the farmhouse."));
    assert!(!prompts[0].contains("town hall"));
    assert!(prompts[0].contains("Question: Where do apples grow?"));
}

#[tokio::test]
async fn retrieve_ranks_matching_chunk_first() {
    let chain = orchard_chain(gemini("http://127.0.0.1:1".to_string())).with_top_k(3);

    let results = chain.retrieve("When are taxes filed at the town hall?");
    assert_eq!(results.len(), 3);
    assert!(results[0].chunk.content.contains("town hall"));
    assert!(results[0].score >= results[1].score);
}

#[tokio::test]
async fn generator_error_status_is_reported() {
    let app = Router::new().route("/models/:model", post(generate_failing));
    let base_url = spawn_mock_gemini(app).await;

    let chain = orchard_chain(gemini(base_url));
    let err = chain.invoke("Where do apples grow?").await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("429"));
    assert!(message.contains("quota exhausted"));
}
