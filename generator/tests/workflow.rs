//! End-to-end submissions against a local Gemini stand-in

use std::time::Duration;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use generator::core::write_artifacts;
use generator::{
    CredentialStore, GeminiProvider, GenerationClient, GenerationForm, GeneratorError, HistoryStore,
    LandingPageGenerator, ProductBrief, ProductCategory, PromptBuilder, RealContentScraper, RealHistoryStore,
    SessionContext, Tone,
};
use shared::{CredentialList, ModelCandidates};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";
const FALLBACK_PATH: &str = "/v1beta/models/gemini-flash-latest:generateContent";

type Generator = LandingPageGenerator<GeminiProvider, RealContentScraper, RealHistoryStore>;

fn build(server: &MockServer, history_path: std::path::PathBuf, defaults: CredentialList) -> Generator {
    LandingPageGenerator::new(
        GenerationClient::new(
            GeminiProvider::new(server.uri(), Duration::from_secs(5)).unwrap(),
            ModelCandidates::default(),
        ),
        RealContentScraper::new().unwrap(),
        RealHistoryStore::new(history_path),
        CredentialStore::new(defaults),
        PromptBuilder::default(),
        Duration::from_secs(5),
    )
}

fn page_reply() -> serde_json::Value {
    let inner = json!({
        "copywriting": {"headline": "Run lighter", "benefits": ["Soft", "Fast"]},
        "html_code": "<!DOCTYPE html><html><body>Run lighter</body></html>"
    });
    json!({
        "candidates": [{"content": {"parts": [{"text": format!("```json\n{inner}\n```")}]}}]
    })
}

#[tokio::test]
async fn test_generation_rotates_to_working_key_and_writes_outputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("key", "dead-key"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "quota exceeded"}})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "live-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_reply()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let generator = build(&server, dir.path().join("history.json"), CredentialList::empty());
    let mut session = SessionContext::new();

    let form = GenerationForm {
        brief: ProductBrief::new("Trail Shoe"),
        tone: Tone::Casual,
        category: ProductCategory::Physical,
        boosters: true,
        competitor_url: None,
        api_keys: vec!["dead-key".to_string(), "live-key".to_string()],
    };

    let page = generator.generate_page(&mut session, form).await.unwrap();

    assert_eq!(page.attempts, 3);
    assert_eq!(page.credential_position, 2);
    assert!(!page.parsed.decode_failed);

    let written = write_artifacts(&page, dir.path()).await.unwrap();
    assert_eq!(written.len(), 2);
    let html = std::fs::read_to_string(dir.path().join("landing_page.html")).unwrap();
    assert!(html.contains("Run lighter"));
    let draft = std::fs::read_to_string(dir.path().join("copywriting.txt")).unwrap();
    assert!(draft.contains("- Soft"));
}

#[tokio::test]
async fn test_competitor_url_recorded_once_and_scraped_into_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rival"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><h1>Rival Mega Headline</h1><script>ignored()</script></body></html>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Rival Mega Headline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_reply()))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    let generator = build(&server, history_path.clone(), CredentialList::from_block("default-key"));
    let mut session = SessionContext::new();
    let rival = format!("{}/rival", server.uri());

    for _ in 0..2 {
        let form = GenerationForm {
            brief: ProductBrief::new("Trail Shoe"),
            competitor_url: Some(rival.clone()),
            ..GenerationForm::default()
        };
        generator.generate_page(&mut session, form).await.unwrap();
    }

    assert_eq!(generator.history.load().await, vec![rival]);
    assert_eq!(generator.competitor_history().await.len(), 1);
}

#[tokio::test]
async fn test_all_keys_failing_reports_exhaustion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    for key in ["a-key", "b-key"] {
        Mock::given(method("POST"))
            .and(path(FALLBACK_PATH))
            .and(query_param("key", key))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": {"message": format!("{key} fallback down")}})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let generator = build(&server, dir.path().join("history.json"), CredentialList::from_block("a-key\nb-key"));
    let mut session = SessionContext::new();

    let result = generator
        .generate_page(
            &mut session,
            GenerationForm {
                brief: ProductBrief::new("Ebook"),
                ..GenerationForm::default()
            },
        )
        .await;

    match result {
        Err(GeneratorError::Exhausted { attempts, last_failure }) => {
            assert_eq!(attempts, 4);
            assert_eq!(last_failure, shared::ApiFailure::ServerError("b-key fallback down".to_string()));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unconfigured_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_reply()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let generator = build(&server, dir.path().join("history.json"), CredentialList::empty());
    let mut session = SessionContext::new();

    let result = generator
        .generate_page(
            &mut session,
            GenerationForm {
                brief: ProductBrief::new("Ebook"),
                ..GenerationForm::default()
            },
        )
        .await;

    assert!(matches!(result, Err(GeneratorError::Unconfigured)));
}
