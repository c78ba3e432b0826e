//! Integration tests for the classifier, competitor suggester and evaluation
//! loop using wiremock HTTP mocks.

use std::time::Duration;

use radar_core::{Classification, Record};
use radar_sentiment::{
    evaluate_records, ChatClient, ClassificationRequest, CompetitorCache, CompetitorSuggester,
    SentimentClassifier, SentimentError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS: &str = "/api/v1/chat/completions";

fn test_client(server: &MockServer) -> ChatClient {
    ChatClient::with_base_url("test-key", "test/model", 5, &format!("{}{COMPLETIONS}", server.uri()))
        .expect("client construction should not fail")
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "gen-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn request<'a>(question: &'a str, answer: &'a str, mentioned: bool) -> ClassificationRequest<'a> {
    ClassificationRequest {
        brand: "Betfair",
        question,
        answer,
        mentioned,
    }
}

#[tokio::test]
async fn classify_parses_fenced_json() {
    let server = MockServer::start().await;
    let content = "```json\n{\"classification\": \"CRITICAL\", \"reason\": \"Recomienda Bet365\", \
        \"triggers_detected\": [{\"trigger\": \"mejor Bet365\", \"type\": \"CRITICAL\", \
        \"context\": \"Mejor Bet365\", \"reason\": \"Alternativa\"}], \
        \"psychological_impact\": \"El usuario elegirá Bet365.\"}\n```";

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "test/model", "max_tokens": 800})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = SentimentClassifier::new(test_client(&server));
    let result = classifier
        .classify(&request("¿Es fiable Betfair?", "Mejor Bet365.", true))
        .await;

    assert_eq!(result.classification, Classification::Critical);
    assert_eq!(result.reason, "Recomienda Bet365");
    assert_eq!(result.triggers.len(), 1);
    assert_eq!(result.psychological_impact, "El usuario elegirá Bet365.");
}

#[tokio::test]
async fn absent_brand_prompt_carries_question_polarity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(body_string_contains("NOT being mentioned is POSITIVE (OPPORTUNITY)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "{\"classification\": \"OPPORTUNITY\", \"reason\": \"Not among sites to avoid\", \
             \"triggers_detected\": [{\"trigger\": \"x\", \"type\": \"WARNING\"}], \
             \"psychological_impact\": \"\"}",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = SentimentClassifier::new(test_client(&server));
    let result = classifier
        .classify(&request(
            "What should I avoid when choosing a bookmaker?",
            "Avoid unlicensed sites with slow payouts.",
            false,
        ))
        .await;

    assert_eq!(result.classification, Classification::Opportunity);
    assert!(result.triggers.is_empty());
}

#[tokio::test]
async fn free_text_reply_uses_keyword_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Classification: critical. The answer discourages it.")),
        )
        .mount(&server)
        .await;

    let classifier = SentimentClassifier::new(test_client(&server));
    let result = classifier.classify(&request("q", "a", true)).await;

    assert_eq!(result.classification, Classification::Critical);
    assert!(result.reason.is_empty());
    assert!(result.psychological_impact.is_empty());
}

#[tokio::test]
async fn server_error_yields_api_error_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = SentimentClassifier::new(test_client(&server));
    let err = classifier
        .try_classify(&request("q", "a", true))
        .await
        .expect_err("502 should be an error");
    assert!(matches!(err, SentimentError::UnexpectedStatus { status: 502 }));

    let result = classifier.classify(&request("q", "a", true)).await;
    assert_eq!(result.classification, Classification::Warning);
    assert_eq!(result.reason, "API error");
    assert!(result.triggers.is_empty());
    assert!(result.psychological_impact.is_empty());
}

#[tokio::test]
async fn timeout_yields_api_error_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{\"classification\": \"OPPORTUNITY\"}"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client =
        ChatClient::with_base_url("test-key", "test/model", 1, &format!("{}{COMPLETIONS}", server.uri()))
            .expect("client construction should not fail");
    let classifier = SentimentClassifier::new(client);

    let err = classifier
        .try_classify(&request("q", "a", true))
        .await
        .expect_err("slow response should time out");
    assert!(matches!(err, SentimentError::Http(ref e) if e.is_timeout()));

    let result = classifier.classify(&request("q", "a", true)).await;
    assert_eq!(result.classification, Classification::Warning);
    assert_eq!(result.reason, "API error");
    assert!(result.triggers.is_empty());
}

#[tokio::test]
async fn malformed_body_yields_api_error_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let classifier = SentimentClassifier::new(test_client(&server));
    let err = classifier
        .try_classify(&request("q", "a", true))
        .await
        .expect_err("html body should not parse");
    assert!(matches!(err, SentimentError::Deserialize { .. }));
    assert_eq!(
        classifier.classify(&request("q", "a", true)).await.reason,
        "API error"
    );
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.complete("hi", 0.0, 10).await.expect_err("no choices");
    assert!(matches!(err, SentimentError::EmptyCompletion));
}

#[tokio::test]
async fn evaluate_records_writes_verdicts_and_counts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(body_string_contains("IMPORTANT CONTEXT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "{\"classification\": \"CRITICAL\", \"reason\": \"Absent\", \"triggers_detected\": [], \
             \"psychological_impact\": \"\"}",
        )))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "{\"classification\": \"OPPORTUNITY\", \"reason\": \"Recommended\", \
             \"triggers_detected\": [], \"psychological_impact\": \"Positive.\"}",
        )))
        .mount(&server)
        .await;

    let mut mentioned = Record::new("Is Betfair good?", "Betfair is excellent.");
    mentioned.mention = Some(true);
    let mut records = vec![
        mentioned,
        Record::new("Is Betfair good?", "Bet365 is excellent."),
    ];

    let classifier = SentimentClassifier::new(test_client(&server));
    let stats = evaluate_records(&classifier, "Betfair", &mut records, Duration::ZERO).await;

    assert_eq!(records[0].classification, Some(Classification::Opportunity));
    assert_eq!(records[0].classification_reason.as_deref(), Some("Recommended"));
    assert_eq!(records[0].triggers_detected, Some(vec![]));
    assert_eq!(records[1].classification, Some(Classification::Critical));

    assert_eq!(stats.total, 2);
    assert_eq!(stats.opportunity, 1);
    assert_eq!(stats.critical, 1);
    assert_eq!(stats.no_mention, 1);
    assert_eq!(stats.no_mention_critical, 1);
}

#[tokio::test]
async fn competitor_suggestions_are_parsed_and_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(body_string_contains("main competitors of Acme in the betting market in Spain"))
        .and(body_partial_json(json!({"max_tokens": 500})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "Bet365\n- Codere\n1. Sportium\nAcme\nNote: these are popular",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut suggester = CompetitorSuggester::new(Some(test_client(&server)), CompetitorCache::new());
    let first = suggester.suggest("Acme", "betting", "Spain").await;
    let second = suggester.suggest("ACME", "Betting", "spain").await;

    assert_eq!(first, vec!["Bet365", "Codere"]);
    assert_eq!(second, first);
    assert_eq!(suggester.cache().len(), 1);
}

#[tokio::test]
async fn failed_suggestion_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let mut suggester = CompetitorSuggester::new(Some(test_client(&server)), CompetitorCache::new());
    assert!(suggester.suggest("Acme", "betting", "Spain").await.is_empty());
    assert!(suggester.suggest("Acme", "betting", "Spain").await.is_empty());
    assert!(suggester.cache().is_empty());
}
