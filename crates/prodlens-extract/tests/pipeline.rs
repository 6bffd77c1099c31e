//! Integration tests for `Extractor` against wiremock stand-ins for OpenAI
//! and Bright Data.

use prodlens_core::AnalyzeRequest;
use prodlens_extract::{BrightDataClient, ChatClient, ExtractError, Extractor};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCT_URL: &str = "https://www.amazon.com/dp/B0TEST1234";

fn extractor(openai: &MockServer, brightdata: &MockServer, max_steps: u32) -> Extractor {
    let chat = ChatClient::with_base_url("sk-test", "gpt-4o", 30, &openai.uri())
        .expect("chat client construction should not fail");
    let bd = BrightDataClient::with_base_url("bd-test", "gd_test", 30, &brightdata.uri())
        .expect("bright data client construction should not fail");
    Extractor::new(chat, bd, max_steps)
}

fn request() -> AnalyzeRequest {
    AnalyzeRequest {
        url: PRODUCT_URL.to_string(),
        zipcode: Some("10001".to_string()),
    }
}

fn completion(message: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }]
    }))
}

fn tool_call_reply() -> ResponseTemplate {
    completion(json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{
            "id": "call_1",
            "type": "function",
            "function": {
                "name": "amazonProduct",
                "arguments": format!("{{\"url\":\"{PRODUCT_URL}\",\"zipcode\":\"10001\"}}")
            }
        }]
    }))
}

fn text_reply(text: &str) -> ResponseTemplate {
    completion(json!({ "role": "assistant", "content": text }))
}

fn structured_record() -> Value {
    json!({
        "product": {
            "title": "Acme Kettle",
            "imageUrl": "https://m.media-amazon.com/images/I/main.jpg",
            "price": 39.99,
            "currency": "USD",
            "rating": 4.5,
            "totalReviews": 1200
        },
        "pricing": {
            "initialPrice": 49.99,
            "finalPrice": 39.99,
            "discount": "-20%",
            "savings": 10.0,
            "currency": "USD"
        },
        "delivery": [{ "type": "fast", "text": "Fastest delivery Tomorrow" }],
        "specifications": [{ "type": "Brand", "value": "Acme" }]
    })
}

/// Mounts the three OpenAI turns of a normal run: tool call, prose answer,
/// structured output.
async fn mount_happy_openai(openai: &MockServer, structured: &Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"type\":\"json_schema\""))
        .respond_with(text_reply(&structured.to_string()))
        .with_priority(1)
        .mount(openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"role\":\"tool\""))
        .respond_with(text_reply("Acme Kettle, $39.99 (was $49.99), 4.5 stars."))
        .with_priority(2)
        .mount(openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(tool_call_reply())
        .with_priority(3)
        .mount(openai)
        .await;
}

#[tokio::test]
async fn analyze_runs_tool_loop_then_structures_output() {
    let openai = MockServer::start().await;
    let brightdata = MockServer::start().await;
    mount_happy_openai(&openai, &structured_record()).await;

    Mock::given(method("POST"))
        .and(path("/datasets/v3/scrape"))
        .and(query_param("dataset_id", "gd_test"))
        .and(query_param("format", "json"))
        .and(header("authorization", "Bearer bd-test"))
        .and(body_string_contains(PRODUCT_URL))
        .and(body_string_contains("10001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "title": "Acme Kettle", "final_price": 39.99, "currency": "USD" }
        ])))
        .expect(1)
        .mount(&brightdata)
        .await;

    let data = extractor(&openai, &brightdata, 12)
        .analyze(&request())
        .await
        .expect("extraction should succeed");

    let product = data.product.expect("product");
    assert_eq!(product.title.as_deref(), Some("Acme Kettle"));
    assert_eq!(product.total_reviews, Some(1200));
    let pricing = data.pricing.expect("pricing");
    assert_eq!(pricing.discount.as_deref(), Some("-20%"));
    assert_eq!(data.specifications.as_ref().map(Vec::len), Some(1));

    let requests = openai.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["model"], "gpt-4o");
    assert_eq!(first["tools"][0]["function"]["name"], "amazonProduct");
    assert_eq!(
        first["messages"][1]["content"],
        format!("Extract product data for this Amazon URL:\n{PRODUCT_URL}\nZipcode: 10001")
    );
    let last: Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert!(last.get("tools").is_none());
    assert_eq!(
        last["messages"][0]["content"],
        "Output this 'Acme Kettle, $39.99 (was $49.99), 4.5 stars.' to the product analysis schema."
    );
}

#[tokio::test]
async fn brightdata_failure_is_reported_to_the_model() {
    let openai = MockServer::start().await;
    let brightdata = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"type\":\"json_schema\""))
        .respond_with(text_reply("{}"))
        .with_priority(1)
        .mount(&openai)
        .await;

    // Only answers once the tool output carries the error text.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Error fetching Amazon product data"))
        .respond_with(text_reply("The product could not be fetched."))
        .with_priority(2)
        .mount(&openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(tool_call_reply())
        .with_priority(3)
        .mount(&openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/datasets/v3/scrape"))
        .respond_with(ResponseTemplate::new(500).set_body_string("dataset unavailable"))
        .mount(&brightdata)
        .await;

    let data = extractor(&openai, &brightdata, 12)
        .analyze(&request())
        .await
        .expect("tool failure should not abort extraction");
    assert_eq!(data, prodlens_core::ProductAnalysisData::default());
}

#[tokio::test]
async fn openai_error_status_surfaces_provider_message() {
    let openai = MockServer::start().await;
    let brightdata = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&openai)
        .await;

    let err = extractor(&openai, &brightdata, 12)
        .analyze(&request())
        .await
        .unwrap_err();

    match err {
        ExtractError::Upstream {
            service,
            status,
            message,
        } => {
            assert_eq!(service, "openai");
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn endless_tool_calls_hit_the_step_limit() {
    let openai = MockServer::start().await;
    let brightdata = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(tool_call_reply())
        .expect(3)
        .mount(&openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/datasets/v3/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&brightdata)
        .await;

    let err = extractor(&openai, &brightdata, 3)
        .analyze(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::StepLimit { max_steps: 3 }));
}

#[tokio::test]
async fn unparseable_structured_output_is_an_error() {
    let openai = MockServer::start().await;
    let brightdata = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"type\":\"json_schema\""))
        .respond_with(text_reply("not json at all"))
        .with_priority(1)
        .mount(&openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(text_reply("Nothing to fetch."))
        .with_priority(2)
        .mount(&openai)
        .await;

    let err = extractor(&openai, &brightdata, 12)
        .analyze(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::Deserialize { .. }), "{err:?}");
}

#[tokio::test]
async fn out_of_range_rating_fails_validation() {
    let openai = MockServer::start().await;
    let brightdata = MockServer::start().await;

    let mut record = structured_record();
    record["product"]["rating"] = json!(7.5);
    mount_happy_openai(&openai, &record).await;

    Mock::given(method("POST"))
        .and(path("/datasets/v3/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&brightdata)
        .await;

    let err = extractor(&openai, &brightdata, 12)
        .analyze(&request())
        .await
        .unwrap_err();
    match err {
        ExtractError::Schema(violation) => assert_eq!(violation.field, "product.rating"),
        other => panic!("expected schema violation, got {other:?}"),
    }
}
