//! Tests for the gateway module: validation order, error mapping, and the
//! multipart scoring flow exercised end to end against the router.

use axum::{Router, body::Body, http::Request, http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use shortlist::extract::PdfExtractor;
use shortlist::offload::WorkerPool;
use shortlist::scoring::{KeywordScorer, KeywordTaxonomy};

use super::SHORTLIST_STATUS_HEADER;
use super::create_router_with_state;
use super::error::GatewayError;
use super::state::HandlerState;

const TEST_MAX_SIZE_BYTES: u64 = 256 * 1024;
const BOUNDARY: &str = "shortlist-test-boundary";

fn test_state(max_size_bytes: u64) -> HandlerState {
    HandlerState::new(
        Arc::new(WorkerPool::new(2).expect("pool")),
        Arc::new(PdfExtractor::new()),
        Arc::new(KeywordScorer::new(KeywordTaxonomy::default_categories())),
        max_size_bytes,
    )
}

fn test_router() -> Router {
    create_router_with_state(test_state(TEST_MAX_SIZE_BYTES))
}

/// Builds a one-page PDF that draws `text`.
fn pdf_with_text(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let operations = if text.is_empty() {
        vec![]
    } else {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    };
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize pdf");
    buffer
}

fn multipart_body(field: &str, filename: &str, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(filename: &str, payload: &[u8]) -> Request<Body> {
    upload_request_with_field("file", filename, payload)
}

fn upload_request_with_field(field: &str, filename: &str, payload: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, payload)))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

fn status_header(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(SHORTLIST_STATUS_HEADER)
        .expect("status header present")
        .to_str()
        .unwrap()
        .to_string()
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let router = test_router();

        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(status_header(&response), "healthy");

        let body = response_json(response).await;
        assert_eq!(body["status"], "healthy");
    }
}

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_wrong_extension() {
        let router = test_router();

        let response = router
            .oneshot(upload_request("resume.txt", b"whatever"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "invalid_format");

        let body = response_json(response).await;
        assert_eq!(body["code"], 400);
        assert!(body["error"].as_str().unwrap().contains(".pdf"));
    }

    #[tokio::test]
    async fn test_extension_check_is_case_insensitive() {
        let router = test_router();
        let pdf = pdf_with_text("python");

        let response = router
            .oneshot(upload_request("RESUME.PDF", &pdf))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_empty_payload() {
        let router = test_router();

        let response = router.oneshot(upload_request("resume.pdf", b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "empty_payload");
    }

    #[tokio::test]
    async fn test_rejects_missing_document_part() {
        let router = test_router();

        let response = router
            .oneshot(upload_request_with_field("attachment", "resume.pdf", b"data"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "empty_payload");
    }

    #[tokio::test]
    async fn test_payload_at_exact_limit_is_accepted() {
        let pdf = pdf_with_text("python");
        let router = create_router_with_state(test_state(pdf.len() as u64));

        let response = router.oneshot(upload_request("resume.pdf", &pdf)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(status_header(&response), "scored");
    }

    #[tokio::test]
    async fn test_payload_one_byte_over_limit_is_rejected() {
        let pdf = pdf_with_text("python");
        let router = create_router_with_state(test_state(pdf.len() as u64 - 1));

        let response = router.oneshot(upload_request("resume.pdf", &pdf)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(status_header(&response), "payload_too_large");

        let body = response_json(response).await;
        assert_eq!(body["code"], 413);
    }

    #[tokio::test]
    async fn test_rejects_non_pdf_bytes() {
        let router = test_router();

        let response = router
            .oneshot(upload_request("resume.pdf", b"plain text pretending to be a pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "malformed_document");
    }

    #[tokio::test]
    async fn test_rejects_pdf_without_text() {
        let router = test_router();
        let pdf = pdf_with_text("");

        let response = router.oneshot(upload_request("blank.pdf", &pdf)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_header(&response), "no_extractable_text");
    }
}

mod scoring_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_scores_document_with_known_text() {
        let router = test_router();
        let pdf = pdf_with_text(
            "I have experience in python and machine learning research with statistics",
        );

        let response = router.oneshot(upload_request("resume.pdf", &pdf)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(status_header(&response), "scored");

        let body = response_json(response).await;
        let score = body["score"].as_f64().expect("score is a number");
        assert!((score - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unrelated_text_scores_zero() {
        let router = test_router();
        let pdf = pdf_with_text("a quiet afternoon of gardening and birdwatching");

        let response = router.oneshot(upload_request("hobby.pdf", &pdf)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["score"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_resubmission_yields_identical_score() {
        let router = test_router();
        let pdf = pdf_with_text("deep learning research with tensorflow");

        let first = router
            .clone()
            .oneshot(upload_request("resume.pdf", &pdf))
            .await
            .unwrap();
        let second = router.oneshot(upload_request("resume.pdf", &pdf)).await.unwrap();

        let first_score = response_json(first).await["score"].as_f64().unwrap();
        let second_score = response_json(second).await["score"].as_f64().unwrap();
        assert_eq!(first_score, second_score);
    }

    /// One more concurrent upload than the pool has workers: all requests
    /// must complete with correct, uncrossed results.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_uploads_beyond_pool_capacity() {
        let router = test_router();

        let python_pdf = pdf_with_text("python");
        let zero_pdf = pdf_with_text("nothing relevant at all");

        let requests = vec![
            (python_pdf.clone(), 5.0),
            (zero_pdf, 0.0),
            (python_pdf, 5.0),
        ];

        let futures = requests.into_iter().map(|(pdf, expected)| {
            let router = router.clone();
            async move {
                let response = router.oneshot(upload_request("doc.pdf", &pdf)).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                let score = response_json(response).await["score"].as_f64().unwrap();
                assert!((score - expected).abs() < 1e-9);
            }
        });

        futures::future::join_all(futures).await;
    }
}

mod error_handling_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_format_response() {
        let err = GatewayError::InvalidFormat("only .pdf documents are supported".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "invalid_format");

        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains(".pdf"));
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_empty_payload_response() {
        let err = GatewayError::EmptyPayload("uploaded document is empty".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "empty_payload");
    }

    #[tokio::test]
    async fn test_payload_too_large_response() {
        let err = GatewayError::PayloadTooLarge {
            actual: 6_000_000,
            limit: 5_242_880,
        };
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(status_header(&response), "payload_too_large");

        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("6000000"));
    }

    #[tokio::test]
    async fn test_malformed_document_response() {
        let err = GatewayError::MalformedDocument("missing %PDF signature".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(status_header(&response), "malformed_document");
    }

    #[tokio::test]
    async fn test_no_extractable_text_response() {
        let err = GatewayError::NoExtractableText;
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_header(&response), "no_extractable_text");
    }

    #[tokio::test]
    async fn test_internal_processing_error_response() {
        let err = GatewayError::InternalProcessingError("offloaded job did not complete".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_header(&response), "internal_error");
    }

    #[test]
    fn test_extract_error_mapping() {
        use shortlist::extract::ExtractError;

        let mapped: GatewayError = ExtractError::MalformedDocument {
            reason: "no pages".to_string(),
        }
        .into();
        assert!(matches!(mapped, GatewayError::MalformedDocument(_)));

        let mapped: GatewayError = ExtractError::NoExtractableText.into();
        assert!(matches!(mapped, GatewayError::NoExtractableText));
    }

    #[test]
    fn test_offload_error_mapping() {
        use shortlist::offload::OffloadError;

        let mapped: GatewayError = OffloadError::PoolClosed.into();
        assert!(matches!(mapped, GatewayError::InternalProcessingError(_)));
    }
}
