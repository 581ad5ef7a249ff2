use api::{ApiClient, ApiError, SearchMode, SearchQuery, SearchService, ServiceStatus, StatsReport};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_health_without_flags() {
    let app = Router::new().route("/health", get(|| async { Json(json!({"status": "healthy"})) }));
    let client = ApiClient::new(&serve(app).await).unwrap();

    let health = client.check_health().await.unwrap();
    assert!(health.elasticsearch_up && health.mysql_up && health.openai_up);
    assert_eq!(health.status, ServiceStatus::Ok);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let app = Router::new().route(
        "/api/health",
        get(|| async { Json(json!({"status": "degraded", "mysql": true})) }),
    );
    let base = format!("{}/api", serve(app).await);
    let client = ApiClient::new(&base).unwrap();

    let health = client.check_health().await.unwrap();
    assert_eq!(health.status, ServiceStatus::Warning);
    assert!(health.mysql_up);
    assert!(!health.elasticsearch_up);
}

type Captured = Arc<Mutex<Option<Value>>>;

async fn query_handler(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].clone();
    *captured.lock().unwrap() = Some(body);
    Json(json!({
        "success": true,
        "query": query,
        "mode": "keyword",
        "total": 1,
        "search_time_ms": 35,
        "documents": [{
            "doc_id": "5f1c2a9e-0000",
            "doc_number": "ECN-2024-001",
            "doc_type": "ECN_NOTICE",
            "file_name": "ECN-2024-001.pdf",
            "summary": "更換馬達供應商",
            "score": 12.5,
            "highlight": {"summary": ["更換<em>馬達</em>供應商"]},
            "index_name": "erp-ecn"
        }],
        "metadata": {"mysql_hits": 1}
    }))
}

#[tokio::test]
async fn test_submit_query_round_trip() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/query", post(query_handler))
        .with_state(captured.clone());
    let client = ApiClient::new(&serve(app).await).unwrap();

    let query = SearchQuery::new(" 馬達 ").with_mode(SearchMode::Keyword).with_result_count(5);
    let response = client.submit_query(&query).await.unwrap();

    let sent = captured.lock().unwrap().clone().unwrap();
    assert_eq!(sent["query"], "馬達");
    assert_eq!(sent["mode"], "keyword");
    assert_eq!(sent["top_k"], 5);
    assert!(sent["doc_type_filter"].is_null());
    assert!(sent.as_object().unwrap().contains_key("department"));

    assert!(response.success);
    assert_eq!(response.total_hits, 1);
    assert_eq!(response.processing_time_ms, 35);
    let doc = &response.sources[0];
    assert_eq!(doc.number, "ECN-2024-001");
    assert_eq!(doc.searchable_content, "更換<em>馬達</em>供應商");
    assert_eq!(doc.source_index, "erp-ecn");
    assert_eq!(response.metadata.mysql_hits, 1);
}

#[tokio::test]
async fn test_request_error_carries_status_and_detail() {
    let app = Router::new().route(
        "/query",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "Elasticsearch 連線失敗"})),
            )
        }),
    );
    let client = ApiClient::new(&serve(app).await).unwrap();

    let err = client.submit_query(&SearchQuery::new("x")).await.unwrap_err();
    match &err {
        ApiError::Request(failure) => {
            assert_eq!(failure.status, 500);
            assert_eq!(failure.path, "/query");
            assert_eq!(failure.detail.as_deref(), Some("Elasticsearch 連線失敗"));
        }
        other => panic!("expected a request error, got {other:?}"),
    }
    assert!(err.to_string().contains("(500)"));
}

#[tokio::test]
async fn test_success_status_with_non_json_body() {
    let app = Router::new().route("/stats", get(|| async { "plain text" }));
    let client = ApiClient::new(&serve(app).await).unwrap();

    let err = client.fetch_stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_stats_failure_payload_passed_through() {
    let app = Router::new().route(
        "/stats",
        get(|| async { Json(json!({"success": false, "error": "es down"})) }),
    );
    let client = ApiClient::new(&serve(app).await).unwrap();

    let report = client.fetch_stats().await.unwrap();
    assert_eq!(report, StatsReport::Raw(json!({"success": false, "error": "es down"})));
}

async fn document_handler(Path(id): Path<String>) -> impl IntoResponse {
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "文件不存在"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "document": {"doc_id": id},
            "related_documents": ["ECN-2"]
        })),
    )
}

#[tokio::test]
async fn test_fetch_document_encodes_id() {
    let app = Router::new().route("/document/{id}", get(document_handler));
    let client = ApiClient::new(&serve(app).await).unwrap();

    let detail = client.fetch_document("ECN 001").await.unwrap();
    assert_eq!(detail.document(), Some(&json!({"doc_id": "ECN 001"})));
    assert_eq!(detail.related_documents(), ["ECN-2"]);
}

#[tokio::test]
async fn test_fetch_documents_drops_failures() {
    let app = Router::new().route("/document/{id}", get(document_handler));
    let client = ApiClient::new(&serve(app).await).unwrap();

    let ids = vec!["a1".to_string(), "missing".to_string(), "b2".to_string()];
    let documents = client.fetch_documents(&ids).await.unwrap();
    assert_eq!(documents, vec![json!({"doc_id": "a1"}), json!({"doc_id": "b2"})]);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}")).unwrap();
    let err = client.check_health().await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_ping_root() {
    let app = Router::new().route("/", get(|| async { Json(json!({"status": "running"})) }));
    let client = ApiClient::new(&serve(app).await).unwrap();

    assert_eq!(client.ping_root().await.unwrap()["status"], "running");
}
