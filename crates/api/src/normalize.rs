//! Backend vocabulary → client vocabulary.
//!
//! The backend has renamed fields over time (`total` vs `total_hits`,
//! `issue_date` vs `date`, ...) and leaves most of them optional. Everything is
//! read from a loosely typed [`Value`] so a malformed field degrades to its
//! fallback instead of failing the whole response.

use crate::model::{
    DocumentDetail, HealthStatus, HighlightField, Highlights, IndexStats, PREVIEW_FIELD,
    SearchMetadata, SearchQuery, SearchResponse, ServiceStatus, SourceDocument, StatsReport,
};
use serde_json::Value;

pub const UNCLASSIFIED_DOC_TYPE: &str = "未分類";
pub const UNNAMED_FILE: &str = "未命名文件";
pub const UNKNOWN_INDEX: &str = "unknown";

const FRAGMENT_SEPARATOR: &str = " ... ";

// ===== Field readers =====

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty string field; numbers are accepted and stringified
fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

fn text_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(single) => scalar_text(single).into_iter().collect(),
        None => Vec::new(),
    }
}

fn flag(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

fn count(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn real(value: &Value, key: &str) -> Option<f64> {
    let parsed = match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn counts(value: &Value, key: &str) -> Vec<(String, u64)> {
    match value.get(key) {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, n)| {
                let n = n
                    .as_u64()
                    .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                    .unwrap_or(0);
                (name.clone(), n)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn highlights(value: &Value) -> Highlights {
    let Some(Value::Object(map)) = value.get("highlight") else {
        return Highlights::default();
    };

    map.iter()
        .map(|(field, fragments)| {
            let fragments = match fragments {
                Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
                other => scalar_text(other).into_iter().collect(),
            };
            HighlightField {
                field: field.clone(),
                fragments,
            }
        })
        .collect()
}

// ===== Health =====

/// Explicit booleans win; without them every subsystem follows the overall
/// status string.
pub fn normalize_health(data: &Value) -> HealthStatus {
    let status = data.get("status").and_then(Value::as_str).unwrap_or_default();
    let healthy = status == "healthy";

    HealthStatus {
        elasticsearch_up: flag(data, "elasticsearch").unwrap_or(healthy),
        mysql_up: flag(data, "mysql").unwrap_or(healthy),
        openai_up: flag(data, "openai").unwrap_or(healthy),
        status: match status {
            "healthy" => ServiceStatus::Ok,
            "degraded" => ServiceStatus::Warning,
            _ => ServiceStatus::Error,
        },
        indices: text_list(data, "indices"),
        timestamp: text(data, "timestamp"),
    }
}

// ===== Stats =====

pub fn normalize_stats(data: Value) -> StatsReport {
    let stats = data.get("stats").filter(|s| s.is_object());
    match (flag(&data, "success"), stats) {
        (Some(true), Some(stats)) => StatsReport::Normalized(IndexStats {
            total_documents: count(stats, "total_documents").unwrap_or(0),
            index_counts: counts(stats, "index_counts"),
            timestamp: text(&data, "timestamp"),
        }),
        _ => StatsReport::Raw(data),
    }
}

// ===== Query =====

/// Preview highlight, then the first highlight field with fragments, then the
/// summary.
fn searchable_content(highlights: &Highlights, summary: &str) -> String {
    if let Some(preview) = highlights.get(PREVIEW_FIELD).filter(|f| !f.is_empty()) {
        return preview.join(FRAGMENT_SEPARATOR);
    }
    if let Some(first) = highlights.first_non_empty(&[]) {
        return first.fragments.join(FRAGMENT_SEPARATOR);
    }
    summary.to_string()
}

/// Total mapping of one backend document record
pub fn map_document(doc: &Value) -> SourceDocument {
    let highlights = highlights(doc);
    let summary = text(doc, "summary").unwrap_or_default();
    let raw_title = text(doc, "title");
    let raw_file_name = text(doc, "file_name");

    SourceDocument {
        id: text(doc, "doc_id").unwrap_or_default(),
        number: text(doc, "doc_number").unwrap_or_default(),
        doc_type: text(doc, "doc_type").unwrap_or_else(|| UNCLASSIFIED_DOC_TYPE.to_string()),
        file_name: raw_file_name
            .clone()
            .or_else(|| raw_title.clone())
            .unwrap_or_else(|| UNNAMED_FILE.to_string()),
        file_url: text(doc, "file_url").unwrap_or_default(),
        title: raw_title.or(raw_file_name).unwrap_or_default(),
        searchable_content: searchable_content(&highlights, &summary),
        summary,
        date: text(doc, "issue_date").unwrap_or_default(),
        department: text(doc, "department").unwrap_or_default(),
        applicant: text(doc, "applicant").unwrap_or_default(),
        product_codes: text_list(doc, "product_codes"),
        keywords: text_list(doc, "keywords"),
        score: real(doc, "score").unwrap_or(0.0),
        highlights,
        source_index: text(doc, "index_name").unwrap_or_else(|| UNKNOWN_INDEX.to_string()),
        complaint_description: text(doc, "complaint_description").unwrap_or_default(),
        change_description: text(doc, "change_description").unwrap_or_default(),
        failure_mode: text(doc, "failure_mode").unwrap_or_default(),
    }
}

fn map_metadata(data: &Value) -> SearchMetadata {
    let Some(meta) = data.get("metadata").filter(|m| m.is_object()) else {
        return SearchMetadata::default();
    };

    SearchMetadata {
        mysql_hits: count(meta, "mysql_hits").unwrap_or(0),
        product_ids_found: text_list(meta, "product_ids_found"),
        keywords_used: text_list(meta, "keywords_used"),
        indices_searched: text(meta, "indices_searched").unwrap_or_default(),
        index_distribution: counts(meta, "index_distribution"),
    }
}

/// Map a `/query` answer. `sent` supplies the fallbacks for the echoed query
/// and mode.
pub fn map_query_response(data: &Value, sent: &SearchQuery) -> SearchResponse {
    let sources: Vec<SourceDocument> = match data.get("documents") {
        Some(Value::Array(docs)) => docs.iter().filter(|d| d.is_object()).map(map_document).collect(),
        _ => Vec::new(),
    };

    SearchResponse {
        success: flag(data, "success").unwrap_or(false),
        query: text(data, "query").unwrap_or_else(|| sent.text.trim().to_string()),
        mode: text(data, "mode").unwrap_or_else(|| sent.mode.to_string()),
        total_hits: count(data, "total").unwrap_or(sources.len() as u64),
        processing_time_ms: count(data, "search_time_ms").unwrap_or(0),
        answer: text(data, "gpt_response"),
        sources,
        metadata: map_metadata(data),
    }
}

// ===== Document =====

pub fn normalize_document(data: Value) -> DocumentDetail {
    let found = flag(&data, "success") == Some(true)
        && data.get("document").is_some_and(|d| !d.is_null());
    if !found {
        return DocumentDetail::Raw(data);
    }

    let related_documents = text_list(&data, "related_documents");
    match data {
        Value::Object(mut map) => DocumentDetail::Found {
            document: map.remove("document").unwrap_or(Value::Null),
            related_documents,
        },
        other => DocumentDetail::Raw(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SearchMode;
    use rstest::rstest;
    use serde_json::json;

    // ==================== health ====================

    #[rstest]
    #[case(json!({"status": "healthy"}), true, ServiceStatus::Ok)]
    #[case(json!({"status": "degraded"}), false, ServiceStatus::Warning)]
    #[case(json!({"status": "unhealthy", "error": "boom"}), false, ServiceStatus::Error)]
    #[case(json!({}), false, ServiceStatus::Error)]
    fn test_health_derived_from_status(
        #[case] payload: Value,
        #[case] subsystems_up: bool,
        #[case] expected: ServiceStatus,
    ) {
        let health = normalize_health(&payload);
        assert_eq!(health.elasticsearch_up, subsystems_up);
        assert_eq!(health.mysql_up, subsystems_up);
        assert_eq!(health.openai_up, subsystems_up);
        assert_eq!(health.status, expected);
        assert!(health.indices.is_empty());
    }

    #[test]
    fn test_health_explicit_flags_win() {
        let health = normalize_health(&json!({
            "status": "degraded",
            "elasticsearch": true,
            "mysql": false,
            "openai": true,
            "indices": ["erp-ecn", "erp-fmea"],
            "timestamp": "2025-01-01T00:00:00"
        }));
        assert!(health.elasticsearch_up);
        assert!(!health.mysql_up);
        assert!(health.openai_up);
        assert_eq!(health.status, ServiceStatus::Warning);
        assert_eq!(health.indices, vec!["erp-ecn", "erp-fmea"]);
        assert_eq!(health.timestamp.as_deref(), Some("2025-01-01T00:00:00"));
    }

    // ==================== stats ====================

    #[test]
    fn test_stats_normalized_on_success() {
        let report = normalize_stats(json!({
            "success": true,
            "stats": {"total_documents": 42, "index_counts": {"erp-ecn": 40, "erp-fmea": 2}},
            "timestamp": "now"
        }));
        let stats = report.stats().expect("normalized");
        assert_eq!(stats.total_documents, 42);
        assert_eq!(
            stats.index_counts,
            vec![("erp-ecn".to_string(), 40), ("erp-fmea".to_string(), 2)]
        );
    }

    #[rstest]
    #[case(json!({"success": false, "error": "es down"}))]
    #[case(json!({"stats": {"total_documents": 3}}))]
    #[case(json!({"success": true}))]
    fn test_stats_passed_through_without_success(#[case] payload: Value) {
        let report = normalize_stats(payload.clone());
        assert!(!report.is_success());
        assert_eq!(report, StatsReport::Raw(payload));
    }

    // ==================== documents ====================

    #[test]
    fn test_document_fallbacks_for_empty_record() {
        let doc = map_document(&json!({}));
        assert_eq!(doc.id, "");
        assert_eq!(doc.number, "");
        assert_eq!(doc.doc_type, UNCLASSIFIED_DOC_TYPE);
        assert_eq!(doc.file_name, UNNAMED_FILE);
        assert_eq!(doc.title, "");
        assert_eq!(doc.searchable_content, "");
        assert_eq!(doc.score, 0.0);
        assert_eq!(doc.source_index, UNKNOWN_INDEX);
        assert!(doc.product_codes.is_empty());
        assert!(doc.highlights.is_empty());
    }

    #[test]
    fn test_document_fallbacks_for_malformed_fields() {
        let doc = map_document(&json!({
            "doc_id": null,
            "doc_number": 1234,
            "doc_type": "",
            "title": ["not", "a", "string"],
            "file_name": "ECN-001.pdf",
            "summary": {"nested": true},
            "product_codes": "P-01",
            "keywords": [1, null, "閥門"],
            "score": "0.75",
            "highlight": "oops",
            "index_name": false
        }));
        assert_eq!(doc.id, "");
        assert_eq!(doc.number, "1234");
        assert_eq!(doc.doc_type, UNCLASSIFIED_DOC_TYPE);
        assert_eq!(doc.file_name, "ECN-001.pdf");
        assert_eq!(doc.title, "ECN-001.pdf");
        assert_eq!(doc.summary, "");
        assert_eq!(doc.product_codes, vec!["P-01"]);
        assert_eq!(doc.keywords, vec!["1", "閥門"]);
        assert_eq!(doc.score, 0.75);
        assert!(doc.highlights.is_empty());
        assert_eq!(doc.source_index, UNKNOWN_INDEX);
    }

    #[test]
    fn test_file_name_falls_back_to_title() {
        let doc = map_document(&json!({"title": "馬達規格"}));
        assert_eq!(doc.file_name, "馬達規格");
        assert_eq!(doc.title, "馬達規格");
    }

    #[rstest]
    #[case::preview_first(
        json!({"summary": "s", "highlight": {"title": ["t"], "_searchable_preview": ["p1", "p2"]}}),
        "p1 ... p2"
    )]
    #[case::first_non_empty(
        json!({"summary": "s", "highlight": {"title": [], "summary": ["<em>x</em>"]}}),
        "<em>x</em>"
    )]
    #[case::summary(json!({"summary": "plain", "highlight": {}}), "plain")]
    fn test_searchable_content_selection(#[case] payload: Value, #[case] expected: &str) {
        assert_eq!(map_document(&payload).searchable_content, expected);
    }

    #[test]
    fn test_highlight_order_is_preserved() {
        let doc = map_document(&json!({
            "highlight": {"zeta": ["z"], "alpha": ["a"]}
        }));
        let fields: Vec<_> = doc.highlights.iter().map(|h| h.field.as_str()).collect();
        assert_eq!(fields, vec!["zeta", "alpha"]);
        assert_eq!(doc.searchable_content, "z");
    }

    // ==================== query ====================

    #[test]
    fn test_empty_result_set() {
        let sent = SearchQuery::new("不存在的零件");
        let response = map_query_response(
            &json!({"success": true, "query": "不存在的零件", "mode": "hybrid",
                    "total": 0, "documents": [], "search_time_ms": 12}),
            &sent,
        );
        assert!(response.success);
        assert_eq!(response.total_hits, 0);
        assert!(response.sources.is_empty());
        assert!(response.has_no_results());
        assert_eq!(response.processing_time_ms, 12);
        assert_eq!(response.answer, None);
    }

    #[test]
    fn test_query_response_mapping() {
        let sent = SearchQuery::new(" 閥門 ").with_mode(SearchMode::Keyword);
        let response = map_query_response(
            &json!({
                "success": true,
                "total": 7,
                "gpt_response": "【結論】\n- 更換閥門",
                "documents": [
                    {"doc_id": "a1", "doc_number": "ECN-1", "issue_date": "2024-05-01", "index_name": "erp-ecn"},
                    "garbage",
                    {"doc_id": "b2"}
                ],
                "metadata": {"mysql_hits": 2, "keywords_used": ["閥門"], "index_distribution": {"erp-ecn": 1}}
            }),
            &sent,
        );
        assert_eq!(response.query, "閥門");
        assert_eq!(response.mode, "keyword");
        assert_eq!(response.total_hits, 7);
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].date, "2024-05-01");
        assert_eq!(response.sources[0].source_index, "erp-ecn");
        assert_eq!(response.answer.as_deref(), Some("【結論】\n- 更換閥門"));
        assert_eq!(response.metadata.mysql_hits, 2);
        assert_eq!(response.metadata.keywords_used, vec!["閥門"]);
        assert_eq!(response.metadata.indices_searched, "");
        assert_eq!(response.metadata.index_distribution, vec![("erp-ecn".to_string(), 1)]);
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let response = map_query_response(&json!({"documents": []}), &SearchQuery::new("x"));
        assert!(!response.success);
        assert_eq!(response.total_hits, 0);
        assert_eq!(response.mode, "hybrid");
    }

    // ==================== document detail ====================

    #[test]
    fn test_document_detail_found() {
        let detail = normalize_document(json!({
            "success": true,
            "document": {"doc_id": "a1"},
            "related_documents": ["ECN-2", "ECN-3"]
        }));
        assert_eq!(detail.document(), Some(&json!({"doc_id": "a1"})));
        assert_eq!(detail.related_documents(), ["ECN-2", "ECN-3"]);
    }

    #[test]
    fn test_document_detail_raw_without_document() {
        let payload = json!({"success": true, "document": null});
        assert_eq!(normalize_document(payload.clone()), DocumentDetail::Raw(payload));
    }
}
