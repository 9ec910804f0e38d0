use serde::{Deserialize, Serialize};

/// Search request body. Extra fields are ignored and `query` may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub similarity: f64,
    pub price: u64,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub results: Vec<SearchHit>,
    pub processing_time: String,
}

const PROCESSING_TIME: &str = "0.15s";

/// Echo `req.query` next to the fixed result list. The query is not matched
/// against anything.
pub fn search(req: SearchRequest) -> SearchResponse {
    SearchResponse {
        query: req.query,
        results: fixed_results(),
        processing_time: PROCESSING_TIME.to_string(),
    }
}

fn fixed_results() -> Vec<SearchHit> {
    vec![
        SearchHit {
            title: "Laptop Gaming RTX 4080".into(),
            similarity: 96.8,
            price: 1299,
            rating: 5,
        },
        SearchHit {
            title: "Workstation Pro Max".into(),
            similarity: 94.2,
            price: 2199,
            rating: 5,
        },
    ]
}
