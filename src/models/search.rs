//! Browse parameters and the wire shapes of the search proxy.

use std::collections::BTreeMap;

use enum_iterator::IntoEnumIterator;
use serde_json::Value;

/// Sort order of a browse request, addressed by its wire code.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, IntoEnumIterator)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Relevance,
    PriceAsc,
    PriceDesc,
    FieldAsc,
    FieldDesc,
}

impl SortBy {
    pub fn code(&self) -> u8 {
        match *self {
            SortBy::Relevance => 1,
            SortBy::PriceAsc => 2,
            SortBy::PriceDesc => 3,
            SortBy::FieldAsc => 4,
            SortBy::FieldDesc => 5,
        }
    }

    /// Sort for the given wire code. Unknown codes browse by relevance.
    pub fn from_code(code: u8) -> Self {
        SortBy::into_enum_iter()
            .find(|sort| sort.code() == code)
            .unwrap_or(SortBy::Relevance)
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Relevance
    }
}

/// Parameters of a structured browse request.
///
/// `filters` is an OR-of-values map per field; a `BTreeMap` keeps the
/// produced query documents deterministic for identical inputs.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BrowseOptions {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    pub page_size: Option<u32>,
    /// Raw sort code, resolved through `SortBy::from_code`
    pub sort_by: Option<u8>,
    /// Field name required by the custom-sort codes
    pub sort_by_field: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    pub catalog_codes: Vec<String>,
    #[serde(default)]
    pub equipment_codes: Vec<String>,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        BrowseOptions {
            page: 1,
            page_size: None,
            sort_by: None,
            sort_by_field: None,
            filters: BTreeMap::new(),
            catalog_codes: Vec::new(),
            equipment_codes: Vec::new(),
        }
    }
}

fn default_page() -> u32 {
    1
}

/// Kind of request the search proxy forwards to the cluster.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Search,
    Get,
}

/// Body accepted by the search proxy route.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchRequestEnvelope {
    #[serde(rename = "Elasticindex")]
    pub elastic_index: String,
    #[serde(rename = "ElasticBody")]
    pub elastic_body: Value,
    #[serde(rename = "ElasticType")]
    pub elastic_type: String,
    #[serde(rename = "queryType")]
    pub query_type: QueryType,
}

/// Response shape of a proxied `search` request.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchResponse<T> {
    pub hits: SearchHits<T>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchHits<T> {
    pub hits: Vec<SearchHit<T>>,
    pub total: TotalHits,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchHit<T> {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "_source")]
    pub source: T,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TotalHits {
    pub value: u64,
}

/// Response shape of a proxied `get` (document-by-id) request.
#[derive(Debug, Deserialize, Clone)]
pub struct GetResponse {
    pub body: GetBody,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GetBody {
    pub found: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn test_sort_code_round_trip() {
        for sort in SortBy::into_enum_iter() {
            assert_eq!(SortBy::from_code(sort.code()), sort);
        }
    }

    #[test]
    fn test_unknown_sort_code_falls_back_to_relevance() {
        assert_eq!(SortBy::from_code(0), SortBy::Relevance);
        assert_eq!(SortBy::from_code(6), SortBy::Relevance);
        assert_eq!(SortBy::from_code(255), SortBy::Relevance);
    }

    #[test]
    fn test_search_response_shape() {
        let raw = r#"{
            "hits": {
                "hits": [
                    { "_id": "41", "_source": { "productName": "drill" } }
                ],
                "total": { "value": 1 }
            }
        }"#;
        let response: SearchResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert_eq!(response.hits.total.value, 1);
        assert_eq!(response.hits.hits[0].id.as_ref().unwrap(), "41");
    }

    #[test]
    fn test_get_response_shape() {
        let response: GetResponse = serde_json::from_str(r#"{ "body": { "found": true } }"#).unwrap();
        assert!(response.body.found);
    }
}
