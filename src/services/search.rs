//! Search service, translates search and browse intents into the boolean
//! query documents the catalog cluster understands.

use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use config::Search;
use errors::Error;
use models::{BrowseOptions, CategoryId, ProductGroupId, QueryType, SearchRequestEnvelope, SortBy};

/// Relative field weights of the escaped free-text clause.
const QUERY_STRING_FIELDS: &'static [&'static str] = &[
    "product_name^15",
    "model_number^12",
    "sku^10",
    "brand_name^8",
    "category_name^6",
    "product_description^2",
];

/// Fields scanned while the user is still typing.
const PHRASE_PREFIX_FIELDS: &'static [&'static str] = &["product_name", "brand_name", "category_name", "model_number"];

/// Category/brand scope of the cross-fields clause.
const CATEGORY_BRAND_FIELDS: &'static [&'static str] = &["category_name", "brand_name"];

/// Fallback scope when none of the boosted clauses fire.
const BEST_FIELDS: &'static [&'static str] = &["product_name", "product_description", "brand_name", "category_name"];

/// Projection returned for result tiles.
const SOURCE_FIELDS: &'static [&'static str] = &[
    "product_id",
    "product_name",
    "slug",
    "brand_name",
    "category_name",
    "unit_price",
    "moq",
    "images",
    "is_published",
];

const QUERY_STRING_BOOST: u32 = 200;
const PHRASE_PREFIX_BOOST: u32 = 190;
const CATEGORY_BRAND_BOOST: u32 = 98;
const CROSS_FIELDS_MINIMUM_MATCH: &'static str = "90%";

/// Characters the query-string syntax assigns meaning to.
const QUERY_STRING_SPECIAL_CHARS: &'static [char] = &[
    '+', '-', '=', '&', '|', '>', '<', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/',
];

pub trait ProductSearchService {
    /// Free-text search across the whole catalog
    fn build_product_search_query(&self, search_text: &str) -> Result<Value, Error>;
    /// Browse the products of one or more categories
    fn build_category_query(&self, category_ids: &[CategoryId], options: &BrowseOptions) -> Value;
    /// Browse the products of a brand
    fn build_brand_query(&self, brand_name: &str, options: &BrowseOptions) -> Value;
    /// Browse a brand within one or more categories
    fn build_category_brand_query(&self, category_ids: &[CategoryId], brand_name: &str, options: &BrowseOptions) -> Value;
    /// Browse a sub category; alias kept for deprecated `s_` slugs
    fn build_sub_category_query(&self, category_ids: &[CategoryId], options: &BrowseOptions) -> Value;
    /// Browse a major category; alias kept for deprecated `m_` slugs
    fn build_major_category_query(&self, category_ids: &[CategoryId], options: &BrowseOptions) -> Value;
    /// Browse a product group
    fn build_product_group_query(&self, group_id: ProductGroupId, options: &BrowseOptions) -> Value;
    /// Dispatch a landing slug to the matching builder, `None` when no
    /// builder applies
    fn build_query_from_slug(&self, slug: &str, options: &BrowseOptions) -> Option<Value>;
    /// Wrap a query document into the proxy body for a `search` call
    fn search_request(&self, body: Value) -> SearchRequestEnvelope;
    /// Proxy body for a document-by-id lookup
    fn get_request(&self, document_id: &str) -> SearchRequestEnvelope;
}

pub struct ProductSearchServiceImpl {
    search_config: Search,
}

impl ProductSearchServiceImpl {
    pub fn new(search_config: Search) -> Self {
        ProductSearchServiceImpl { search_config }
    }

    /// Hygiene exclusions applied to every catalog query.
    fn exclusion_clauses(&self) -> Vec<Value> {
        vec![
            json!({ "term": { "is_internal": 1 } }),
            json!({ "terms": { "index_name.keyword": self.search_config.grouped_product_indexes } }),
        ]
    }

    fn page_size(&self, options: &BrowseOptions) -> u32 {
        match options.page_size {
            Some(size) if size > 0 => size,
            _ => self.search_config.default_page_size,
        }
    }

    /// Shared browse machinery: constraint + merged filters + pagination +
    /// sort around the published/hygiene clauses.
    fn browse_query(&self, constraint: Option<Value>, options: &BrowseOptions) -> Value {
        let page_size = self.page_size(options);
        let page = options.page.max(1);
        let from = (page - 1) * page_size;

        let mut must = vec![json!({ "term": { "is_published": 1 } })];
        if let Some(constraint) = constraint {
            must.push(constraint);
        }
        for (field, values) in &options.filters {
            must.push(field_filter(field, values));
        }
        if !options.catalog_codes.is_empty() {
            must.push(json!({ "terms": { "catalog_code": options.catalog_codes } }));
        }
        if !options.equipment_codes.is_empty() {
            must.push(json!({ "terms": { "equipment_code": options.equipment_codes } }));
        }

        let mut query = json!({
            "size": page_size,
            "from": from,
            "_source": SOURCE_FIELDS,
            "query": {
                "bool": {
                    "must": must,
                    "must_not": self.exclusion_clauses(),
                }
            }
        });
        if let Some(sort) = sort_clause(options) {
            query["sort"] = sort;
        }
        query
    }
}

impl ProductSearchService for ProductSearchServiceImpl {
    fn build_product_search_query(&self, search_text: &str) -> Result<Value, Error> {
        if search_text.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("empty");
            error.message = Some("Search text must not be empty".into());
            errors.add("search_text", error);
            return Err(Error::Validate(errors));
        }

        debug!("Building product search query for \"{}\"", search_text);
        let escaped = escape_query_string(search_text);

        Ok(json!({
            "size": self.search_config.default_page_size,
            "_source": SOURCE_FIELDS,
            "query": {
                "bool": {
                    "must": [
                        { "term": { "is_published": 1 } }
                    ],
                    "should": [
                        {
                            "query_string": {
                                "query": escaped,
                                "fields": QUERY_STRING_FIELDS,
                                "boost": QUERY_STRING_BOOST,
                            }
                        },
                        {
                            "multi_match": {
                                "query": search_text,
                                "type": "phrase_prefix",
                                "fields": PHRASE_PREFIX_FIELDS,
                                "boost": PHRASE_PREFIX_BOOST,
                            }
                        },
                        {
                            "multi_match": {
                                "query": search_text,
                                "type": "cross_fields",
                                "fields": CATEGORY_BRAND_FIELDS,
                                "minimum_should_match": CROSS_FIELDS_MINIMUM_MATCH,
                                "boost": CATEGORY_BRAND_BOOST,
                            }
                        },
                        {
                            "multi_match": {
                                "query": search_text,
                                "type": "best_fields",
                                "fields": BEST_FIELDS,
                            }
                        }
                    ],
                    "must_not": self.exclusion_clauses(),
                    "minimum_should_match": 1,
                }
            }
        }))
    }

    fn build_category_query(&self, category_ids: &[CategoryId], options: &BrowseOptions) -> Value {
        debug!("Building category query for {:?}", category_ids);
        self.browse_query(category_constraint(category_ids), options)
    }

    fn build_brand_query(&self, brand_name: &str, options: &BrowseOptions) -> Value {
        debug!("Building brand query for \"{}\"", brand_name);
        self.browse_query(Some(json!({ "term": { "brand_name.keyword": brand_name } })), options)
    }

    fn build_category_brand_query(&self, category_ids: &[CategoryId], brand_name: &str, options: &BrowseOptions) -> Value {
        let mut query = self.build_category_query(category_ids, options);
        if let Some(must) = query["query"]["bool"]["must"].as_array_mut() {
            must.push(json!({ "term": { "brand_name.keyword": brand_name } }));
        }
        query
    }

    fn build_sub_category_query(&self, category_ids: &[CategoryId], options: &BrowseOptions) -> Value {
        self.build_category_query(category_ids, options)
    }

    fn build_major_category_query(&self, category_ids: &[CategoryId], options: &BrowseOptions) -> Value {
        self.build_category_query(category_ids, options)
    }

    fn build_product_group_query(&self, group_id: ProductGroupId, options: &BrowseOptions) -> Value {
        debug!("Building product group query for {}", group_id);
        self.browse_query(Some(json!({ "term": { "product_group_id": group_id } })), options)
    }

    fn build_query_from_slug(&self, slug: &str, options: &BrowseOptions) -> Option<Value> {
        if slug.starts_with("c_") {
            let id = slug[2..].parse::<CategoryId>().ok()?;
            Some(self.build_category_query(&[id], options))
        } else if slug.starts_with("b_") {
            Some(self.build_brand_query(&slug[2..], options))
        } else if slug.starts_with("pg_") {
            let id = slug[3..].parse::<ProductGroupId>().ok()?;
            Some(self.build_product_group_query(id, options))
        } else if slug.starts_with("m_") {
            // Deprecated slug form
            let id = slug[2..].parse::<CategoryId>().ok()?;
            Some(self.build_major_category_query(&[id], options))
        } else if slug.starts_with("s_") {
            // Deprecated slug form
            let id = slug[2..].parse::<CategoryId>().ok()?;
            Some(self.build_sub_category_query(&[id], options))
        } else {
            None
        }
    }

    fn search_request(&self, body: Value) -> SearchRequestEnvelope {
        SearchRequestEnvelope {
            elastic_index: self.search_config.product_index.clone(),
            elastic_body: body,
            elastic_type: "_doc".to_string(),
            query_type: QueryType::Search,
        }
    }

    fn get_request(&self, document_id: &str) -> SearchRequestEnvelope {
        SearchRequestEnvelope {
            elastic_index: self.search_config.product_index.clone(),
            elastic_body: json!({ "id": document_id }),
            elastic_type: "_doc".to_string(),
            query_type: QueryType::Get,
        }
    }
}

/// Backslash-escapes the characters the query-string syntax reserves.
fn escape_query_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if QUERY_STRING_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Products relate to their categories through nested documents; a single
/// id gets a `term`, several get a `terms`. An empty id list adds no
/// category constraint at all.
fn category_constraint(category_ids: &[CategoryId]) -> Option<Value> {
    let clause = match category_ids.len() {
        0 => return None,
        1 => json!({ "term": { "categories.category_id": category_ids[0] } }),
        _ => json!({ "terms": { "categories.category_id": category_ids } }),
    };
    Some(json!({ "nested": { "path": "categories", "query": clause } }))
}

/// Exact-match filter for one value, IN-list for several.
fn field_filter(field: &str, values: &[Value]) -> Value {
    let mut clause = Map::new();
    if values.len() == 1 {
        clause.insert(field.to_string(), values[0].clone());
        json!({ "term": clause })
    } else {
        clause.insert(field.to_string(), Value::Array(values.to_vec()));
        json!({ "terms": clause })
    }
}

fn sort_clause(options: &BrowseOptions) -> Option<Value> {
    let sort = SortBy::from_code(options.sort_by.unwrap_or(SortBy::Relevance.code()));
    match sort {
        SortBy::Relevance => None,
        SortBy::PriceAsc => Some(json!([{ "unit_price": { "order": "asc" } }])),
        SortBy::PriceDesc => Some(json!([{ "unit_price": { "order": "desc" } }])),
        SortBy::FieldAsc => field_sort(options, "asc"),
        SortBy::FieldDesc => field_sort(options, "desc"),
    }
}

/// Custom sort needs a field name; without one the request browses by
/// relevance.
fn field_sort(options: &BrowseOptions, direction: &str) -> Option<Value> {
    options.sort_by_field.as_ref().map(|field| {
        let mut clause = Map::new();
        clause.insert(field.clone(), json!({ "order": direction }));
        json!([clause])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ProductSearchServiceImpl {
        ProductSearchServiceImpl::new(Search {
            product_index: "products".to_string(),
            grouped_product_indexes: vec!["grouped_products".to_string()],
            default_page_size: 20,
        })
    }

    #[test]
    fn test_escape_query_string() {
        let cases = [
            ("drill", "drill"),
            ("3/4\" socket", "3\\/4\\\" socket"),
            ("a+b-c", "a\\+b\\-c"),
            ("(x:y)", "\\(x\\:y\\)"),
            ("back\\slash", "back\\\\slash"),
            ("wild*card?", "wild\\*card\\?"),
            ("{[^~]}", "\\{\\[\\^\\~\\]\\}"),
            ("a&&b||c", "a\\&\\&b\\|\\|c"),
            ("<>=!", "\\<\\>\\=\\!"),
        ];
        for &(raw, expected) in cases.iter() {
            assert_eq!(escape_query_string(raw), expected, "case: {}", raw);
        }
    }

    #[test]
    fn test_empty_search_text_fails_validation() {
        for text in ["", "   ", "\t\n"].iter() {
            match service().build_product_search_query(text) {
                Err(Error::Validate(_)) => {}
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_search_query_shape() {
        let query = service().build_product_search_query("drill").unwrap();
        assert_eq!(query["query"]["bool"]["must"], json!([{ "term": { "is_published": 1 } }]));
        assert_eq!(query["query"]["bool"]["should"].as_array().unwrap().len(), 4);
        assert_eq!(query["query"]["bool"]["minimum_should_match"], json!(1));
        let must_not = query["query"]["bool"]["must_not"].as_array().unwrap();
        assert_eq!(must_not[0], json!({ "term": { "is_internal": 1 } }));
        assert_eq!(must_not[1], json!({ "terms": { "index_name.keyword": ["grouped_products"] } }));
    }

    #[test]
    fn test_search_boosts_descend() {
        let query = service().build_product_search_query("drill").unwrap();
        let should = query["query"]["bool"]["should"].as_array().unwrap();
        assert_eq!(should[0]["query_string"]["boost"], json!(200));
        assert_eq!(should[1]["multi_match"]["boost"], json!(190));
        assert_eq!(should[2]["multi_match"]["boost"], json!(98));
        assert!(should[3]["multi_match"].get("boost").is_none());
    }

    #[test]
    fn test_single_category_uses_term() {
        let query = service().build_category_query(&[CategoryId(5)], &BrowseOptions::default());
        let nested = &query["query"]["bool"]["must"][1]["nested"];
        assert_eq!(nested["path"], json!("categories"));
        assert_eq!(nested["query"]["term"]["categories.category_id"], json!(5));
    }

    #[test]
    fn test_empty_category_list_adds_no_constraint() {
        let query = service().build_category_query(&[], &BrowseOptions::default());
        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 1);
        assert_eq!(must[0], json!({ "term": { "is_published": 1 } }));
    }

    #[test]
    fn test_several_categories_use_terms() {
        let query = service().build_category_query(&[CategoryId(5), CategoryId(6)], &BrowseOptions::default());
        let nested = &query["query"]["bool"]["must"][1]["nested"];
        assert_eq!(nested["query"]["terms"]["categories.category_id"], json!([5, 6]));
    }

    #[test]
    fn test_pagination_offset() {
        let options = BrowseOptions {
            page: 2,
            page_size: Some(10),
            ..BrowseOptions::default()
        };
        let query = service().build_category_query(&[CategoryId(5)], &options);
        assert_eq!(query["from"], json!(10));
        assert_eq!(query["size"], json!(10));
    }

    #[test]
    fn test_sort_codes() {
        let mut options = BrowseOptions::default();

        options.sort_by = Some(2);
        let query = service().build_brand_query("DEWALT", &options);
        assert_eq!(query["sort"], json!([{ "unit_price": { "order": "asc" } }]));

        options.sort_by = Some(5);
        options.sort_by_field = Some("created_at".to_string());
        let query = service().build_brand_query("DEWALT", &options);
        assert_eq!(query["sort"], json!([{ "created_at": { "order": "desc" } }]));

        // Custom sort without a field browses by relevance
        options.sort_by_field = None;
        let query = service().build_brand_query("DEWALT", &options);
        assert!(query.get("sort").is_none());

        options.sort_by = Some(9);
        let query = service().build_brand_query("DEWALT", &options);
        assert!(query.get("sort").is_none());
    }

    #[test]
    fn test_slug_dispatch() {
        let options = BrowseOptions::default();
        let service = service();

        assert_eq!(
            service.build_query_from_slug("b_DEWALT", &options),
            Some(service.build_brand_query("DEWALT", &options))
        );
        assert_eq!(
            service.build_query_from_slug("c_12", &options),
            Some(service.build_category_query(&[CategoryId(12)], &options))
        );
        assert_eq!(
            service.build_query_from_slug("pg_3", &options),
            Some(service.build_product_group_query(ProductGroupId(3), &options))
        );
        assert_eq!(
            service.build_query_from_slug("m_4", &options),
            Some(service.build_category_query(&[CategoryId(4)], &options))
        );
        assert_eq!(
            service.build_query_from_slug("s_8", &options),
            Some(service.build_category_query(&[CategoryId(8)], &options))
        );
        assert_eq!(service.build_query_from_slug("zz_123", &options), None);
        assert_eq!(service.build_query_from_slug("c_abc", &options), None);
        assert_eq!(service.build_query_from_slug("", &options), None);
    }
}
