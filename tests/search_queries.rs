extern crate env_logger;
#[macro_use]
extern crate serde_json;
extern crate storefront_lib;

use storefront_lib::config::Config;
use storefront_lib::errors::Error;
use storefront_lib::models::{BrowseOptions, CategoryId, QueryType};
use storefront_lib::services::search::{ProductSearchService, ProductSearchServiceImpl};

fn service() -> ProductSearchServiceImpl {
    let _ = env_logger::try_init();
    let config = Config::new().unwrap();
    ProductSearchServiceImpl::new(config.search)
}

#[test]
fn product_search_query_shape_holds_for_any_text() {
    let service = service();
    for text in ["drill", "m12 fuel", "3/4\" socket", "деталь"].iter() {
        let query = service.build_product_search_query(text).unwrap();
        let bool_query = &query["query"]["bool"];

        assert_eq!(bool_query["must"], json!([{ "term": { "is_published": 1 } }]), "case: {}", text);
        assert_eq!(bool_query["should"].as_array().unwrap().len(), 4, "case: {}", text);
        assert_eq!(bool_query["minimum_should_match"], json!(1), "case: {}", text);

        let must_not = bool_query["must_not"].as_array().unwrap();
        assert!(must_not.contains(&json!({ "term": { "is_internal": 1 } })), "case: {}", text);
        assert!(
            must_not.iter().any(|clause| !clause["terms"]["index_name.keyword"].is_null()),
            "case: {}",
            text
        );
    }
}

#[test]
fn empty_search_text_is_a_validation_failure() {
    match service().build_product_search_query("") {
        Err(Error::Validate(_)) => {}
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn special_characters_are_escaped_in_the_query_string_clause() {
    let query = service().build_product_search_query("a+b:c/d").unwrap();
    let first_should = &query["query"]["bool"]["should"][0];
    assert_eq!(first_should["query_string"]["query"], json!("a\\+b\\:c\\/d"));

    // The typing-oriented clauses keep the raw text
    assert_eq!(query["query"]["bool"]["should"][1]["multi_match"]["query"], json!("a+b:c/d"));
}

#[test]
fn category_pagination_and_term_selection() {
    let service = service();
    let options = BrowseOptions {
        page: 2,
        page_size: Some(10),
        ..BrowseOptions::default()
    };

    let query = service.build_category_query(&[CategoryId(5)], &options);
    assert_eq!(query["from"], json!(10));
    assert_eq!(query["size"], json!(10));
    let nested = &query["query"]["bool"]["must"][1]["nested"];
    assert_eq!(nested["query"]["term"]["categories.category_id"], json!(5));
    assert!(nested["query"]["terms"].is_null());

    let query = service.build_category_query(&[CategoryId(5), CategoryId(6)], &options);
    let nested = &query["query"]["bool"]["must"][1]["nested"];
    assert_eq!(nested["query"]["terms"]["categories.category_id"], json!([5, 6]));
}

#[test]
fn filters_merge_as_term_or_terms() {
    let service = service();
    let mut options = BrowseOptions::default();
    options.filters.insert("material".to_string(), vec![json!("steel")]);
    options.filters.insert("finish".to_string(), vec![json!("matte"), json!("gloss")]);
    options.catalog_codes = vec!["CAT-1".to_string()];

    let query = service.build_brand_query("DEWALT", &options);
    let must = query["query"]["bool"]["must"].as_array().unwrap();

    assert!(must.contains(&json!({ "term": { "brand_name.keyword": "DEWALT" } })));
    assert!(must.contains(&json!({ "term": { "material": "steel" } })));
    assert!(must.contains(&json!({ "terms": { "finish": ["matte", "gloss"] } })));
    assert!(must.contains(&json!({ "terms": { "catalog_code": ["CAT-1"] } })));
}

#[test]
fn browse_queries_omit_should_and_minimum_should_match() {
    let query = service().build_category_query(&[CategoryId(5)], &BrowseOptions::default());
    assert!(query["query"]["bool"]["should"].is_null());
    assert!(query["query"]["bool"]["minimum_should_match"].is_null());
}

#[test]
fn slug_dispatch_matches_direct_builders() {
    let service = service();
    let options = BrowseOptions::default();

    assert_eq!(
        service.build_query_from_slug("b_DEWALT", &options),
        Some(service.build_brand_query("DEWALT", &options))
    );
    assert_eq!(
        service.build_query_from_slug("c_12", &options),
        Some(service.build_category_query(&[CategoryId(12)], &options))
    );
    assert_eq!(service.build_query_from_slug("zz_123", &options), None);
}

#[test]
fn category_brand_query_carries_both_constraints() {
    let service = service();
    let options = BrowseOptions::default();

    let query = service.build_category_brand_query(&[CategoryId(7)], "Bosch", &options);
    let must = query["query"]["bool"]["must"].as_array().unwrap();
    assert!(must.contains(&json!({ "term": { "brand_name.keyword": "Bosch" } })));
    assert!(must.iter().any(|clause| !clause["nested"].is_null()));
}

#[test]
fn proxy_envelopes_use_the_configured_index() {
    let service = service();

    let search = service.search_request(json!({ "size": 1 }));
    assert_eq!(search.query_type, QueryType::Search);
    let wire = serde_json::to_value(&search).unwrap();
    assert_eq!(wire["Elasticindex"], json!("products"));
    assert_eq!(wire["ElasticType"], json!("_doc"));
    assert_eq!(wire["queryType"], json!("search"));
    assert_eq!(wire["ElasticBody"], json!({ "size": 1 }));

    let get = service.get_request("41");
    assert_eq!(get.query_type, QueryType::Get);
    let wire = serde_json::to_value(&get).unwrap();
    assert_eq!(wire["queryType"], json!("get"));
    assert_eq!(wire["ElasticBody"], json!({ "id": "41" }));
}
