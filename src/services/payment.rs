//! Payment service, assembles the canonical order/quote submission payload
//! from the layered form state.
//!
//! Assembly is a pure calculation: inputs are reconciled field by field
//! into a fresh payload, with precedence made explicit through `resolve`
//! instead of being implied by expression order.

use models::{
    BundleProduct, OrderPaymentPayload, PaymentPayloadParams, PreviousVersionTotals, ProductDetail, ProductPayload, TagId,
    TagSelection, UserId, UserSelection,
};

/// First defined value among the ordered `sources`.
pub fn resolve<T>(sources: Vec<Option<T>>) -> Option<T> {
    sources.into_iter().filter_map(|source| source).next()
}

/// Normalizes the selection flags of every bundle sub-item to strict 0/1
/// and drops the sub-items the user has not selected. Order-preserving
/// among the kept items.
pub fn normalize_bundle_products(bundles: Vec<BundleProduct>) -> Vec<BundleProduct> {
    bundles
        .into_iter()
        .map(|bundle| BundleProduct {
            bundle_selected: Some(selection_flag(bundle.bundle_selected)),
            is_bundle_selected_fe: Some(selection_flag(bundle.is_bundle_selected_fe)),
            ..bundle
        })
        .filter(|bundle| bundle.is_bundle_selected_fe == Some(1))
        .collect()
}

fn selection_flag(value: Option<i32>) -> i32 {
    if value.unwrap_or(0) != 0 {
        1
    } else {
        0
    }
}

/// Assembles the submission payload.
///
/// Header fields resolve `overview_values` first and fall back to the
/// first fetched order detail; addresses, branch ids and commercial terms
/// resolve from the form state first instead. Totals follow the active
/// pricing path, and a partial payment reduces the cart totals by the
/// previous version's totals when those exist, else by the fetched
/// snapshot's.
pub fn build_order_payment(params: PaymentPayloadParams) -> OrderPaymentPayload {
    let PaymentPayloadParams {
        values,
        overview_values,
        previous_version_details,
        initial_values,
        display_name,
        company_name,
        total_paid,
        is_reorder,
    } = params;

    debug!("Assembling order payment payload, total paid: {}", total_paid);

    let first_order = initial_values.as_ref().and_then(|initial| initial.first_order_detail());

    // Pricing path: volume-discount totals or the plain cart totals,
    // never a mix of the two.
    let (sub_total, overall_tax, taxable_amount, calculated_total) = if values.vd_applied {
        let vd = values.vd_details.clone().unwrap_or_default();
        (vd.sub_total, vd.overall_tax, vd.taxable_amount, vd.calculated_total)
    } else {
        let cart = &values.cart_value;
        (cart.total_value, cart.total_tax, cart.taxable_amount, cart.grand_total)
    };

    let grand_total = if is_reorder { calculated_total } else { calculated_total - total_paid };

    let paid_totals = if !is_reorder && total_paid > 0.0 {
        resolve(vec![
            previous_version_details,
            first_order
                .and_then(|order| order.cart_value.as_ref())
                .map(PreviousVersionTotals::from),
        ])
    } else {
        None
    };
    let cart_value = match paid_totals {
        Some(ref paid) => values.cart_value.minus_paid(paid),
        None => values.cart_value.clone(),
    };

    let removed: &[ProductDetail] = if is_reorder { &[] } else { &values.removed_db_product_details };
    let db_product_details = values
        .db_product_details
        .iter()
        .chain(removed.iter())
        .map(|product| product_payload(product, values.is_inter))
        .collect();

    let version_level_volume_discount = values.db_product_details.iter().any(|product| product.volume_discount_applied);

    let users = resolve(vec![overview_values.users.clone(), first_order.and_then(|order| order.users.clone())]);
    let tags = resolve(vec![overview_values.tags.clone(), first_order.and_then(|order| order.tags.clone())]);

    OrderPaymentPayload {
        buyer_company_id: values.buyer_company_id,
        buyer_company_name: values.buyer_company_name.clone(),
        seller_company_id: values.seller_company_id,
        seller_company_name: values.seller_company_name.clone(),
        buyer_branch_id: resolve(vec![values.buyer_branch_id, first_order.and_then(|order| order.buyer_branch_id)]),
        seller_branch_id: resolve(vec![values.seller_branch_id, first_order.and_then(|order| order.seller_branch_id)]),
        billing_address_details: resolve(vec![
            values.billing_address_details.clone(),
            first_order.and_then(|order| order.billing_address_details.clone()),
        ]),
        shipping_address_details: resolve(vec![
            values.shipping_address_details.clone(),
            first_order.and_then(|order| order.shipping_address_details.clone()),
        ]),
        register_address_details: resolve(vec![
            values.register_address_details.clone(),
            first_order.and_then(|order| order.register_address_details.clone()),
        ]),
        seller_address_details: resolve(vec![
            values.seller_address_details.clone(),
            first_order.and_then(|order| order.seller_address_details.clone()),
        ]),
        payment_terms: resolve(vec![values.payment_terms.clone(), first_order.and_then(|order| order.payment_terms.clone())]),
        delivery_terms: resolve(vec![
            values.delivery_terms.clone(),
            first_order.and_then(|order| order.delivery_terms.clone()),
        ]),
        freight_terms: resolve(vec![values.freight_terms.clone(), first_order.and_then(|order| order.freight_terms.clone())]),
        insurance_terms: resolve(vec![
            values.insurance_terms.clone(),
            first_order.and_then(|order| order.insurance_terms.clone()),
        ]),
        warranty_terms: resolve(vec![
            values.warranty_terms.clone(),
            first_order.and_then(|order| order.warranty_terms.clone()),
        ]),
        reference_number: resolve(vec![
            overview_values.reference_number.clone(),
            first_order.and_then(|order| order.reference_number.clone()),
        ]),
        comment: resolve(vec![overview_values.comment.clone(), first_order.and_then(|order| order.comment.clone())]),
        order_type: resolve(vec![
            overview_values.order_type.clone(),
            first_order.and_then(|order| order.order_type.clone()),
        ]),
        expected_delivery_date: resolve(vec![
            overview_values.expected_delivery_date,
            first_order.and_then(|order| order.expected_delivery_date),
        ]),
        division_id: resolve(vec![overview_values.division_id, first_order.and_then(|order| order.division_id)]),
        users: normalize_users(&users.unwrap_or_default()),
        tags: normalize_tags(&tags.unwrap_or_default()),
        is_inter: values.is_inter,
        db_product_details,
        sub_total,
        overall_tax,
        taxable_amount,
        calculated_total,
        grand_total,
        cart_value,
        total_paid,
        version_level_volume_discount,
        modified_by_username: modified_by(&display_name, &company_name),
    }
}

/// Flattens one line item: nested references become scalar ids/names, the
/// tax breakup is chosen by the order-level flag, and freshly added items
/// lose their line/item numbers.
fn product_payload(product: &ProductDetail, is_inter: bool) -> ProductPayload {
    ProductPayload {
        product_id: product.product_id,
        product_name: product.product_name.clone(),
        quantity: product.quantity,
        unit_price: product.unit_price,
        moq: product.moq,
        spr_applied: product.spr_applied,
        spr_remarks: product.spr_remarks.clone(),
        line_no: if product.is_new { None } else { product.line_no },
        item_no: if product.is_new { None } else { product.item_no },
        volume_discount_applied: product.volume_discount_applied,
        product_taxes: if is_inter {
            product.inter_tax_breakup.clone()
        } else {
            product.intra_tax_breakup.clone()
        },
        product_discounts: product.discount_details.clone().into_iter().collect(),
        bundle_products: normalize_bundle_products(product.bundle_products.clone()),
        account_owner_id: product.account_owner.as_ref().and_then(|owner| owner.id),
        account_owner_name: product.account_owner.as_ref().and_then(|owner| owner.name.clone()),
        business_unit_id: product.business_unit.as_ref().and_then(|unit| unit.id),
        business_unit_name: product.business_unit.as_ref().and_then(|unit| unit.name.clone()),
        division_id: product.division.as_ref().and_then(|division| division.id),
        division_name: product.division.as_ref().and_then(|division| division.name.clone()),
        ware_house_id: product.ware_house.as_ref().and_then(|warehouse| warehouse.id),
        ware_house_name: product.ware_house.as_ref().and_then(|warehouse| warehouse.name.clone()),
    }
}

fn normalize_users(selections: &[Option<UserSelection>]) -> Vec<UserId> {
    selections
        .iter()
        .filter_map(|selection| selection.as_ref().and_then(|selection| selection.user_id()))
        .collect()
}

fn normalize_tags(selections: &[Option<TagSelection>]) -> Vec<TagId> {
    selections
        .iter()
        .filter_map(|selection| selection.as_ref().and_then(|selection| selection.tag_id()))
        .collect()
}

/// `"{display}, {company}"` with the comma and padding dropped when either
/// side is empty.
fn modified_by(display_name: &Option<String>, company_name: &Option<String>) -> String {
    let display = display_name.as_ref().map(|name| name.trim()).unwrap_or("");
    let company = company_name.as_ref().map(|name| name.trim()).unwrap_or("");
    match (display.is_empty(), company.is_empty()) {
        (false, false) => format!("{}, {}", display, company),
        (false, true) => display.to_string(),
        (true, false) => company.to_string(),
        (true, true) => String::new(),
    }
}
