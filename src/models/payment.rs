//! Canonical order/quote submission payload and its input bundle.

use chrono::NaiveDate;

use models::{
    AccountOwnerId, AddressDetails, BranchId, BundleProduct, BusinessUnitId, CartValue, CompanyId, DiscountDetails, DivisionId,
    InitialOrderValues, OrderFormValues, OverviewValues, PreviousVersionTotals, ProductId, TagId, TaxLine, UserId, WarehouseId,
};

/// Everything payload assembly needs, bundled the way the submit handler
/// hands it over.
#[derive(Debug, Clone, Default)]
pub struct PaymentPayloadParams {
    /// Current authoritative form/cart state
    pub values: OrderFormValues,
    /// Patch carrying the user-edited header fields
    pub overview_values: OverviewValues,
    /// Totals of the prior version, present only for versioned orders
    pub previous_version_details: Option<PreviousVersionTotals>,
    /// Server-fetched original order
    pub initial_values: Option<InitialOrderValues>,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    /// Amount already paid against this order
    pub total_paid: f64,
    pub is_reorder: bool,
}

/// Flattened line item as submitted to the backend.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub moq: Option<u32>,
    pub spr_applied: Option<bool>,
    pub spr_remarks: Option<String>,
    pub line_no: Option<i32>,
    pub item_no: Option<i32>,
    pub volume_discount_applied: bool,
    /// Breakup chosen from the inter/intra pair by the order-level flag
    pub product_taxes: Vec<TaxLine>,
    pub product_discounts: Vec<DiscountDetails>,
    pub bundle_products: Vec<BundleProduct>,
    pub account_owner_id: Option<AccountOwnerId>,
    pub account_owner_name: Option<String>,
    pub business_unit_id: Option<BusinessUnitId>,
    pub business_unit_name: Option<String>,
    pub division_id: Option<DivisionId>,
    pub division_name: Option<String>,
    pub ware_house_id: Option<WarehouseId>,
    pub ware_house_name: Option<String>,
}

/// Canonical order/quote submission body. Constructed fresh on every
/// submit action and never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderPaymentPayload {
    pub buyer_company_id: Option<CompanyId>,
    pub buyer_company_name: Option<String>,
    pub seller_company_id: Option<CompanyId>,
    pub seller_company_name: Option<String>,
    pub buyer_branch_id: Option<BranchId>,
    pub seller_branch_id: Option<BranchId>,
    pub billing_address_details: Option<AddressDetails>,
    pub shipping_address_details: Option<AddressDetails>,
    pub register_address_details: Option<AddressDetails>,
    pub seller_address_details: Option<AddressDetails>,
    pub payment_terms: Option<String>,
    pub delivery_terms: Option<String>,
    pub freight_terms: Option<String>,
    pub insurance_terms: Option<String>,
    pub warranty_terms: Option<String>,
    pub reference_number: Option<String>,
    pub comment: Option<String>,
    pub order_type: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub division_id: Option<DivisionId>,
    pub users: Vec<UserId>,
    pub tags: Vec<TagId>,
    pub is_inter: bool,
    pub db_product_details: Vec<ProductPayload>,
    pub sub_total: f64,
    pub overall_tax: f64,
    pub taxable_amount: f64,
    pub calculated_total: f64,
    pub grand_total: f64,
    pub cart_value: CartValue,
    pub total_paid: f64,
    #[serde(rename = "versionLevelVolumeDisscount")]
    pub version_level_volume_discount: bool,
    pub modified_by_username: String,
}
