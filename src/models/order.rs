//! Order form state and its layered fallback sources.

use chrono::NaiveDate;

use models::{
    AddressDetails, BranchId, CartValue, CompanyId, DivisionId, ProductDetail, TagSelection, UserSelection, VolumeDiscountDetails,
};

/// Header fields the user edits on the overview step. Every field is a
/// patch: absent means "keep whatever the order already had".
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverviewValues {
    pub reference_number: Option<String>,
    pub comment: Option<String>,
    pub users: Option<Vec<Option<UserSelection>>>,
    pub tags: Option<Vec<Option<TagSelection>>>,
    pub division_id: Option<DivisionId>,
    pub order_type: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
}

/// One order detail as fetched from the backend. The first element of
/// `InitialOrderValues::order_details` backs every field the form has not
/// overridden.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub reference_number: Option<String>,
    pub comment: Option<String>,
    pub users: Option<Vec<Option<UserSelection>>>,
    pub tags: Option<Vec<Option<TagSelection>>>,
    pub division_id: Option<DivisionId>,
    pub order_type: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
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
    pub cart_value: Option<CartValue>,
}

/// Server-fetched original order, the ultimate fallback source.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InitialOrderValues {
    #[serde(default)]
    pub order_details: Vec<OrderSnapshot>,
}

impl InitialOrderValues {
    pub fn first_order_detail(&self) -> Option<&OrderSnapshot> {
        self.order_details.first()
    }
}

/// Current authoritative form/cart state.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormValues {
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
    /// Whether the transaction crosses a tax jurisdiction boundary; picks
    /// the tax breakup for every line item of the order.
    #[serde(default)]
    pub is_inter: bool,
    #[serde(default, rename = "VDapplied")]
    pub vd_applied: bool,
    #[serde(rename = "VDDetails")]
    pub vd_details: Option<VolumeDiscountDetails>,
    #[serde(default)]
    pub cart_value: CartValue,
    #[serde(default)]
    pub db_product_details: Vec<ProductDetail>,
    #[serde(default)]
    pub removed_db_product_details: Vec<ProductDetail>,
}
