//! Catalog line items and the nested references they carry.

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ProductGroupId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DivisionId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WarehouseId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BusinessUnitId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AccountOwnerId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DiscountId(pub i32);

/// Account owner as picked in the line editor.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountOwnerRef {
    pub id: Option<AccountOwnerId>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnitRef {
    pub id: Option<BusinessUnitId>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DivisionRef {
    pub id: Option<DivisionId>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRef {
    pub id: Option<WarehouseId>,
    pub name: Option<String>,
}

/// One component of a precomputed tax breakup.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    pub tax_name: String,
    pub rate: f64,
    pub amount: f64,
}

/// Discount attached to a line item; at most one per line.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDetails {
    pub id: Option<DiscountId>,
    pub discount_type: Option<String>,
    pub discount_value: f64,
}

/// Bundle sub-item. The selection flags arrive in assorted truthy forms
/// and are normalized to strict 0/1 before submission.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleProduct {
    pub product_id: Option<ProductId>,
    pub quantity: Option<f64>,
    #[serde(default)]
    pub bundle_selected: Option<i32>,
    #[serde(default, rename = "isBundleSelected_fe")]
    pub is_bundle_selected_fe: Option<i32>,
}

/// Line item as held in the order form.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub moq: Option<u32>,
    /// Special price request below the quoted price, with its justification
    pub spr_applied: Option<bool>,
    pub spr_remarks: Option<String>,
    pub line_no: Option<i32>,
    pub item_no: Option<i32>,
    /// Set on items added in the current editing session; such items do
    /// not yet own backend line/item numbers.
    #[serde(default, rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub volume_discount_applied: bool,
    #[serde(default)]
    pub inter_tax_breakup: Vec<TaxLine>,
    #[serde(default)]
    pub intra_tax_breakup: Vec<TaxLine>,
    pub discount_details: Option<DiscountDetails>,
    #[serde(default)]
    pub bundle_products: Vec<BundleProduct>,
    pub account_owner: Option<AccountOwnerRef>,
    pub business_unit: Option<BusinessUnitRef>,
    pub division: Option<DivisionRef>,
    pub ware_house: Option<WarehouseRef>,
}
