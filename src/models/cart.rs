//! Monetary totals of a cart and their volume-discount and partial-payment
//! variants.

/// Totals of the active cart under the standard pricing path.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartValue {
    pub total_value: f64,
    pub total_tax: f64,
    pub total_shipping: f64,
    /// Packing and forwarding charge
    pub pf_rate: f64,
    pub taxable_amount: f64,
    pub grand_total: f64,
}

/// Alternate totals computed when a volume discount is applied.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDiscountDetails {
    pub sub_total: f64,
    pub overall_tax: f64,
    pub taxable_amount: f64,
    pub calculated_total: f64,
}

/// Totals of an already-paid version, subtracted from the cart totals when
/// a partial payment exists.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviousVersionTotals {
    pub total_tax: f64,
    pub total_value: f64,
    pub total_shipping: f64,
    pub pf_rate: f64,
}

impl CartValue {
    /// Cart value with the given paid totals subtracted from tax, value,
    /// shipping and handling. The taxable amount and grand total are left
    /// alone; the grand total is adjusted separately against the amount
    /// paid.
    pub fn minus_paid(&self, paid: &PreviousVersionTotals) -> CartValue {
        CartValue {
            total_value: self.total_value - paid.total_value,
            total_tax: self.total_tax - paid.total_tax,
            total_shipping: self.total_shipping - paid.total_shipping,
            pf_rate: self.pf_rate - paid.pf_rate,
            taxable_amount: self.taxable_amount,
            grand_total: self.grand_total,
        }
    }
}

impl<'a> From<&'a CartValue> for PreviousVersionTotals {
    fn from(cart: &'a CartValue) -> Self {
        PreviousVersionTotals {
            total_tax: cart.total_tax,
            total_value: cart.total_value,
            total_shipping: cart.total_shipping,
            pf_rate: cart.pf_rate,
        }
    }
}
