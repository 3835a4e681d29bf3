//! Invoice models: caller inputs, the remote create payload, and defaults.

use chrono::{DateTime, Duration, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `paymentDueTerms.dueUTC` format when the time has a fractional second.
const DUE_UTC_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// `paymentDueTerms.dueUTC` format at a whole second.
const DUE_UTC_FORMAT_WHOLE: &str = "%Y-%m-%d %H:%M:%S";

/// Naive UTC text of `due`; the fraction is left out at a whole second.
pub(crate) fn format_due_utc(due: DateTime<Utc>) -> String {
    let format = if due.nanosecond() / 1_000 == 0 {
        DUE_UTC_FORMAT_WHOLE
    } else {
        DUE_UTC_FORMAT
    };
    due.format(format).to_string()
}

/// A new invoice to be created.
///
/// # Example
///
/// ```
/// use hg_api_client::models::{
///     InvoiceItem, NewInvoice, OutletAddress, Service, ServiceProvider, StoreInfo,
/// };
/// use rust_decimal_macros::dec;
///
/// let invoice = NewInvoice {
///     number: "10001".to_string(),
///     service_provider: ServiceProvider { id: 42, name: "Acme".to_string() },
///     service: Service { id: 7, name: "Delivery".to_string() },
///     address: OutletAddress {
///         country: "BY".to_string(),
///         line1: "Nezavisimosti 1".to_string(),
///         city: "Minsk".to_string(),
///         full_address: "BY, Minsk, Nezavisimosti 1".to_string(),
///     },
///     store: StoreInfo {
///         name: "Acme Store".to_string(),
///         locality_name: "Minsk".to_string(),
///         locality_code: "17030".to_string(),
///         city: "Minsk".to_string(),
///         locality_city: "Minsk".to_string(),
///     },
///     items: vec![InvoiceItem::new("Pizza", dec!(1), dec!(25.50))],
///     terms_of_days: 30,
/// };
/// assert_eq!(invoice.items.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    /// Merchant-side invoice number
    pub number: String,
    /// Service provider the invoice is issued by
    pub service_provider: ServiceProvider,
    /// Service the invoice is issued for
    pub service: Service,
    /// Retail outlet address
    pub address: OutletAddress,
    /// Retail outlet store details
    pub store: StoreInfo,
    /// Line items
    pub items: Vec<InvoiceItem>,
    /// Payment term in days; the due date is now (UTC) plus this many days
    pub terms_of_days: i64,
}

/// Service provider identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProvider {
    /// Service provider ID
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Service identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Service ID
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Retail outlet address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutletAddress {
    /// Country
    pub country: String,
    /// Street line
    pub line1: String,
    /// City
    pub city: String,
    /// Full human-readable address
    pub full_address: String,
}

/// Store details of the retail outlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    /// Store name
    pub name: String,
    /// Store locality name
    pub locality_name: String,
    /// Locality code
    pub locality_code: String,
    /// Store city
    pub city: String,
    /// Store locality city
    pub locality_city: String,
}

/// A single invoice line item.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceItem {
    /// Display name; also sent as the item code
    pub name: String,
    /// Description
    pub description: String,
    /// Quantity
    pub quantity: Decimal,
    /// Unit price
    pub price: Decimal,
    /// Discount in percent
    pub discount_percent: Decimal,
    /// Discount as an absolute amount
    pub discount_amount: Decimal,
}

impl InvoiceItem {
    /// Create an item with an empty description and no discount.
    pub fn new(name: impl Into<String>, quantity: Decimal, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            quantity,
            price,
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the discount (percent and absolute amount).
    pub fn with_discount(mut self, percent: Decimal, amount: Decimal) -> Self {
        self.discount_percent = percent;
        self.discount_amount = amount;
        self
    }
}

/// Parameters for fetching an invoice QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrCodeOptions {
    /// Image width in pixels
    pub img_width: u32,
    /// Image height in pixels
    pub img_height: u32,
    /// Whether the remote should render an image
    pub get_image: bool,
}

impl Default for QrCodeOptions {
    fn default() -> Self {
        Self {
            img_width: 174,
            img_height: 386,
            get_image: true,
        }
    }
}

/// Fixed sub-fields of the create payload.
///
/// The defaults reproduce the payload the remote has always been sent;
/// override individual fields through
/// [`ClientConfig::with_invoice_defaults`](crate::ClientConfig::with_invoice_defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDefaults {
    /// ISO 4217 numeric currency code
    pub currency: String,
    /// Retail outlet code
    pub retail_outlet_code: i64,
    /// Merchant category code
    pub mcc: Mcc,
    /// Unit of measure sent for every item
    pub item_measure: String,
    /// Retail outlet state
    pub outlet_state: i64,
    /// Notification recipients
    pub notify_params: NotifyParams,
    /// Payment rules
    pub payment_rules: PaymentRules,
    /// `isClosed` flag
    pub is_closed: bool,
    /// `canPay` flag
    pub can_pay: bool,
    /// `inElastic` flag
    pub in_elastic: bool,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            currency: "933".to_string(),
            retail_outlet_code: 1,
            mcc: Mcc::default(),
            item_measure: "string".to_string(),
            outlet_state: 1,
            notify_params: NotifyParams::default(),
            payment_rules: PaymentRules::default(),
            is_closed: false,
            can_pay: true,
            in_elastic: true,
        }
    }
}

/// Merchant category code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcc {
    /// Code
    pub code: String,
    /// Optional name
    pub name: Option<String>,
}

impl Default for Mcc {
    fn default() -> Self {
        Self {
            code: "8999".to_string(),
            name: None,
        }
    }
}

/// Notification recipients attached to the retail outlet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyParams {
    /// E-mail addresses
    pub emails: Vec<String>,
    /// Phone numbers
    pub smses: Vec<String>,
    /// Callback URLs
    pub urls: Vec<String>,
    /// User IDs
    pub users: Vec<String>,
    /// OneSignal users
    pub one_signal_users: Option<Vec<String>>,
    /// Cash box notification URL
    pub cash_box_notify_url: Option<String>,
}

/// Payment rule flags. All `false` by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRules {
    /// Invoice is a tariff
    pub is_tariff: bool,
    /// Tariff expires
    pub is_tariff_expire: bool,
    /// Payer enters the amount
    pub request_amount: bool,
    /// Ask the payer for an address
    pub request_address: bool,
    /// Ask the payer for a name
    pub request_person_name: bool,
    /// Ask the payer for a phone number
    pub request_phone: bool,
    /// Ask the payer for an e-mail
    #[serde(rename = "requestEMail")]
    pub request_email: bool,
    /// Ask the payer for a loyalty number
    pub request_loyality_number: bool,
    /// Ask the payer for a purpose
    pub request_purpose: bool,
    /// Ask the payer for a referral loyalty number
    pub request_reference_loyality_number: bool,
    /// Reversal allowed
    pub can_make_storno: bool,
    /// Partial payment allowed (remote spelling)
    pub partial_pymentay: bool,
}

impl NewInvoice {
    /// Assemble the remote create payload, due `terms_of_days` after `now`.
    ///
    /// Fails with [`Error::InvalidInput`] when the due date is out of range.
    pub(crate) fn to_payload(
        &self,
        defaults: &InvoiceDefaults,
        now: DateTime<Utc>,
    ) -> Result<InvoicePayload> {
        let due = Duration::try_days(self.terms_of_days)
            .and_then(|term| now.checked_add_signed(term))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "terms_of_days {} puts the due date out of range",
                    self.terms_of_days
                ))
            })?;

        Ok(InvoicePayload {
            number: self.number.clone(),
            currency: defaults.currency.clone(),
            merchant_info: MerchantInfo {
                service_provider_id: self.service_provider.id,
                service_provider_name: self.service_provider.name.clone(),
                service_id: self.service.id,
                service_name: self.service.name.clone(),
                retail_outlet: RetailOutlet {
                    code: defaults.retail_outlet_code,
                    address: self.address.clone(),
                    business_card: None,
                    retail_outlet_merchant_info: RetailOutletMerchantInfo {
                        store_name: self.store.name.clone(),
                        store_locality_name: self.store.locality_name.clone(),
                        locality_code: self.store.locality_code.clone(),
                        store_city: self.store.city.clone(),
                        store_locality_city: self.store.locality_city.clone(),
                        trerminal_label: None,
                    },
                    erip_mcc: None,
                    mcc: defaults.mcc.clone(),
                    cash_boxes: None,
                    descr: None,
                    notify_params: defaults.notify_params.clone(),
                    state: defaults.outlet_state,
                },
                cash_box: None,
            },
            items: self
                .items
                .iter()
                .map(|item| ItemPayload {
                    // the remote keys items by display name
                    code: item.name.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: UnitPrice { value: item.price },
                    measure: defaults.item_measure.clone(),
                    discount: Discount {
                        percent: item.discount_percent,
                        amount: item.discount_amount,
                    },
                })
                .collect(),
            payment_rules: defaults.payment_rules.clone(),
            payment_due_terms: PaymentDueTerms {
                due_utc: format_due_utc(due),
                terms_day: self.terms_of_days,
            },
            is_closed: defaults.is_closed,
            can_pay: defaults.can_pay,
            in_elastic: defaults.in_elastic,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvoicePayload {
    number: String,
    currency: String,
    merchant_info: MerchantInfo,
    items: Vec<ItemPayload>,
    payment_rules: PaymentRules,
    payment_due_terms: PaymentDueTerms,
    is_closed: bool,
    can_pay: bool,
    in_elastic: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MerchantInfo {
    service_provider_id: i64,
    service_provider_name: String,
    service_id: i64,
    service_name: String,
    retail_outlet: RetailOutlet,
    cash_box: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetailOutlet {
    code: i64,
    address: OutletAddress,
    business_card: Option<serde_json::Value>,
    retail_outlet_merchant_info: RetailOutletMerchantInfo,
    erip_mcc: Option<serde_json::Value>,
    mcc: Mcc,
    cash_boxes: Option<serde_json::Value>,
    descr: Option<String>,
    notify_params: NotifyParams,
    state: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetailOutletMerchantInfo {
    store_name: String,
    store_locality_name: String,
    locality_code: String,
    store_city: String,
    store_locality_city: String,
    trerminal_label: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemPayload {
    code: String,
    name: String,
    description: String,
    quantity: Decimal,
    unit_price: UnitPrice,
    measure: String,
    discount: Discount,
}

#[derive(Debug, Serialize)]
struct UnitPrice {
    value: Decimal,
}

#[derive(Debug, Serialize)]
struct Discount {
    percent: Decimal,
    amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentDueTerms {
    #[serde(rename = "dueUTC")]
    due_utc: String,
    terms_day: i64,
}
