//! Wire schema of the `card` payment method.
//!
//! Request records skip absent fields when serialized. Response records default
//! every missing field, and unknown fields are ignored, so additive changes on the
//! gateway side do not break decoding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// Discriminates the transaction created by `POST /services/2/transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardTransactionType {
    /// Authorize and capture in one step (a sale).
    AuthCapture,
    AuthOnly,
    Capture,
    AuthReversal,
    #[serde(other)]
    Unknown,
}

impl CardTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardTransactionType::AuthCapture => "AUTH_CAPTURE",
            CardTransactionType::AuthOnly => "AUTH_ONLY",
            CardTransactionType::Capture => "CAPTURE",
            CardTransactionType::AuthReversal => "AUTH_REVERSAL",
            CardTransactionType::Unknown => "UNKNOWN",
        }
    }
}

/// Body of a card transaction request.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub wallet_id: Option<i64>,
    pub wallet: Option<WalletRequest>,
    /// The only decimal the gateway takes as a JSON string; the others go out as numbers.
    pub amount: Option<Decimal>,
    pub vaulted_shopper_id: Option<i64>,
    pub merchant_transaction_id: Option<String>,
    pub soft_descriptor: Option<String>,
    pub descriptor_phone_number: Option<String>,
    pub tax_reference: Option<String>,
    pub vendors_info: Option<VendorsInfo>,
    pub card_holder_info: Option<CardHolderInfo>,
    pub currency: Option<String>,
    pub transaction_fraud_info: Option<TransactionFraudInfo>,
    pub credit_card: Option<CreditCardRequest>,
    pub card_transaction_type: Option<CardTransactionType>,
    pub three_d_secure: Option<ThreeDSecureRequest>,
    pub transaction_meta_data: Option<TransactionMetadata>,
    pub pf_token: Option<String>,
    pub level3_data: Option<Level3Data>,
    pub store_card: Option<bool>,
    /// Free-form network data. Its shape is not fixed by the v2 API.
    pub network_transaction_info: Option<BTreeMap<String, String>>,
    pub transaction_order_source: Option<String>,
    pub transaction_initiator: Option<String>,
    pub recurring_transaction: Option<String>,
    /// The authorization being captured or reversed.
    pub transaction_id: Option<String>,
}

/// Body of a card transaction response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Response {
    #[serde(alias = "Amount")]
    pub amount: Decimal,
    pub open_to_capture: Decimal,
    pub vaulted_shopper_id: i64,
    pub merchant_transaction_id: String,
    pub processing_info: ProcessingInfo,
    pub soft_descriptor: String,
    pub descriptor_phone_number: String,
    pub tax_reference: String,
    pub card_holder_info: CardHolderInfo,
    pub currency: String,
    pub transaction_approval_date: String,
    pub transaction_approval_time: String,
    pub fraud_result_info: FraudResultInfo,
    pub credit_card: CreditCardResponse,
    pub card_transaction_type: Option<CardTransactionType>,
    pub three_d_secure: ThreeDSecureResponse,
    pub transaction_id: String,
    pub original_transaction_id: String,
    pub chargebacks: Chargebacks,
    pub refunds: Refunds,
    pub wallet: WalletResponse,
    pub vendor_info: VendorInfo,
    pub vendors_info: VendorsInfo,
    pub level3_data: Level3DataResponse,
    pub store_card: bool,
    pub transaction_meta_data: TransactionMetadata,
    pub avs_response_code: String,
    pub usd_amount: Decimal,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRequest {
    pub wallet_type: Option<String>,
    pub encoded_payment_token: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletResponse {
    pub wallet_type: String,
    pub billing_contact_info: Option<ContactInfo>,
    pub tokenized_card: Option<TokenizedCard>,
}

/// Billing or shipping contact, depending on where it appears.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub personal_identification_number: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizedCard {
    pub card_last_four_digits: Option<String>,
    pub card_type: Option<String>,
    pub card_sub_type: Option<String>,
    pub bin_category: Option<String>,
    pub card_regulated: Option<String>,
    pub issuing_country_code: Option<String>,
    pub dpan_expiration_month: Option<String>,
    pub dpan_expiration_year: Option<String>,
    pub dpan_last_four_digits: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorsInfo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vendor_info: Vec<VendorInfo>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    pub vendor_id: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub commission_percent: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub commission_amount: Option<Decimal>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHolderInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "address_2")]
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub merchant_shopper_id: Option<String>,
    pub personal_identification_number: Option<String>,
    pub company_name: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFraudInfo {
    pub fraud_session_id: Option<String>,
    pub shopper_ip_address: Option<String>,
    pub company: Option<String>,
    pub shipping_contact_info: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fraud_products: Vec<FraudProduct>,
    pub enterprise_site_id: Option<String>,
    pub enterprise_udfs: Option<EnterpriseUdfs>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudProduct {
    pub fraud_product_name: Option<String>,
    pub fraud_product_desc: Option<String>,
    pub fraud_product_type: Option<String>,
    pub fraud_product_quantity: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub fraud_product_price: Option<Decimal>,
}

/// Enterprise user-defined fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnterpriseUdfs {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub udf: Vec<Udf>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Udf {
    pub udf_name: Option<String>,
    pub udf_value: Option<String>,
}

/// Card data sent with a transaction.
///
/// `Debug` masks the card number and the security code.
#[skip_serializing_none]
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardRequest {
    pub card_number: Option<String>,
    pub encrypted_card_number: Option<String>,
    pub card_last_four_digits: Option<String>,
    pub card_type: Option<String>,
    pub expiration_month: Option<String>,
    pub expiration_year: Option<String>,
    pub security_code: Option<String>,
    pub encrypted_security_code: Option<String>,
    pub security_code_pf_token: Option<String>,
}

impl Debug for CreditCardRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let masked_number = self.card_number.as_deref().map(mask_card_number);
        f.debug_struct("CreditCardRequest")
            .field("card_number", &masked_number)
            .field(
                "encrypted_card_number",
                &self.encrypted_card_number.as_ref().map(|_| "<redacted>"),
            )
            .field("card_last_four_digits", &self.card_last_four_digits)
            .field("card_type", &self.card_type)
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("security_code", &self.security_code.as_ref().map(|_| "<redacted>"))
            .field(
                "encrypted_security_code",
                &self.encrypted_security_code.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "security_code_pf_token",
                &self.security_code_pf_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Keeps the last four digits, masks the rest.
fn mask_card_number(number: &str) -> String {
    let digits = number.chars().count();
    let visible = digits.min(4);
    let tail: String = number.chars().skip(digits - visible).collect();
    format!("{}{}", "*".repeat(digits - visible), tail)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditCardResponse {
    pub card_last_four_digits: String,
    pub card_type: String,
    pub card_sub_type: String,
    pub card_category: String,
    pub bin_category: String,
    pub bin_number: String,
    pub card_regulated: String,
    pub issuing_bank: String,
    pub issuing_country_code: String,
    pub expiration_month: String,
    #[serde(alias = "expirationyear")]
    pub expiration_year: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureRequest {
    pub three_d_secure_result_token: Option<String>,
    pub eci: Option<String>,
    pub cavv: Option<String>,
    pub xid: Option<String>,
    pub ds_transaction_id: Option<String>,
    pub three_d_secure_version: Option<String>,
    pub three_d_secure_reference_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreeDSecureResponse {
    pub authentication_result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<Metadata>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub meta_key: Option<String>,
    pub meta_value: Option<String>,
    pub meta_description: Option<String>,
    pub is_visible: Option<String>,
}

/// Level 3 processing data, amounts in the transaction currency.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level3Data {
    pub customer_reference_number: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sales_tax_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub freight_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub duty_amount: Option<Decimal>,
    pub destination_zip_code: Option<String>,
    pub destination_country_code: Option<String>,
    pub ship_from_zip_code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub level3_data_items: Vec<Level3DataItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Level3DataResponse {
    #[serde(flatten)]
    pub data: Level3Data,
    pub transaction_processed_with_l3d_supported_acquirer: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level3DataItem {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub line_item_total: Option<Decimal>,
    pub commodity_code: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_amount: Option<Decimal>,
    pub discount_indicator: Option<String>,
    pub gross_net_indicator: Option<String>,
    pub product_code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub item_quantity: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_rate: Option<Decimal>,
    pub tax_type: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_cost: Option<Decimal>,
    pub unit_of_measure: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingInfo {
    pub processing_status: String,
    pub cvv_response_code: String,
    pub authorization_code: String,
    pub avs_response_code_zip: String,
    pub avs_response_code_address: String,
    pub avs_response_code_name: String,
    pub network_transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FraudResultInfo {
    pub device_data_collector: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Refunds {
    pub refund: Vec<Refund>,
    pub balance_amount: Decimal,
    pub tax_balance_amount: Decimal,
    pub vendor_balance_amount: Decimal,
    pub vendors_balance_info: VendorsBalanceInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Refund {
    pub amount: Decimal,
    pub tax_amount: Decimal,
    pub currency: String,
    pub date: String,
    pub refund_transaction_id: i64,
    pub vendor_amount: Decimal,
    pub vendors_refund_info: VendorsRefundInfo,
    pub transaction_meta_data: TransactionMetadata,
    pub reason: String,
    pub cancel_subscriptions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorsBalanceInfo {
    pub vendor_balance_info: Vec<VendorAmount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorsRefundInfo {
    pub vendor_refund_info: Vec<VendorAmount>,
}

/// A vendor's share of a balance or refund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorAmount {
    pub vendor_id: i64,
    pub vendor_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chargebacks {
    pub chargeback: Vec<Chargeback>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chargeback {
    pub amount: Decimal,
    pub chargeback_transaction_id: i64,
    pub currency: String,
    pub date: String,
}
