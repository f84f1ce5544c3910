//! The `card` payment method.
//!
//! [`Card`] pairs [`Request`] with [`Response`]. Every card transaction is created
//! on the same endpoint, and the gateway tells them apart by
//! [`Request::card_transaction_type`], which the constructors below fill in.
//!
//! ```rust
//! use bluesnap_types::card::{CardTransactionType, CreditCardRequest, Request};
//! use rust_decimal::Decimal;
//!
//! let card = CreditCardRequest::new("4263982640269299", "02", "2023", "837");
//! let sale = Request::auth_capture(Decimal::new(1100, 2), "USD", card);
//! assert_eq!(sale.card_transaction_type, Some(CardTransactionType::AuthCapture));
//! ```

mod types;

pub use types::*;

use rust_decimal::Decimal;

use crate::payload::{
    Deserializable, MethodKind, PayloadError, PaymentMethod, PaymentPayload, Serializable,
    decode_json, encode_json,
};

/// Marker for the card payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Card;

impl PaymentMethod for Card {
    type Request = Request;
    type Response = Response;
}

impl PaymentPayload for Request {
    const METHOD: MethodKind = MethodKind::CARD;
}

impl Serializable for Request {
    fn to_json(&self) -> Result<Vec<u8>, PayloadError> {
        encode_json(Self::METHOD, self)
    }
}

impl PaymentPayload for Response {
    const METHOD: MethodKind = MethodKind::CARD;
}

impl Deserializable for Response {
    fn from_json(bytes: &[u8]) -> Result<Self, PayloadError> {
        decode_json(Self::METHOD, bytes)
    }
}

impl Request {
    /// An empty request of the given transaction type.
    pub fn new(kind: CardTransactionType) -> Self {
        Self {
            card_transaction_type: Some(kind),
            ..Default::default()
        }
    }

    /// Authorize and capture in one step.
    pub fn auth_capture(
        amount: Decimal,
        currency: impl Into<String>,
        credit_card: CreditCardRequest,
    ) -> Self {
        Self::new(CardTransactionType::AuthCapture)
            .with_amount(amount)
            .with_currency(currency)
            .with_credit_card(credit_card)
    }

    /// Authorize only; capture later with [`Request::capture`].
    pub fn auth_only(
        amount: Decimal,
        currency: impl Into<String>,
        credit_card: CreditCardRequest,
    ) -> Self {
        Self::new(CardTransactionType::AuthOnly)
            .with_amount(amount)
            .with_currency(currency)
            .with_credit_card(credit_card)
    }

    /// Captures an earlier authorization. Add an amount for a partial capture.
    pub fn capture(transaction_id: impl Into<String>) -> Self {
        Self::new(CardTransactionType::Capture).with_transaction_id(transaction_id)
    }

    /// Releases an earlier authorization.
    pub fn auth_reversal(transaction_id: impl Into<String>) -> Self {
        Self::new(CardTransactionType::AuthReversal).with_transaction_id(transaction_id)
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_credit_card(mut self, credit_card: CreditCardRequest) -> Self {
        self.credit_card = Some(credit_card);
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_card_holder_info(mut self, card_holder_info: CardHolderInfo) -> Self {
        self.card_holder_info = Some(card_holder_info);
        self
    }

    pub fn with_soft_descriptor(mut self, soft_descriptor: impl Into<String>) -> Self {
        self.soft_descriptor = Some(soft_descriptor.into());
        self
    }

    pub fn with_merchant_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.merchant_transaction_id = Some(id.into());
        self
    }
}

impl CreditCardRequest {
    /// Plain card details.
    pub fn new(
        card_number: impl Into<String>,
        expiration_month: impl Into<String>,
        expiration_year: impl Into<String>,
        security_code: impl Into<String>,
    ) -> Self {
        Self {
            card_number: Some(card_number.into()),
            expiration_month: Some(expiration_month.into()),
            expiration_year: Some(expiration_year.into()),
            security_code: Some(security_code.into()),
            ..Default::default()
        }
    }
}
