//! Payment operations.
//!
//! Sale, auth, capture and auth reversal all create a transaction on
//! `POST /services/2/transactions`; the gateway tells them apart by the transaction
//! type carried in the request. Retrieve reads a transaction back with
//! `POST /services/2/transactions/{id}` and an empty body.
//!
//! Each operation is generic over a [`PaymentMethod`], which fixes both the request
//! type and the response type:
//!
//! ```rust,no_run
//! use bluesnap_rs::connector::Connector;
//! use bluesnap_rs::options::{Credentials, Options};
//! use bluesnap_rs::types::card::{self, Card, CreditCardRequest};
//! use bluesnap_rs::Decimal;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = Connector::try_from("https://sandbox.bluesnap.com")?;
//! let options = Options::new(Credentials::new("API_user", "secret"));
//! let credit_card = CreditCardRequest::new("4263982640269299", "02", "2023", "837");
//! let request = card::Request::auth_only(Decimal::new(11, 0), "USD", credit_card);
//!
//! let response = connector.auth::<Card>(&request, &options).await?.into_result()?;
//! println!("{}", response.transaction_id);
//! # Ok(())
//! # }
//! ```

use bluesnap_types::{API_VERSION, Outcome, PaymentMethod, PaymentPayload, Serializable};
use http::Method;
use std::fmt::{Display, Formatter};

use crate::connector::{Connector, ConnectorError};
use crate::options::Options;
use crate::transport::HttpTransport;

/// The operations the connector offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Sale,
    Auth,
    Capture,
    AuthReversal,
    Retrieve,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Sale => "sale",
            Operation::Auth => "auth",
            Operation::Capture => "capture",
            Operation::AuthReversal => "auth_reversal",
            Operation::Retrieve => "retrieve",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn transactions_path() -> String {
    format!("/services/{API_VERSION}/transactions")
}

/// Rejects a method whose request and response report different kinds.
fn ensure_same_method<M: PaymentMethod>(operation: Operation) -> Result<(), ConnectorError> {
    let request = <M::Request as PaymentPayload>::METHOD;
    let response = <M::Response as PaymentPayload>::METHOD;
    if request == response {
        Ok(())
    } else {
        Err(ConnectorError::MethodMismatch {
            context: operation.name(),
            request,
            response,
        })
    }
}

/// Transaction ids go into the path, so only ASCII alphanumerics, `-` and `_` are accepted.
fn validate_transaction_id(transaction_id: &str) -> Result<(), ConnectorError> {
    if transaction_id.is_empty() {
        return Err(ConnectorError::InvalidArgument {
            context: Operation::Retrieve.name(),
            reason: "transaction id is empty".to_string(),
        });
    }
    let valid = transaction_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ConnectorError::InvalidArgument {
            context: Operation::Retrieve.name(),
            reason: "transaction id may only contain ASCII letters, digits, '-' and '_'"
                .to_string(),
        });
    }
    Ok(())
}

impl<T: HttpTransport> Connector<T> {
    async fn create_transaction<M>(
        &self,
        operation: Operation,
        request: &M::Request,
        options: &Options,
    ) -> Result<Outcome<M::Response>, ConnectorError>
    where
        M: PaymentMethod,
        M::Request: Sync,
    {
        ensure_same_method::<M>(operation)?;
        let payload: &(dyn Serializable + Sync) = request;
        self.execute(
            Method::POST,
            &transactions_path(),
            Some(payload),
            options,
            operation.name(),
        )
        .await
    }

    /// Authorizes and captures a payment in one step.
    pub async fn sale<M>(
        &self,
        request: &M::Request,
        options: &Options,
    ) -> Result<Outcome<M::Response>, ConnectorError>
    where
        M: PaymentMethod,
        M::Request: Sync,
    {
        self.create_transaction::<M>(Operation::Sale, request, options)
            .await
    }

    /// Authorizes a payment without capturing it.
    pub async fn auth<M>(
        &self,
        request: &M::Request,
        options: &Options,
    ) -> Result<Outcome<M::Response>, ConnectorError>
    where
        M: PaymentMethod,
        M::Request: Sync,
    {
        self.create_transaction::<M>(Operation::Auth, request, options)
            .await
    }

    /// Captures an earlier authorization.
    pub async fn capture<M>(
        &self,
        request: &M::Request,
        options: &Options,
    ) -> Result<Outcome<M::Response>, ConnectorError>
    where
        M: PaymentMethod,
        M::Request: Sync,
    {
        self.create_transaction::<M>(Operation::Capture, request, options)
            .await
    }

    /// Releases an earlier authorization.
    pub async fn auth_reversal<M>(
        &self,
        request: &M::Request,
        options: &Options,
    ) -> Result<Outcome<M::Response>, ConnectorError>
    where
        M: PaymentMethod,
        M::Request: Sync,
    {
        self.create_transaction::<M>(Operation::AuthReversal, request, options)
            .await
    }

    /// Reads back a transaction by id.
    ///
    /// # Errors
    ///
    /// [`ConnectorError::InvalidArgument`] if `transaction_id` is empty or holds
    /// characters outside `[A-Za-z0-9_-]`. Nothing is sent in that case.
    pub async fn retrieve<M: PaymentMethod>(
        &self,
        transaction_id: &str,
        options: &Options,
    ) -> Result<Outcome<M::Response>, ConnectorError> {
        validate_transaction_id(transaction_id)?;
        let path = format!("{}/{transaction_id}", transactions_path());
        self.execute(
            Method::POST,
            &path,
            None,
            options,
            Operation::Retrieve.name(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Credentials;
    use crate::test_utils::MockTransport;
    use bluesnap_types::card::{self, Card, CardTransactionType, CreditCardRequest};
    use bluesnap_types::{Deserializable, MethodKind, PayloadError};
    use rust_decimal::Decimal;

    const AUTH_RESPONSE: &str = r#"{
        "Amount": 11.0,
        "currency": "USD",
        "creditCard": { "cardLastFourDigits": "9299" },
        "processingInfo": { "processingStatus": "success" }
    }"#;

    /// A response that claims to belong to another payment method.
    #[derive(Debug)]
    struct WalletResponse;

    impl PaymentPayload for WalletResponse {
        const METHOD: MethodKind = MethodKind::new("wallet");
    }

    impl Deserializable for WalletResponse {
        fn from_json(_bytes: &[u8]) -> Result<Self, PayloadError> {
            Ok(WalletResponse)
        }
    }

    /// Pairs a card request with a wallet response.
    struct Mismatched;

    impl PaymentMethod for Mismatched {
        type Request = card::Request;
        type Response = WalletResponse;
    }

    fn options() -> Options {
        Options::new(Credentials::new("API_1444650203144940422365", "BLUE123"))
    }

    fn connector(transport: MockTransport) -> Connector<MockTransport> {
        Connector::new(transport, "https://sandbox.bluesnap.com".parse().unwrap()).unwrap()
    }

    fn scenario_card() -> CreditCardRequest {
        CreditCardRequest::new("4263982640269299", "02", "2023", "837")
    }

    #[tokio::test]
    async fn test_auth_scenario() {
        let connector = connector(MockTransport::new().respond(200, AUTH_RESPONSE));
        let request = card::Request::auth_only(Decimal::new(11, 0), "USD", scenario_card());

        let response = connector
            .auth::<Card>(&request, &options())
            .await
            .unwrap()
            .success()
            .unwrap();
        assert_eq!(response.amount, Decimal::new(11, 0));
        assert_eq!(response.credit_card.card_last_four_digits, "9299");
        assert_eq!(response.processing_info.processing_status, "success");

        let sent = connector.transport().requests();
        assert_eq!(sent[0].url.path(), "/services/2/transactions");
        let body: serde_json::Value = serde_json::from_slice(&sent[0].body).unwrap();
        assert_eq!(body["cardTransactionType"], "AUTH_ONLY");
        assert_eq!(body["creditCard"]["cardNumber"], "4263982640269299");
    }

    #[tokio::test]
    async fn test_transaction_operations_share_endpoint() {
        let transport = MockTransport::new()
            .respond(200, AUTH_RESPONSE)
            .respond(200, AUTH_RESPONSE)
            .respond(200, AUTH_RESPONSE);
        let connector = connector(transport);
        let sale = card::Request::auth_capture(Decimal::new(1100, 2), "USD", scenario_card());
        let capture = card::Request::capture("38488222");
        let reversal = card::Request::auth_reversal("38488222");

        assert!(connector.sale::<Card>(&sale, &options()).await.unwrap().is_success());
        assert!(connector.capture::<Card>(&capture, &options()).await.unwrap().is_success());
        assert!(
            connector
                .auth_reversal::<Card>(&reversal, &options())
                .await
                .unwrap()
                .is_success()
        );

        let sent = connector.transport().requests();
        assert_eq!(sent.len(), 3);
        let kinds: Vec<String> = sent
            .iter()
            .map(|r| {
                assert_eq!(r.method, Method::POST);
                assert_eq!(r.url.path(), "/services/2/transactions");
                let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                body["cardTransactionType"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(kinds, ["AUTH_CAPTURE", "CAPTURE", "AUTH_REVERSAL"]);
        assert_eq!(
            capture.card_transaction_type,
            Some(CardTransactionType::Capture)
        );
    }

    #[tokio::test]
    async fn test_method_mismatch_sends_nothing() {
        let connector = connector(MockTransport::new().respond(200, AUTH_RESPONSE));
        let request = card::Request::auth_only(Decimal::new(11, 0), "USD", scenario_card());

        let err = connector
            .sale::<Mismatched>(&request, &options())
            .await
            .unwrap_err();
        match err {
            ConnectorError::MethodMismatch {
                context,
                request,
                response,
            } => {
                assert_eq!(context, "sale");
                assert_eq!(request, MethodKind::CARD);
                assert_eq!(response.as_str(), "wallet");
            }
            other => panic!("expected MethodMismatch, got {other:?}"),
        }
        assert!(connector.auth::<Mismatched>(&request, &options()).await.is_err());
        assert!(connector.capture::<Mismatched>(&request, &options()).await.is_err());
        assert!(
            connector
                .auth_reversal::<Mismatched>(&request, &options())
                .await
                .is_err()
        );
        assert_eq!(connector.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_retrieve_posts_empty_body_to_transaction_path() {
        let connector = connector(MockTransport::new().respond(200, AUTH_RESPONSE));
        let outcome = connector
            .retrieve::<Card>("38488222", &options())
            .await
            .unwrap();
        assert!(outcome.is_success());

        let sent = connector.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].url.path(), "/services/2/transactions/38488222");
        assert!(sent[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_rejects_bad_ids_before_sending() {
        let connector = connector(MockTransport::new());
        for id in ["", "../admin", "384 882", "38488222?x=1", "id/with/slash"] {
            let err = connector.retrieve::<Card>(id, &options()).await.unwrap_err();
            assert!(
                matches!(err, ConnectorError::InvalidArgument { context: "retrieve", .. }),
                "{id:?} should be rejected"
            );
        }
        assert_eq!(connector.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_decline_is_returned_as_value() {
        let envelope = r#"{"message": [{"errorName": "TRANSACTION_NOT_FOUND", "code": 20008, "description": "not found"}]}"#;
        let connector = connector(MockTransport::new().respond(404, envelope));
        let outcome = connector
            .retrieve::<Card>("38488222", &options())
            .await
            .unwrap();
        let errors = outcome.into_result().unwrap_err();
        assert_eq!(errors.status_code(), 404);
        assert_eq!(errors.messages()[0].code, 20008);
    }

    #[tokio::test]
    async fn test_auth_over_http() {
        use wiremock::matchers::{basic_auth, body_json, header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/2/transactions"))
            .and(basic_auth("API_1444650203144940422365", "BLUE123"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(serde_json::json!({
                "amount": "11",
                "currency": "USD",
                "cardTransactionType": "AUTH_ONLY",
                "creditCard": {
                    "cardNumber": "4263982640269299",
                    "expirationMonth": "02",
                    "expirationYear": "2023",
                    "securityCode": "837"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(AUTH_RESPONSE))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/services/2/transactions/0000"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"message": [{"errorName": "TRANSACTION_ID_REQUIRED", "code": "14002", "description": "missing"}]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let connector = Connector::try_from(mock_server.uri()).unwrap();
        let request = card::Request::auth_only(Decimal::new(11, 0), "USD", scenario_card());
        let response = connector
            .auth::<Card>(&request, &options())
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(response.credit_card.card_last_four_digits, "9299");

        let errors = connector
            .retrieve::<Card>("0000", &options())
            .await
            .unwrap()
            .declined()
            .unwrap();
        assert_eq!(errors.status_code(), 400);
        assert!(errors.find("TRANSACTION_ID_REQUIRED").is_some());
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::AuthReversal.to_string(), "auth_reversal");
        assert_eq!(Operation::Retrieve.name(), "retrieve");
    }
}
