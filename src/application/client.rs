use super::builder::{RequestBuilder, SignedRequest};
use super::notify::NotificationVerifier;
use super::validator::validate_response;
use crate::config::Credentials;
use crate::domain::envelope::Envelope;
use crate::domain::operation::Operation;
use crate::domain::params::Params;
use crate::domain::ports::TransportBox;
use crate::domain::report::SettlementReport;
use crate::error::{GatewayError, Result};
use crate::interfaces::csv::report_reader;
use crate::interfaces::xml::codec;
use tracing::instrument;

/// JSON object the gateway returns in `pay_info` for in-app (JS) payments.
pub type PayInfo = serde_json::Map<String, serde_json::Value>;

/// The main entry point for talking to the gateway.
///
/// `SwiftpassClient` owns the merchant credentials and a transport. Each call
/// builds its own parameter set and nonce, so one client can serve
/// concurrent calls without locking.
pub struct SwiftpassClient {
    builder: RequestBuilder,
    notifications: NotificationVerifier,
    transport: TransportBox,
}

impl SwiftpassClient {
    /// Creates a new `SwiftpassClient`.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Parsed merchant credentials and defaults.
    /// * `transport` - Where signed requests are posted.
    pub fn new(credentials: Credentials, transport: TransportBox) -> Self {
        let Credentials {
            defaults,
            private_key,
            public_key,
            ..
        } = credentials;
        Self {
            builder: RequestBuilder::new(defaults, private_key),
            notifications: NotificationVerifier::new(public_key),
            transport,
        }
    }

    /// Places an order. The service defaults to JS pay, in which case the
    /// response must carry `pay_info`.
    #[instrument(skip_all, fields(out_trade_no = params.get("out_trade_no")))]
    pub async fn create_order(&self, params: Params) -> Result<Envelope> {
        self.execute(Operation::CreateOrder, params).await
    }

    /// Places a JS-pay order and decodes the `pay_info` the front end hands
    /// to the wallet.
    #[instrument(skip_all, fields(out_trade_no = params.get("out_trade_no")))]
    pub async fn js_pay_params(&self, params: Params) -> Result<PayInfo> {
        let envelope = self.execute(Operation::CreateOrder, params).await?;
        let pay_info = envelope
            .get("pay_info")
            .ok_or_else(|| GatewayError::MissingData("pay_info".to_owned()))?;
        Ok(serde_json::from_str(pay_info)?)
    }

    #[instrument(skip_all)]
    pub async fn order_query(&self, params: Params) -> Result<Envelope> {
        self.execute(Operation::OrderQuery, params).await
    }

    #[instrument(skip_all, fields(out_refund_no = params.get("out_refund_no")))]
    pub async fn refund(&self, params: Params) -> Result<Envelope> {
        self.execute(Operation::Refund, params).await
    }

    #[instrument(skip_all)]
    pub async fn refund_query(&self, params: Params) -> Result<Envelope> {
        self.execute(Operation::RefundQuery, params).await
    }

    #[instrument(skip_all, fields(out_trade_no = params.get("out_trade_no")))]
    pub async fn close_order(&self, params: Params) -> Result<Envelope> {
        self.execute(Operation::CloseOrder, params).await
    }

    /// Builds, sends and validates any operation.
    pub async fn execute(&self, operation: Operation, params: Params) -> Result<Envelope> {
        let request = self.prepare(operation, params)?;
        let body = request.to_xml()?;
        let raw = self.transport.post(body).await?;
        let envelope = codec::decode_bytes(&raw)?;
        validate_response(envelope, operation.expected_payload(request.service()))
    }

    /// Builds the signed request without sending it.
    pub fn prepare(&self, operation: Operation, params: Params) -> Result<SignedRequest> {
        self.builder.build(operation, params)
    }

    /// Verifies an inbound notification body.
    #[instrument(skip_all)]
    pub fn notify(&self, xml: &str) -> Result<Envelope> {
        self.notifications.verify(xml)
    }

    /// Parses a downloaded settlement report.
    pub fn parse_report(&self, text: &str) -> Result<SettlementReport> {
        report_reader::parse_report(text)
    }
}
