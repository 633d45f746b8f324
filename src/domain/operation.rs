use super::requirement::{Requirement, parse_requirements};
use std::fmt;
use std::sync::LazyLock;

/// Gateway service names.
pub mod service {
    pub const NATIVE: &str = "pay.weixin.native";
    pub const JS_PAY: &str = "pay.weixin.jspay";
    pub const ORDER_QUERY: &str = "unified.trade.query";
    pub const REFUND: &str = "unified.trade.refund";
    pub const REFUND_QUERY: &str = "unified.trade.refundquery";
    pub const CLOSE_ORDER: &str = "unified.trade.close";
}

/// Fields an operation may take from the account defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultField {
    MchId,
    SubAppId,
    SignType,
    NotifyUrl,
    OpUserId,
}

impl DefaultField {
    pub const fn key(&self) -> &'static str {
        match self {
            Self::MchId => "mch_id",
            Self::SubAppId => "sub_appid",
            Self::SignType => "sign_type",
            Self::NotifyUrl => "notify_url",
            Self::OpUserId => "op_user_id",
        }
    }
}

static CREATE_ORDER_REQUIRED: LazyLock<Vec<Requirement>> = LazyLock::new(|| {
    parse_requirements(&[
        "body",
        "out_trade_no",
        "total_fee",
        "mch_create_ip",
        "mch_id",
        "service",
    ])
});
static ORDER_QUERY_REQUIRED: LazyLock<Vec<Requirement>> =
    LazyLock::new(|| parse_requirements(&["transaction_id|out_trade_no"]));
static REFUND_REQUIRED: LazyLock<Vec<Requirement>> = LazyLock::new(|| {
    parse_requirements(&[
        "transaction_id|out_trade_no",
        "out_refund_no",
        "total_fee",
        "refund_fee",
    ])
});
static REFUND_QUERY_REQUIRED: LazyLock<Vec<Requirement>> = LazyLock::new(|| {
    parse_requirements(&["transaction_id|out_trade_no|out_refund_no|refund_id"])
});
static CLOSE_ORDER_REQUIRED: LazyLock<Vec<Requirement>> =
    LazyLock::new(|| parse_requirements(&["out_trade_no"]));

/// The high-level calls the gateway client offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateOrder,
    OrderQuery,
    Refund,
    RefundQuery,
    CloseOrder,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Self::CreateOrder,
        Self::OrderQuery,
        Self::Refund,
        Self::RefundQuery,
        Self::CloseOrder,
    ];

    /// Service name sent for this operation. `None` means the caller picks it
    /// (order creation), falling back to [`service::JS_PAY`].
    pub const fn fixed_service(&self) -> Option<&'static str> {
        match self {
            Self::CreateOrder => None,
            Self::OrderQuery => Some(service::ORDER_QUERY),
            Self::Refund => Some(service::REFUND),
            Self::RefundQuery => Some(service::REFUND_QUERY),
            Self::CloseOrder => Some(service::CLOSE_ORDER),
        }
    }

    pub fn required(&self) -> &'static [Requirement] {
        match self {
            Self::CreateOrder => CREATE_ORDER_REQUIRED.as_slice(),
            Self::OrderQuery => ORDER_QUERY_REQUIRED.as_slice(),
            Self::Refund => REFUND_REQUIRED.as_slice(),
            Self::RefundQuery => REFUND_QUERY_REQUIRED.as_slice(),
            Self::CloseOrder => CLOSE_ORDER_REQUIRED.as_slice(),
        }
    }

    pub const fn default_fields(&self) -> &'static [DefaultField] {
        const BASE: &[DefaultField] = &[
            DefaultField::MchId,
            DefaultField::SubAppId,
            DefaultField::SignType,
        ];
        match self {
            Self::CreateOrder => &[
                DefaultField::MchId,
                DefaultField::SubAppId,
                DefaultField::SignType,
                DefaultField::NotifyUrl,
            ],
            Self::Refund => &[
                DefaultField::MchId,
                DefaultField::SubAppId,
                DefaultField::SignType,
                DefaultField::OpUserId,
            ],
            Self::OrderQuery | Self::RefundQuery | Self::CloseOrder => BASE,
        }
    }

    /// Payload field a successful response must carry for `service_name`.
    pub fn expected_payload(&self, service_name: &str) -> Option<&'static str> {
        match self {
            Self::CreateOrder if service_name == service::JS_PAY => Some("pay_info"),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateOrder => "create-order",
            Self::OrderQuery => "order-query",
            Self::Refund => "refund",
            Self::RefundQuery => "refund-query",
            Self::CloseOrder => "close-order",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
