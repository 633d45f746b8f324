#![allow(dead_code)]

use rsa::RsaPublicKey;
use swiftpass::application::client::SwiftpassClient;
use swiftpass::application::signer::parse_public_key;
use swiftpass::config::{ClientConfig, Credentials};
use swiftpass::domain::params::Params;
use swiftpass::infrastructure::in_memory::CannedTransport;

pub const PRIVATE_PEM: &str = include_str!("../fixtures/private_key.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/public_key.pem");
pub const MCH_ID: &str = "7551000001";

pub const SUCCESS_RESPONSE: &str = "<xml>\
    <return_code><![CDATA[SUCCESS]]></return_code>\
    <result_code><![CDATA[0]]></result_code>\
    <status><![CDATA[0]]></status>\
    <pay_info><![CDATA[{\"appId\":\"wx2421b1c4370ec43b\",\"timeStamp\":\"1760841000\",\"package\":\"prepay_id=wx201410272009395522657a690389285100\"}]]></pay_info>\
    </xml>";

pub fn config() -> ClientConfig {
    ClientConfig {
        mch_id: MCH_ID.to_owned(),
        sub_appid: Some("wx2421b1c4370ec43b".to_owned()),
        notify_url: Some("https://shop.example/swiftpass/notify".to_owned()),
        private_key: Some(PRIVATE_PEM.to_owned()),
        public_key: Some(PUBLIC_PEM.to_owned()),
        ..ClientConfig::default()
    }
}

pub fn client_with(config: &ClientConfig, response: &str) -> (SwiftpassClient, CannedTransport) {
    let transport = CannedTransport::new(response);
    let client = SwiftpassClient::new(
        Credentials::from_config(config).unwrap(),
        Box::new(transport.clone()),
    );
    (client, transport)
}

pub fn client(response: &str) -> (SwiftpassClient, CannedTransport) {
    client_with(&config(), response)
}

pub fn public_key() -> RsaPublicKey {
    parse_public_key(PUBLIC_PEM).unwrap()
}

pub fn order() -> Params {
    Params::new()
        .with("body", "Latte")
        .with("out_trade_no", "T20261019001")
        .with("total_fee", 100)
        .with("mch_create_ip", "203.0.113.7")
}
