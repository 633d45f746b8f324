mod common;

use common::{MCH_ID, SUCCESS_RESPONSE, client, client_with, config, order, public_key};
use swiftpass::application::signer::verify;
use swiftpass::domain::canonical::canonicalize;
use swiftpass::domain::params::Params;
use swiftpass::domain::sign_type::SignType;
use swiftpass::error::GatewayError;
use swiftpass::interfaces::xml::codec;

#[tokio::test]
async fn test_create_order_posts_verifiable_signed_xml() {
    let (client, transport) = client(SUCCESS_RESPONSE);

    let envelope = client.create_order(order()).await.unwrap();
    assert!(envelope.get("pay_info").is_some());

    let sent = transport.requests().await;
    assert_eq!(sent.len(), 1);

    let posted = codec::decode(&sent[0]).unwrap();
    assert_eq!(posted.get("service"), Some("pay.weixin.jspay"));
    assert_eq!(posted.get("mch_id"), Some(MCH_ID));
    assert_eq!(posted.get("sign_type"), Some("RSA_1_256"));
    assert_eq!(posted.get("total_fee"), Some("100"));

    // the canonical string recomputed here must match the signature
    let canonical = canonicalize(posted.fields());
    assert!(!canonical.contains("sign="));
    assert!(canonical.starts_with("body=Latte&is_raw=1&mch_create_ip=203.0.113.7&mch_id=7551000001"));

    let signature = posted.get("sign").unwrap();
    assert!(verify(posted.fields(), SignType::Rsa256, signature, &public_key()));
}

#[tokio::test]
async fn test_sha1_accounts_sign_with_sha1() {
    let mut config = config();
    config.sign_type = Some(SignType::Rsa1);
    let (client, transport) = client_with(&config, SUCCESS_RESPONSE);

    client.create_order(order()).await.unwrap();

    let posted = codec::decode(&transport.requests().await[0]).unwrap();
    assert_eq!(posted.get("sign_type"), Some("RSA_1_1"));
    let signature = posted.get("sign").unwrap();
    assert!(verify(posted.fields(), SignType::Rsa1, signature, &public_key()));
    assert!(!verify(posted.fields(), SignType::Rsa256, signature, &public_key()));
}

#[tokio::test]
async fn test_js_pay_order_without_pay_info_is_missing_data() {
    let (client, _) = client("<xml><return_code>SUCCESS</return_code><result_code>0</result_code></xml>");

    match client.create_order(order()).await {
        Err(GatewayError::MissingData(field)) => assert_eq!(field, "pay_info"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_native_order_does_not_need_pay_info() {
    let (client, _) = client(
        "<xml><return_code>SUCCESS</return_code><result_code>0</result_code>\
         <code_url>weixin://wxpay/bizpayurl?pr=abc</code_url></xml>",
    );

    let envelope = client
        .create_order(order().with("service", "pay.weixin.native"))
        .await
        .unwrap();
    assert_eq!(envelope.get("code_url"), Some("weixin://wxpay/bizpayurl?pr=abc"));
}

#[tokio::test]
async fn test_protocol_error_wins_over_business_error() {
    let (client, _) = client(
        "<xml><return_code>FAIL</return_code><return_msg>sign error</return_msg>\
         <result_code>FAIL</result_code><err_code>SYSTEMERROR</err_code></xml>",
    );

    match client.order_query(Params::new().with("out_trade_no", "T1")).await {
        Err(GatewayError::Protocol(message)) => assert_eq!(message, "sign error"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_business_error_carries_code() {
    let (client, _) = client(
        "<xml><return_code>SUCCESS</return_code><result_code>FAIL</result_code>\
         <err_code>ORDERNOTEXIST</err_code></xml>",
    );

    match client.close_order(Params::new().with("out_trade_no", "T1")).await {
        Err(GatewayError::Business { code, .. }) => assert_eq!(code, "ORDERNOTEXIST"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_refund_query_accepts_any_identifier() {
    let (client, transport) = client(
        "<xml><return_code>SUCCESS</return_code><result_code>0</result_code>\
         <refund_count>1</refund_count></xml>",
    );

    let envelope = client
        .refund_query(Params::new().with("refund_id", "R20261019"))
        .await
        .unwrap();
    assert_eq!(envelope.get("refund_count"), Some("1"));

    let posted = codec::decode(&transport.requests().await[0]).unwrap();
    assert_eq!(posted.get("service"), Some("unified.trade.refundquery"));
}

#[tokio::test]
async fn test_missing_params_lists_every_field() {
    let (client, transport) = client(SUCCESS_RESPONSE);

    let err = client
        .create_order(Params::new().with("body", "Latte"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing params out_trade_no,total_fee,mch_create_ip"
    );
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_use_distinct_nonces() {
    let (client, transport) = client(SUCCESS_RESPONSE);
    let client = std::sync::Arc::new(client);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .order_query(Params::new().with("out_trade_no", format!("T{i}")))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut nonces: Vec<String> = transport
        .requests()
        .await
        .iter()
        .map(|xml| codec::decode(xml).unwrap().get("nonce_str").unwrap().to_owned())
        .collect();
    nonces.sort();
    nonces.dedup();
    assert_eq!(nonces.len(), 8);
}
