//! Few-shot stock extraction against a mock JSON-mode endpoint

use dashlm::client::{Client, Example, Extractor, Schema};
use dashlm::providers::{OpenAI, OpenAIConfig};
use dashlm::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEWS_A: &str = "【股票A市场表现强劲】2023年8月1日，股票A在今日交易中表现亮眼。该股票以10.00元开盘，随后价格稳步上涨，最终以10.50元收盘，全天涨幅达5%。成交量方面，股票A交投活跃，累计成交量为100万股，市场关注度较高。";

const NEWS_BANK: &str = "【银行板块整体回调】2024年6月3日，稳健银行股价出现调整。该股开盘价为8.75元，受市场整体情绪影响，早盘即承压下行，午后有所回升但力度有限成交量温和放大至210万股。";

fn stock_extractor() -> Extractor {
    let schema = Schema::new(["日期", "股票名称", "开盘价", "收盘价", "成交量"]).unwrap();
    Extractor::new(schema)
        .unwrap()
        .with_task("股票信息")
        .with_examples(vec![
            Example::new(
                "【科技龙头股逆势上扬】2024年3月15日，科技创新板明星企业华兴科技表现突出。该股开盘报25.80元，最终收于27.35元，涨幅5.98%。",
                json!({
                    "日期": "2024-03-15",
                    "股票名称": "华兴科技",
                    "开盘价": "25.80",
                    "收盘价": "27.35",
                    "成交量": "1085300"
                }),
            )
            .unwrap(),
            Example::new(
                "【新能源汽车板块遇冷回调】2024年4月8日，绿能动力股价承压下行。该股以42.60元低开，最终收报40.85元，跌幅达4.09%。成交量萎缩至45万股。",
                json!({
                    "日期": "2024-04-08",
                    "股票名称": "绿能动力",
                    "开盘价": "42.60",
                    "收盘价": "40.85",
                    "成交量": "450000"
                }),
            )
            .unwrap(),
        ])
}

async fn server_replying(content: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-x",
            "model": "qwen3-max",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> Client<OpenAI> {
    let config = OpenAIConfig::dashscope("sk-test").with_base_url(format!("{}/v1", server.uri()));
    Client::new(OpenAI::from_config(config).unwrap())
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_extracts_prices_verbatim_and_volume_as_digits() {
    let server = server_replying(
        r#"{"日期":"2023-08-01","股票名称":"股票A","开盘价":"10.00","收盘价":"10.50","成交量":"100万股"}"#,
    )
    .await;
    let client = client_for(&server);

    let result = client.extract(&stock_extractor(), NEWS_A).await.unwrap();

    assert_eq!(result.get("日期"), Some("2023-08-01"));
    assert_eq!(result.get("开盘价"), Some("10.00"));
    assert_eq!(result.get("收盘价"), Some("10.50"));
    assert_eq!(result.get("成交量"), Some("1000000"));
}

#[test_log::test(tokio::test)]
async fn test_request_shape() {
    let server = server_replying(r#"{"日期":"2023-08-01"}"#).await;
    let client = client_for(&server);

    client.extract(&stock_extractor(), NEWS_A).await.unwrap();

    let body = sent_body(&server).await;
    assert_eq!(body["response_format"], json!({"type": "json_object"}));
    assert_eq!(body["model"], "qwen3-max");

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");

    let user = messages[1]["content"].as_str().unwrap();
    assert!(user.contains("输入：【科技龙头股逆势上扬】"));
    assert!(user.contains(r#""股票名称":"华兴科技""#));
    assert!(user.ends_with(NEWS_A));
}

#[test_log::test(tokio::test)]
async fn test_result_keys_are_exactly_the_schema() {
    let server = server_replying(
        r#"{"股票名称":"稳健银行","开盘价":"8.75","涨跌幅":"-0.5%","成交量":"210万股","收盘价":""}"#,
    )
    .await;
    let client = client_for(&server);

    let result = client.extract(&stock_extractor(), NEWS_BANK).await.unwrap();

    let keys: Vec<&str> = result.keys().collect();
    assert_eq!(keys, vec!["日期", "股票名称", "开盘价", "收盘价", "成交量"]);
    assert_eq!(result.get("收盘价"), None);
    assert_eq!(result.get("日期"), None);
    assert_eq!(result.get("成交量"), Some("2100000"));
    assert_eq!(
        result.to_json(),
        json!({
            "日期": "",
            "股票名称": "稳健银行",
            "开盘价": "8.75",
            "收盘价": "",
            "成交量": "2100000"
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_non_json_reply_is_parse_error() {
    let server = server_replying("日期：2024-06-03，股票名称：稳健银行").await;
    let client = client_for(&server);

    let error = client.extract(&stock_extractor(), NEWS_BANK).await.unwrap_err();
    assert!(error.is_parse());
    assert!(matches!(error, Error::Parse { .. }));
}

#[test_log::test(tokio::test)]
async fn test_extractor_without_json_mode() {
    let server = server_replying(r#"{"股票名称":"稳健银行"}"#).await;
    let provider = OpenAI::from_config(
        OpenAIConfig::xunfei("k").with_base_url(format!("{}/v1", server.uri())),
    )
    .unwrap();

    let result = stock_extractor()
        .json_mode(false)
        .extract(&provider, NEWS_BANK)
        .await
        .unwrap();
    assert_eq!(result.get("股票名称"), Some("稳健银行"));

    let body = sent_body(&server).await;
    assert!(body.get("response_format").is_none());
    assert_eq!(body["model"], "xop3qwen1b7");
    assert_eq!(body["max_tokens"], 2048);
}
