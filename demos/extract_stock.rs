//! Few-shot extraction of stock quotes from news items

use dashlm::client::{Client, Example, Extractor, Schema};
use dashlm::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn examples() -> anyhow::Result<Vec<Example>> {
    Ok(vec![
        Example::new(
            "【科技龙头股逆势上扬】2024年3月15日，科技创新板明星企业华兴科技表现突出。该股开盘报25.80元，上午时段震荡整理，午后在大单资金流入的推动下快速拉升，最终收于27.35元，涨幅5.98%。全日成交金额达2.8亿元，换手率超过8%，显示机构资金积极布局，市场对其在人工智能领域的突破性进展给予高度认可。",
            json!({
                "日期": "2024-03-15",
                "股票名称": "华兴科技",
                "开盘价": "25.80",
                "收盘价": "27.35",
                "成交量": "1085300"
            }),
        )?,
        Example::new(
            "【新能源汽车板块遇冷回调】2024年4月8日，绿能动力股价承压下行。该股以42.60元低开，盘中一度下探至40.20元，虽有小幅反弹，但最终收报40.85元，跌幅达4.09%。成交量萎缩至45万股，创下近一个月新低，表明市场情绪偏谨慎，投资者对行业政策变化持观望态度，短期抛压仍需时间消化。",
            json!({
                "日期": "2024-04-08",
                "股票名称": "绿能动力",
                "开盘价": "42.60",
                "收盘价": "40.85",
                "成交量": "450000"
            }),
        )?,
    ])
}

const QUESTIONS: [&str; 2] = [
    "【消费电子股震荡走高】2024年5月20日，蓝海电子表现不俗。该股以18.50元开盘，全天维持震荡上行态势，盘中最高触及19.80元，最终收于19.45元，涨幅5.14%。成交量达到88万股，市场交投活跃，机构投资者对其在新品研发方面的进展表示认可，看好未来业绩增长潜力。",
    "【银行板块整体回调】2024年6月3日，稳健银行股价出现调整。该股开盘价为8.75元，受市场整体情绪影响，早盘即承压下行，午后有所回升但力度有限成交量温和放大至210万股，显示部分资金选择离场观望，投资者关注后续政策导向变化。",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::new(OpenAI::dashscope_from_env()?);
    let schema = Schema::new(["日期", "股票名称", "开盘价", "收盘价", "成交量"])?;
    let extractor = Extractor::new(schema)?
        .with_task("股票信息")
        .with_examples(examples()?);

    for question in QUESTIONS {
        let result = client.extract(&extractor, question).await?;
        println!("原文：{}\n提取结果：{}\n{}\n", question, result, "=".repeat(80));
    }

    Ok(())
}
