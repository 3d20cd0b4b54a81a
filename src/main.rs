// ==========================================
// 门店排班系统 - 演示主入口
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统
// ==========================================
// 流程: 合成数据 -> 管线编排 -> 控制台表格 + CSV 报表
// 真实部署时以 SQLite 变体与真实传输替换内存变体与脚本传输
// ==========================================

use chrono::{Duration, Utc};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use store_roster_aps::api::RosterApi;
use store_roster_aps::config::RosterConfig;
use store_roster_aps::engine::PipelineOrchestrator;
use store_roster_aps::forecast::{
    ChatTurn, ExchangeForecastProvider, ScriptedTransport, StaticWeatherResolver,
    TransportCommentaryGenerator,
};
use store_roster_aps::generator;
use store_roster_aps::repository::{InMemoryEmployeeSource, InMemoryTransactionSource};
use store_roster_aps::report;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 初始化日志系统
    store_roster_aps::logging::init();

    tracing::info!("==================================================");
    tracing::info!("门店排班系统 - 决策支持系统");
    tracing::info!("系统版本: {}", store_roster_aps::VERSION);
    tracing::info!("==================================================");

    let config = RosterConfig::default();
    let now = Utc::now();

    // ==========================================
    // 合成数据 (内存变体)
    // ==========================================
    tracing::info!("正在生成合成数据...");
    let transactions = generator::generate_transactions(12, now);
    let employees = generator::generate_employees(10);
    tracing::info!(
        transactions = transactions.len(),
        employees = employees.len(),
        "合成数据生成完成"
    );

    let tx_source = Arc::new(InMemoryTransactionSource::new(transactions));
    let emp_source = Arc::new(InMemoryEmployeeSource::new(employees));

    // ==========================================
    // 脚本化预测交互 (模拟外部文本生成协作方)
    // ==========================================
    // 一次天气检索 + 一次 JSON 终结输出: 第 3/6 天降雨 0.7,其余 1.1
    let start = now.date_naive() + Duration::days(config.horizon_offset_days);
    let multipliers: Vec<String> = (0..config.horizon_days)
        .map(|i| {
            let date = start + Duration::days(i);
            let m = if i == 2 || i == 5 { 0.7 } else { 1.1 };
            format!("\"{}\": {}", date, m)
        })
        .collect();
    let final_json = format!("{{{}}}", multipliers.join(", "));

    let forecast_transport = Arc::new(ScriptedTransport::new(vec![
        ChatTurn::ToolCall {
            name: "web_search".to_string(),
            input: serde_json::json!({"query": format!("weather forecast {}", config.location)}),
        },
        ChatTurn::FinalText(final_json),
    ]));
    let forecaster = Arc::new(ExchangeForecastProvider::new(
        forecast_transport,
        Arc::new(StaticWeatherResolver::new(&config.location)),
        config.forecast_max_rounds,
        config.default_multiplier,
    ));

    let commentary_transport = Arc::new(ScriptedTransport::new(vec![
        ChatTurn::FinalText(
            "周末晚班为全周高峰,建议晚班配置 3 人;工作日早班 10 点后客流爬升。".to_string(),
        ),
        ChatTurn::FinalText("第 3/6 天有降雨,客流预计回落约 30%,其余日期温和偏多。".to_string()),
    ]));
    let commentator = Arc::new(TransportCommentaryGenerator::new(commentary_transport));

    // ==========================================
    // 管线编排 + 业务 API
    // ==========================================
    let orchestrator = Arc::new(PipelineOrchestrator::new(
        tx_source.clone(),
        emp_source.clone(),
        forecaster,
        commentator,
        None,
        config.clone(),
    ));
    let api = RosterApi::new(orchestrator, tx_source, emp_source, config);

    let stats = api.stats().await?;
    tracing::info!(
        total_transactions = stats.total_transactions,
        total_employees = stats.total_employees,
        location = %stats.location,
        "系统就绪"
    );

    let query = "下周如何排班才能高效承接客流?";
    let bundle = api.generate_roster(query).await?;

    // ==========================================
    // 输出
    // ==========================================
    println!("{}", report::render_table(&bundle));

    if !bundle.demand_commentary.is_empty() {
        println!("需求分析: {}", bundle.demand_commentary);
    }
    if !bundle.forecast_commentary.is_empty() {
        println!("预测影响: {}", bundle.forecast_commentary);
    }

    let csv_path = Path::new("store_roster_schedule.csv");
    report::write_csv(&bundle, csv_path)?;
    tracing::info!(path = %csv_path.display(), "CSV 报表已生成");

    tracing::info!(
        run_id = %bundle.run_id,
        understaffed = bundle.understaffed_count(),
        forecast_source = %bundle.forecast_source,
        "排班演示完成"
    );

    Ok(())
}
