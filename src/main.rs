// ==========================================
// 设施资产管理系统 - 命令行主入口
// ==========================================
// 用法: facility-ops [db_path] [YYYY-MM]
// 输出: 驾驶舱汇总 + 指定月份维护日历 (JSON)
// ==========================================

use anyhow::{anyhow, Context};
use chrono::Local;
use facility_ops::app::{get_default_db_path, AppState};
use facility_ops::domain::CalendarMonth;
use facility_ops::logging;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", facility_ops::APP_NAME, facility_ops::VERSION);
    tracing::info!("==================================================");

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let today = Local::now().date_naive();

    let month = match std::env::args().nth(2) {
        Some(raw) => CalendarMonth::parse(&raw)
            .ok_or_else(|| anyhow!("月份格式应为 YYYY-MM: {}", raw))?,
        None => CalendarMonth::of(today),
    };

    tracing::info!("使用数据库: {}", db_path);
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let summary = state
        .dashboard_api
        .summary(today)
        .context("驾驶舱汇总失败")?;
    let calendar = state
        .maintenance_api
        .get_calendar(month.year(), month.month(), today)
        .context("维护日历生成失败")?;

    let output = json!({
        "summary": summary,
        "calendar": calendar,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
