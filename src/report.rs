// ==========================================
// 门店排班系统 - 报表输出
// ==========================================
// 职责: 消费结果包,产出 CSV 报表与控制台表格
// 红线: 只读消费,不回写任何数据
// ==========================================

use crate::domain::roster::RosterBundle;
use crate::i18n::{t, t_with_args};
use chrono::Utc;
use csv::WriterBuilder;
use std::error::Error;
use std::path::Path;

/// 截断评论文本用于 CSV 摘要行
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// 将结果包写为 CSV 报表
///
/// 布局: 标题行 + 生成时间 + 排班明细 + 分析要点摘要
///
/// # 参数
/// - bundle: 编排结果包
/// - path: 输出文件路径
pub fn write_csv(bundle: &RosterBundle, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;

    // 标题区
    writer.write_record([t("report.title").as_str()])?;
    writer.write_record([t_with_args(
        "report.generated_at",
        &[("time", &Utc::now().format("%Y-%m-%d %H:%M").to_string())],
    )
    .as_str()])?;
    writer.write_record([""])?;

    // 排班明细
    writer.write_record([
        t("report.date"),
        t("report.day"),
        t("report.shift"),
        t("report.time"),
        t("report.orders_per_hour"),
        t("report.staff_needed"),
        t("report.staff_assigned"),
        t("report.employees"),
    ])?;

    for item in &bundle.roster {
        let employees: Vec<&str> = item.staff_assigned.iter().map(|e| e.name.as_str()).collect();
        writer.write_record([
            item.date.format("%Y-%m-%d").to_string(),
            item.day.clone(),
            item.shift.clone(),
            item.shift_time.clone(),
            format!("{:.1}", item.predicted_orders_per_hour),
            item.staff_needed.to_string(),
            item.staff_assigned.len().to_string(),
            employees.join(", "),
        ])?;
    }

    // 分析要点
    writer.write_record([""])?;
    writer.write_record([t("report.insights").as_str()])?;
    writer.write_record([
        t("report.traffic_analysis"),
        truncate(&bundle.demand_commentary, 200),
    ])?;
    writer.write_record([
        t("report.weather_impact"),
        truncate(&bundle.forecast_commentary, 200),
    ])?;

    writer.flush()?;
    Ok(())
}

/// 渲染控制台表格
///
/// # 参数
/// - bundle: 编排结果包
///
/// # 返回
/// 多行文本表格
pub fn render_table(bundle: &RosterBundle) -> String {
    let mut out = String::new();
    let line = "=".repeat(120);

    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!("{:^120}\n", t("report.title")));
    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "{:<12} {:<10} {:<8} {:<12} {:<12} {:<8} {:<50}\n",
        t("report.date"),
        t("report.day"),
        t("report.shift"),
        t("report.time"),
        t("report.orders_per_hour"),
        t("report.staff_needed"),
        t("report.employees"),
    ));
    out.push_str(&"-".repeat(120));
    out.push('\n');

    for item in &bundle.roster {
        let employees = if item.staff_assigned.is_empty() {
            t("report.understaffed")
        } else {
            item.staff_assigned
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        out.push_str(&format!(
            "{:<12} {:<10} {:<8} {:<12} {:<12.1} {:<8} {:<50}\n",
            item.date.format("%Y-%m-%d").to_string(),
            item.day,
            item.shift,
            item.shift_time,
            item.predicted_orders_per_hour,
            format!("{}/{}", item.staff_assigned.len(), item.staff_needed),
            employees,
        ));
    }

    out.push_str(&line);
    out.push('\n');
    out
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeRef;
    use crate::domain::roster::ShiftAssignment;
    use crate::domain::types::ForecastSource;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_bundle() -> RosterBundle {
        RosterBundle {
            run_id: Uuid::new_v4(),
            query: "下周怎么排班?".to_string(),
            demand_commentary: "周末晚班是高峰。".to_string(),
            forecast_commentary: "周三有雨,客流回落。".to_string(),
            roster: vec![
                ShiftAssignment {
                    date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
                    day: "Monday".to_string(),
                    shift: "morning".to_string(),
                    shift_time: "08:00-16:00".to_string(),
                    staff_needed: 2,
                    staff_assigned: vec![EmployeeRef {
                        employee_id: 1,
                        name: "Alex Chen".to_string(),
                    }],
                    predicted_orders_per_hour: 23.4,
                },
                ShiftAssignment {
                    date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
                    day: "Monday".to_string(),
                    shift: "evening".to_string(),
                    shift_time: "16:00-00:00".to_string(),
                    staff_needed: 2,
                    staff_assigned: vec![],
                    predicted_orders_per_hour: 31.0,
                },
            ],
            planning_dates: vec![NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()],
            forecast_source: ForecastSource::Exchange,
        }
    }

    #[test]
    fn test_render_table_marks_understaffed() {
        let table = render_table(&sample_bundle());
        assert!(table.contains("Alex Chen"));
        assert!(table.contains("2026-08-10"));
        // 空排班槽位标记缺员
        assert!(table.contains(&t("report.understaffed")));
    }

    #[test]
    fn test_write_csv_produces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        write_csv(&sample_bundle(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Alex Chen"));
        assert!(content.contains("23.4"));
    }
}
