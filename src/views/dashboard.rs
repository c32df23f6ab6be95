//! Dashboard: statistic cards, chart series and the AI report panel

use serde::Serialize;

use crate::model::Refugee;
use crate::report::SituationReporter;
use crate::stats::DashboardStats;

/// Shown in the report panel before a report has been generated
pub const REPORT_PLACEHOLDER: &str =
    "คลิก \"สร้างรายงาน\" เพื่อให้ Gemini AI วิเคราะห์ข้อมูลและสรุปความต้องการรวมถึงข้อเสนอแนะในการจัดสรรทรัพยากร";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    /// `stats.critical_rate` formatted for the card
    pub critical_rate_display: String,
    /// Last generated report (Markdown), if any
    pub report: Option<String>,
}

impl DashboardView {
    pub fn build(records: &[Refugee]) -> Self {
        let stats = DashboardStats::compute(records);
        Self {
            critical_rate_display: stats.critical_rate_display(),
            stats,
            report: None,
        }
    }

    /// Generate the situation report for `records` and keep it on the view
    pub async fn generate_report(
        &mut self,
        reporter: &SituationReporter,
        records: &[Refugee],
    ) -> &str {
        let report = reporter.generate(records).await;
        self.report.insert(report).as_str()
    }

    /// Report text, or the placeholder prompt
    pub fn report_text(&self) -> &str {
        self.report.as_deref().unwrap_or(REPORT_PLACEHOLDER)
    }
}
