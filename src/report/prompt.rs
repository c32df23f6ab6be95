//! Situation report prompt
//!
//! The prompt carries only aggregates: the head count, a per-shelter
//! population summary and the reported medical needs. The needs list is
//! capped so the prompt does not grow with the record set.

use crate::model::Refugee;
use crate::stats::{medical_needs, DashboardStats};

/// Default cap on medical-needs entries quoted in the prompt
pub const DEFAULT_MAX_MEDICAL_NEEDS: usize = 50;

/// "A (2 คน), B (1 คน)"
pub fn shelter_summary(stats: &DashboardStats) -> String {
    stats
        .shelter_distribution
        .iter()
        .map(|nv| format!("{} ({} คน)", nv.name, nv.value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined medical needs, at most `max_needs` of them followed by a
/// count of the ones left out.
pub fn needs_summary(records: &[Refugee], max_needs: usize) -> String {
    let needs: Vec<&str> = medical_needs(records).collect();
    if needs.len() <= max_needs {
        return needs.join(", ");
    }

    let omitted = needs.len() - max_needs;
    let mut summary = needs[..max_needs].join(", ");
    if !summary.is_empty() {
        summary.push_str(", ");
    }
    summary.push_str(&format!("และอีก {} รายการ", omitted));
    summary
}

/// Build the report prompt for a record set
pub fn build_prompt(records: &[Refugee], max_needs: usize) -> String {
    let stats = DashboardStats::compute(records);

    format!(
        "วิเคราะห์ข้อมูลสรุปของผู้อพยพต่อไปนี้ และจัดทำรายงานสถานการณ์ด้านมนุษยธรรมแบบมืออาชีพโดยย่อ (ไม่เกิน 150 คำ)\n\
         \n\
         จำนวนผู้อพยพทั้งหมด: {}\n\
         สถิติตามศูนย์พักพิง: {}\n\
         ความต้องการทางการแพทย์ที่รายงาน: {}\n\
         \n\
         โดยเน้นที่ความหนาแน่นของประชากรในแต่ละศูนย์พักพิง ความต้องการเร่งด่วน และข้อเสนอแนะในการจัดสรรทรัพยากรไปยังศูนย์ต่างๆ\n\
         ตอบกลับเป็นภาษาไทย ในรูปแบบ Markdown",
        stats.total,
        shelter_summary(&stats),
        needs_summary(records, max_needs),
    )
}
