pub mod action_id;
pub mod section_date;
pub mod update_row;

use chrono::TimeZone;
use getset::Getters;
use log::trace;
use scraper::Html;

use crate::schema::{JobUpdateRecord, SectionKind, SkillKey};

use self::{action_id::classify, section_date::parse_section_update, update_row::UpdateRow};

/// Everything extracted from a single job guide page.
#[derive(Debug, Getters)]
#[getset(get = "pub")]
pub struct JobPage {
    /// Section labels first, then skills in document order.
    record: JobUpdateRecord,
    /// Every classified update row, including those whose key was overwritten in `record`.
    updates: Vec<(SkillKey, UpdateRow)>,
}

impl JobPage {
    pub fn into_parts(self) -> (JobUpdateRecord, Vec<(SkillKey, UpdateRow)>) {
        (self.record, self.updates)
    }
}

pub fn parse_job_page<Tz: TimeZone>(html: &Html, tz: &Tz) -> JobPage {
    let mut record = JobUpdateRecord::default();
    for kind in SectionKind::ALL {
        if let Some(label) = parse_section_update(html, kind, tz) {
            record.insert_section_label(kind, label);
        }
    }

    let mut updates = vec![];
    for row in update_row::parse_update_rows(html) {
        match classify(row.action_id()) {
            Some(skill) => {
                record.insert_skill(skill.clone());
                updates.push((skill, row));
            }
            None => trace!("Not a skill row: {:?}", row.action_id()),
        }
    }

    JobPage { record, updates }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use scraper::Html;

    use super::parse_job_page;
    use crate::schema::{FlagValue, RecordKey, SectionKind, SkillCategory as C, SkillKey};

    #[test]
    fn single_valid_row() {
        let html = Html::parse_document(
            r#"<html><body><table>
            <tr class="update js__jobguide_update_one hide" data-updated="1700000000"></tr>
            <tr id="pve_action__12"></tr>
            <tr class="update js__jobguide_update_one hide" data-updated="0"></tr>
            <tr id="pve_action__13"></tr>
            </table></body></html>"#,
        );
        let page = parse_job_page(&html, &Utc);
        assert_eq!(page.record().len(), 1);
        assert_eq!(
            page.record()
                .get(&RecordKey::Skill(SkillKey::new(C::PveSkill, 12))),
            Some(&FlagValue::Updated)
        );
        assert_eq!(page.updates().len(), 1);
    }

    #[test]
    fn sections_first_then_skills_in_document_order() {
        let html = Html::parse_document(
            r#"<html><body>
            <div class="js__select--pvp">
              <p class="job__update"><span id="datetime-pvp"></span></p>
              <table>
                <tr class="update js__jobguide_update_one hide" data-updated="1700000000"></tr>
                <tr id="pvplimitbreakaction_1"></tr>
                <tr class="update js__jobguide_update_one hide" data-updated="1700000000"></tr>
                <tr id="pvp_action__4"></tr>
                <tr class="update js__jobguide_update_one hide" data-updated="1700000000"></tr>
                <tr id="unknown_prefix__1"></tr>
              </table>
            </div>
            <div class="js__select--pve">
              <p class="job__update"><span id="datetime-pve"></span></p>
              <table>
                <tr class="update js__jobguide_update_one hide" data-updated="1700000000"></tr>
                <tr id="trait_action__2"></tr>
                <tr class="update js__jobguide_update_one hide" data-updated="1700000001"></tr>
                <tr id="pvp_action__4"></tr>
              </table>
            </div>
            <script>document.getElementById('datetime-pve').innerHTML = ldst_strftime(1700000000, 'YMD');</script>
            <script>document.getElementById('datetime-pvp').innerHTML = ldst_strftime(1600000000, 'YMD');</script>
            </body></html>"#,
        );
        let page = parse_job_page(&html, &Utc);
        let keys = page
            .record()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                "PVE Update",
                "PVP Update",
                "PVP Skill LB1",
                "PVP Skill 04",
                "Trait 02",
            ]
        );
        assert_eq!(
            page.record()
                .section_labels()
                .collect::<Vec<_>>(),
            [
                (SectionKind::Pve, "Last updated: 14/11/2023"),
                (SectionKind::Pvp, "Last updated: 13/09/2020"),
            ]
        );
        // The duplicated key still shows up as two updates.
        assert_eq!(page.updates().len(), 4);
    }

    #[test]
    fn empty_page() {
        let html = Html::parse_document("<html><body><p>Maintenance</p></body></html>");
        let page = parse_job_page(&html, &Utc);
        assert!(page.record().is_empty());
        assert!(page.updates().is_empty());
    }
}
