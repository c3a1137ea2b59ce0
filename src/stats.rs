use std::fmt::{self, Display};

use enum_map::EnumMap;
use getset::{CopyGetters, Getters};
use itertools::Itertools;

use crate::{
    job::JobCode,
    schema::{JobUpdateRecord, SkillCategory},
};

#[derive(Clone, Default, Debug, Getters, CopyGetters)]
pub struct RunStats {
    #[getset(get_copy = "pub")]
    total_jobs: usize,
    /// Jobs that contributed a non-empty record.
    #[getset(get_copy = "pub")]
    processed_jobs: usize,
    #[getset(get_copy = "pub")]
    total_skills: usize,
    #[getset(get_copy = "pub")]
    dated_sections: usize,
    #[getset(get = "pub")]
    per_category: EnumMap<SkillCategory, usize>,
    #[getset(get = "pub")]
    failed_jobs: Vec<JobCode>,
}

impl RunStats {
    pub fn new(total_jobs: usize) -> Self {
        Self {
            total_jobs,
            ..Default::default()
        }
    }

    pub fn record_job(&mut self, record: &JobUpdateRecord) {
        self.processed_jobs += 1;
        for skill in record.skills() {
            self.total_skills += 1;
            self.per_category[skill.category()] += 1;
        }
        self.dated_sections += record.section_labels().count();
    }

    pub fn record_failure(&mut self, code: JobCode) {
        self.failed_jobs.push(code);
    }
}

impl Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} of {} jobs",
            self.processed_jobs, self.total_jobs
        )?;
        writeln!(f, "Found {} flags in total", self.total_skills)?;
        for (category, count) in &self.per_category {
            writeln!(f, "{category}: {count}")?;
        }
        write!(f, "Dated sections: {}", self.dated_sections)?;
        if !self.failed_jobs.is_empty() {
            write!(f, "\nFailed: {}", self.failed_jobs.iter().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RunStats;
    use crate::schema::{JobUpdateRecord, SectionKind, SkillCategory as C, SkillKey};

    #[test]
    fn accumulates_per_category() {
        let mut stats = RunStats::new(3);

        let mut record = JobUpdateRecord::default();
        record.insert_section_label(SectionKind::Pve, "Last updated: 14/11/2023".to_owned());
        record.insert_skill(SkillKey::new(C::PveSkill, 1));
        record.insert_skill(SkillKey::new(C::PveSkill, 2));
        record.insert_skill(SkillKey::new(C::LimitBreak, 1));
        stats.record_job(&record);

        let mut record = JobUpdateRecord::default();
        record.insert_skill(SkillKey::new(C::Trait, 9));
        stats.record_job(&record);

        stats.record_failure("WAR".into());

        assert_eq!(stats.processed_jobs(), 2);
        assert_eq!(stats.total_skills(), 4);
        assert_eq!(stats.dated_sections(), 1);
        assert_eq!(stats.per_category()[C::PveSkill], 2);
        assert_eq!(stats.per_category()[C::PvpSkill], 0);
        assert_eq!(stats.per_category()[C::Trait], 1);
        assert_eq!(stats.per_category()[C::LimitBreak], 1);

        assert_eq!(
            stats.to_string(),
            "Processed 2 of 3 jobs\n\
             Found 4 flags in total\n\
             PVE Skills: 2\n\
             PVP Skills: 0\n\
             Traits: 1\n\
             PVP Limit Break: 1\n\
             Dated sections: 1\n\
             Failed: WAR"
        );
    }
}
