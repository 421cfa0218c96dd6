//! Severity classification of one encounter.
//!
//! The rule is a three-step decision table, first match wins:
//!
//! 1. a known stay of at least [`MIN_SEVERE_STAY_DAYS`] days in an admitted
//!    encounter is severe;
//! 2. an outcome description containing the death indicator is severe;
//! 3. anything else is mild.
//!
//! An unknown stay length never satisfies step 1.

use covid_model::{SeverityClass, Vocabulary};

/// Shortest admitted stay, in days, classified as severe.
pub const MIN_SEVERE_STAY_DAYS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRule {
    pub min_stay_days: i64,
    /// Encounter type of inpatient stays, matched exactly.
    pub admitted_category: String,
    /// Substring of outcome descriptions recording a death, matched case-sensitively.
    pub death_indicator: String,
}

impl Default for SeverityRule {
    fn default() -> Self {
        Self::for_vocabulary(Vocabulary::default())
    }
}

impl SeverityRule {
    pub fn new(
        min_stay_days: i64,
        admitted_category: impl Into<String>,
        death_indicator: impl Into<String>,
    ) -> Self {
        Self {
            min_stay_days,
            admitted_category: admitted_category.into(),
            death_indicator: death_indicator.into(),
        }
    }

    pub fn for_vocabulary(vocabulary: Vocabulary) -> Self {
        Self::new(
            MIN_SEVERE_STAY_DAYS,
            vocabulary.admitted_category(),
            vocabulary.death_indicator(),
        )
    }

    pub fn classify(
        &self,
        duration_days: Option<i64>,
        encounter_type: &str,
        outcome_description: &str,
    ) -> SeverityClass {
        let long_admission = duration_days.is_some_and(|days| days >= self.min_stay_days)
            && encounter_type == self.admitted_category;
        if long_admission {
            return SeverityClass::Severe;
        }
        if !self.death_indicator.is_empty() && outcome_description.contains(&self.death_indicator)
        {
            return SeverityClass::Severe;
        }
        SeverityClass::Mild
    }
}

/// Classifies one encounter with the default (English) vocabulary.
pub fn classify_severity(
    duration_days: Option<i64>,
    encounter_type: &str,
    outcome_description: &str,
) -> SeverityClass {
    SeverityRule::default().classify(duration_days, encounter_type, outcome_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_admission_is_severe() {
        assert_eq!(
            classify_severity(Some(12), "admitted", "discharged"),
            SeverityClass::Severe
        );
        assert_eq!(
            classify_severity(Some(10), "admitted", ""),
            SeverityClass::Severe
        );
    }

    #[test]
    fn death_wins_regardless_of_stay() {
        assert_eq!(
            classify_severity(Some(3), "ambulatory", "patient died"),
            SeverityClass::Severe
        );
        assert_eq!(
            classify_severity(None, "", "died at home"),
            SeverityClass::Severe
        );
    }

    #[test]
    fn unknown_stay_falls_through() {
        assert_eq!(
            classify_severity(None, "admitted", "recovered"),
            SeverityClass::Mild
        );
    }

    #[test]
    fn short_stay_is_mild() {
        assert_eq!(
            classify_severity(Some(9), "admitted", "recovered"),
            SeverityClass::Mild
        );
    }

    #[test]
    fn long_stay_outside_admission_is_mild() {
        assert_eq!(
            classify_severity(Some(30), "ambulatory", "recovered"),
            SeverityClass::Mild
        );
        assert_eq!(
            classify_severity(Some(30), "Admitted", "recovered"),
            SeverityClass::Mild
        );
    }

    #[test]
    fn portuguese_vocabulary_is_diacritic_sensitive() {
        let rule = SeverityRule::for_vocabulary(Vocabulary::Pt);
        assert_eq!(
            rule.classify(Some(15), "Internado", "Alta"),
            SeverityClass::Severe
        );
        assert_eq!(
            rule.classify(Some(1), "Pronto Atendimento", "Óbito após 48 horas"),
            SeverityClass::Severe
        );
        assert_eq!(
            rule.classify(Some(1), "Pronto Atendimento", "Obito"),
            SeverityClass::Mild
        );
        assert_eq!(
            rule.classify(Some(1), "Pronto Atendimento", "óbito"),
            SeverityClass::Mild
        );
    }

    #[test]
    fn empty_indicator_never_matches() {
        let rule = SeverityRule::new(10, "admitted", "");
        assert_eq!(rule.classify(None, "admitted", "anything"), SeverityClass::Mild);
    }
}
