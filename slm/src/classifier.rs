use std::collections::{BTreeMap, HashMap};

const DEFAULT_SEVERITIES: [(&str, u32); 13] = [
    ("light traffic", 0),
    ("moderate traffic", 1),
    ("heavy traffic", 2),
    ("rain", 1),
    ("snow", 2),
    ("storm", 3),
    ("fog", 1),
    ("clear", 0),
    ("cloudy", 0),
    ("road block", 3),
    ("accident", 2),
    ("flood", 3),
    ("construction", 2),
];

/// Keyword -> severity table. Keywords are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTable {
    entries: BTreeMap<String, u32>,
}

impl SeverityTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Blank keywords are ignored: they would match every description.
    pub fn insert(&mut self, keyword: impl AsRef<str>, severity: u32) {
        let keyword = keyword.as_ref().trim().to_lowercase();
        if keyword.is_empty() {
            tracing::warn!(severity, "ignoring blank scenario keyword");
            return;
        }
        self.entries.insert(keyword, severity);
    }

    pub fn severity(&self, keyword: &str) -> Option<u32> {
        self.entries.get(&keyword.to_lowercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        DEFAULT_SEVERITIES.iter().copied().collect()
    }
}

impl<K: AsRef<str>> FromIterator<(K, u32)> for SeverityTable {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut table = Self::empty();
        for (keyword, severity) in iter {
            table.insert(keyword, severity);
        }
        table
    }
}

impl From<HashMap<String, u32>> for SeverityTable {
    fn from(map: HashMap<String, u32>) -> Self {
        map.into_iter().collect()
    }
}

/// Turns a free-text condition description into an edge penalty.
///
/// Matching is case-insensitive substring matching, so a keyword inside a
/// longer word counts ("rain" matches "training"). Several matches do not
/// accumulate: the penalty is the highest matched severity, or 0.
#[derive(Debug, Clone, Default)]
pub struct ScenarioClassifier {
    table: SeverityTable,
}

impl ScenarioClassifier {
    pub fn new(table: SeverityTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SeverityTable {
        &self.table
    }

    pub fn weight_for(&self, scenario: &str) -> u32 {
        let normalized = scenario.to_lowercase();
        self.table
            .iter()
            .filter(|(keyword, _)| normalized.contains(keyword))
            .map(|(_, severity)| severity)
            .max()
            .unwrap_or(0)
    }

    /// Matched keywords with their severities, in keyword order.
    pub fn matches(&self, scenario: &str) -> Vec<(&str, u32)> {
        let normalized = scenario.to_lowercase();
        self.table
            .iter()
            .filter(|(keyword, _)| normalized.contains(keyword))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_penalty() {
        assert_eq!(ScenarioClassifier::default().weight_for(""), 0);
    }

    #[test]
    fn test_max_severity_wins_case_insensitive() {
        let classifier = ScenarioClassifier::default();
        assert_eq!(classifier.weight_for("Heavy Traffic and Storm"), 3);
        assert_eq!(classifier.weight_for("HEAVY TRAFFIC"), 2);
    }

    #[test]
    fn test_unrelated_text_has_no_penalty() {
        assert_eq!(ScenarioClassifier::default().weight_for("unrelated text"), 0);
    }

    #[test]
    fn test_matches_do_not_accumulate() {
        let classifier = ScenarioClassifier::default();
        // rain=1, fog=1, moderate traffic=1
        assert_eq!(classifier.weight_for("rain, fog and moderate traffic"), 1);
    }

    #[test]
    fn test_substring_matching_inside_words() {
        let classifier = ScenarioClassifier::default();
        assert_eq!(classifier.weight_for("drivers in training"), 1);
        assert_eq!(classifier.weight_for("snowfall expected"), 2);
    }

    #[test]
    fn test_matches_lists_keywords() {
        let classifier = ScenarioClassifier::default();
        let matched = classifier.matches("Clear skies, light traffic, minor accident");
        assert_eq!(
            matched,
            vec![("accident", 2), ("clear", 0), ("light traffic", 0)]
        );
    }

    #[test]
    fn test_custom_table_is_lowercased() {
        let table: SeverityTable = [("Hail", 4), ("  ", 9)].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.severity("HAIL"), Some(4));

        let classifier = ScenarioClassifier::new(table);
        assert_eq!(classifier.weight_for("hail and storm"), 4);
        assert_eq!(classifier.weight_for("storm"), 0);
    }

    #[test]
    fn test_default_table_contents() {
        let table = SeverityTable::default();
        assert_eq!(table.len(), 13);
        assert_eq!(table.severity("road block"), Some(3));
        assert_eq!(table.severity("cloudy"), Some(0));
        assert_eq!(ScenarioClassifier::default().table(), &table);
    }
}
