use crate::utils::error::Result;
use regex::{Regex, RegexBuilder};

/// The (customer, customer code) pair written to the import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub code: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl Default for Customer {
    fn default() -> Self {
        Self::new("Get-e", "Get-e")
    }
}

#[derive(Debug, Clone)]
pub struct CrewRule {
    pattern: Regex,
    customer: Customer,
}

impl CrewRule {
    /// Compiles `pattern` case-insensitively.
    pub fn new(pattern: &str, customer: Customer) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern, customer })
    }
}

/// Ordered passenger-name rules; the first rule whose pattern is found wins.
#[derive(Debug, Clone)]
pub struct CrewClassifier {
    rules: Vec<CrewRule>,
    fallback: Customer,
}

impl CrewClassifier {
    pub fn new(rules: Vec<CrewRule>, fallback: Customer) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[CrewRule] {
        &self.rules
    }

    pub fn classify(&self, passenger_name: &str) -> &Customer {
        let name = passenger_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&name))
            .map(|rule| &rule.customer)
            .unwrap_or(&self.fallback)
    }

    pub fn builtin() -> Result<Self> {
        let rules = [
            ("(lh|lufthansa|a000)", "LH Crew", "Get-e Lufthansa"),
            ("(sk|sas)", "SK Crew", "Get-e SAS"),
            ("(ryr|ryanair|fr)", "Ryanair Crew", "Get-e Lufthansa"),
        ]
        .into_iter()
        .map(|(pattern, name, code)| CrewRule::new(pattern, Customer::new(name, code)))
        .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(rules, Customer::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str) -> (String, String) {
        let classifier = CrewClassifier::builtin().unwrap();
        let customer = classifier.classify(name);
        (customer.name.clone(), customer.code.clone())
    }

    #[test]
    fn test_lufthansa_crew() {
        assert_eq!(
            classify("LH441 Captain"),
            ("LH Crew".to_string(), "Get-e Lufthansa".to_string())
        );
        assert_eq!(classify("Lufthansa Crew A").0, "LH Crew");
        assert_eq!(classify("A0001234").0, "LH Crew");
    }

    #[test]
    fn test_sas_crew() {
        assert_eq!(
            classify("SK 1234"),
            ("SK Crew".to_string(), "Get-e SAS".to_string())
        );
    }

    #[test]
    fn test_ryanair_crew_uses_lufthansa_code() {
        assert_eq!(
            classify("Ryanair FO Smith"),
            ("Ryanair Crew".to_string(), "Get-e Lufthansa".to_string())
        );
    }

    #[test]
    fn test_unmatched_name_gets_default() {
        assert_eq!(
            classify("John Doe"),
            ("Get-e".to_string(), "Get-e".to_string())
        );
        assert_eq!(classify("").0, "Get-e");
    }

    #[test]
    fn test_rule_order_beats_match_length() {
        // Both the SK and LH patterns match; LH is listed first.
        assert_eq!(classify("SAS Lufthansa joint").0, "LH Crew");
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(CrewRule::new("(unclosed", Customer::default()).is_err());
    }
}
