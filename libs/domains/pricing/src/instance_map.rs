//! Instance Class Equivalence
//!
//! Providers name comparable VM sizes differently. Configurations use a
//! canonical class (AWS naming) and each calculator resolves it to the
//! nearest equivalent offered by its own provider.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::CloudProvider;

/// Maps a canonical instance class to a provider-specific one
#[cfg_attr(test, mockall::automock)]
pub trait InstanceClassResolver: Send + Sync {
    fn resolve(&self, canonical_class: &str, provider: CloudProvider) -> String;
}

/// Class priced when a canonical entry has no equivalent for `provider`
pub fn default_class(provider: CloudProvider) -> &'static str {
    match provider {
        CloudProvider::Aws => "t3.medium",
        CloudProvider::Azure => "B2s",
        CloudProvider::Gcp => "e2-medium",
    }
}

/// One row of the equivalence table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClassEquivalence {
    /// Canonical name, which is also the AWS class
    pub canonical: String,
    pub azure: Option<String>,
    pub gcp: Option<String>,
}

impl ClassEquivalence {
    fn new(canonical: &str, azure: &str, gcp: &str) -> Self {
        Self {
            canonical: canonical.to_string(),
            azure: Some(azure.to_string()),
            gcp: Some(gcp.to_string()),
        }
    }

    pub fn equivalent(&self, provider: CloudProvider) -> Option<&str> {
        match provider {
            CloudProvider::Aws => Some(self.canonical.as_str()),
            CloudProvider::Azure => self.azure.as_deref(),
            CloudProvider::Gcp => self.gcp.as_deref(),
        }
    }
}

/// Static cross-provider equivalence table.
///
/// Resolution:
/// - a known canonical class resolves to its listed equivalent, or to the
///   provider's [`default_class`] when that column is empty;
/// - anything else is passed through unchanged, so provider-native names
///   still price on their own provider and price at zero elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceTable {
    entries: Vec<ClassEquivalence>,
}

impl EquivalenceTable {
    pub fn new(entries: Vec<ClassEquivalence>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            ClassEquivalence::new("t3.micro", "B1s", "e2-micro"),
            ClassEquivalence::new("t3.small", "B1ms", "e2-small"),
            ClassEquivalence::new("t3.medium", "B2s", "e2-medium"),
            ClassEquivalence::new("t3.large", "B2ms", "e2-standard-2"),
            ClassEquivalence::new("t3.xlarge", "B4ms", "e2-standard-4"),
            ClassEquivalence::new("m5.large", "D2s_v3", "n1-standard-1"),
            ClassEquivalence::new("m5.xlarge", "D4s_v3", "n1-standard-2"),
            ClassEquivalence::new("c5.large", "F2s_v2", "n2-standard-2"),
            ClassEquivalence::new("c5.xlarge", "F4s_v2", "n2-standard-4"),
        ])
    }

    pub fn entries(&self) -> &[ClassEquivalence] {
        &self.entries
    }

    pub fn canonical_classes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical.as_str())
    }

    pub fn find(&self, canonical_class: &str) -> Option<&ClassEquivalence> {
        self.entries.iter().find(|e| e.canonical == canonical_class)
    }
}

impl Default for EquivalenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl InstanceClassResolver for EquivalenceTable {
    fn resolve(&self, canonical_class: &str, provider: CloudProvider) -> String {
        let Some(entry) = self.find(canonical_class) else {
            return canonical_class.to_string();
        };

        match entry.equivalent(provider) {
            Some(class) => class.to_string(),
            None => {
                let fallback = default_class(provider);
                tracing::debug!(
                    canonical_class,
                    %provider,
                    fallback,
                    "No equivalent instance class, using provider default"
                );
                fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::ProviderRateTable;

    #[test]
    fn test_resolve_builtin_equivalents() {
        let table = EquivalenceTable::builtin();
        assert_eq!(table.resolve("t3.medium", CloudProvider::Aws), "t3.medium");
        assert_eq!(table.resolve("t3.medium", CloudProvider::Azure), "B2s");
        assert_eq!(table.resolve("c5.xlarge", CloudProvider::Gcp), "n2-standard-4");
    }

    #[test]
    fn test_missing_column_uses_provider_default() {
        let table = EquivalenceTable::new(vec![ClassEquivalence {
            canonical: "r5.large".to_string(),
            azure: None,
            gcp: Some("n2-highmem-2".to_string()),
        }]);

        assert_eq!(table.resolve("r5.large", CloudProvider::Azure), "B2s");
        assert_eq!(table.resolve("r5.large", CloudProvider::Gcp), "n2-highmem-2");
    }

    #[test]
    fn test_unknown_class_passes_through() {
        let table = EquivalenceTable::builtin();
        assert_eq!(table.resolve("x9.huge", CloudProvider::Azure), "x9.huge");
        assert_eq!(table.resolve("e2-medium", CloudProvider::Gcp), "e2-medium");
    }

    #[test]
    fn test_every_equivalent_is_priced() {
        let table = EquivalenceTable::builtin();
        for provider in CloudProvider::ALL {
            let rates = ProviderRateTable::for_provider(provider);
            for canonical in table.canonical_classes() {
                let class = table.resolve(canonical, provider);
                assert!(rates.compute_rate(&class) > 0.0, "{provider}: {class}");
            }
            assert!(rates.compute_rate(default_class(provider)) > 0.0);
        }
    }
}
