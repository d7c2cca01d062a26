//! Location resolution and fragment naming
//!
//! A location key selects which geographic entity's fragments a page shows.
//! Fragment files follow the pipeline's naming convention:
//! `<key><suffix>.html`, e.g. `Delaware_County_Pennsylvania_new_cases.html`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::TemplateError;

/// Extension shared by every fragment file
pub const FRAGMENT_EXTENSION: &str = ".html";

/// Non-empty location identifier, accepted verbatim from the request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form used in page titles
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies the configured default to an optional request parameter
#[derive(Debug, Clone)]
pub struct LocationResolver {
    default: LocationKey,
}

impl LocationResolver {
    /// An empty default falls back to the built-in one so `resolve`
    /// can always return a non-empty key.
    pub fn new(default_location: &str) -> Self {
        let default = if default_location.is_empty() {
            crate::config::DEFAULT_LOCATION
        } else {
            default_location
        };
        Self {
            default: LocationKey(default.to_string()),
        }
    }

    /// Never fails. No existence check happens here; an unknown key surfaces
    /// later as unavailable fragments.
    pub fn resolve(&self, raw: Option<&str>) -> LocationKey {
        match raw {
            Some(key) if !key.is_empty() => LocationKey(key.to_string()),
            _ => self.default.clone(),
        }
    }
}

/// Role a fragment plays on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentSlot {
    NewCases,
    Trend,
    /// Yellow-target or per-capita chart, depending on the page's suffix table
    Target,
    PosNeg,
    /// Per-state summary table
    Table,
}

impl FragmentSlot {
    pub const ALL: [Self; 5] = [
        Self::NewCases,
        Self::Trend,
        Self::Target,
        Self::PosNeg,
        Self::Table,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewCases => "new_cases",
            Self::Trend => "trend",
            Self::Target => "target",
            Self::PosNeg => "posneg",
            Self::Table => "table",
        }
    }

    /// Heading shown above the slot in the rendered page
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewCases => "New Cases",
            Self::Trend => "Trend",
            Self::Target => "Target",
            Self::PosNeg => "Positive / Negative Tests",
            Self::Table => "Summary",
        }
    }
}

impl fmt::Display for FragmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Per-template slot to file-suffix table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixTable {
    pub new_cases: String,
    pub trend: String,
    pub target: String,
    pub posneg: String,
    pub table: String,
}

impl Default for SuffixTable {
    fn default() -> Self {
        Self {
            new_cases: "_new_cases".to_string(),
            trend: "_trend".to_string(),
            target: "_yellow_target".to_string(),
            posneg: "_posneg".to_string(),
            table: "_table".to_string(),
        }
    }
}

impl SuffixTable {
    /// State-level pages show the per-capita chart in the target slot
    pub fn per_capita() -> Self {
        Self {
            target: "_per_capita".to_string(),
            ..Self::default()
        }
    }

    pub fn suffix(&self, slot: FragmentSlot) -> &str {
        match slot {
            FragmentSlot::NewCases => &self.new_cases,
            FragmentSlot::Trend => &self.trend,
            FragmentSlot::Target => &self.target,
            FragmentSlot::PosNeg => &self.posneg,
            FragmentSlot::Table => &self.table,
        }
    }

    /// Checks the suffixes of `slots` for emptiness and for one ending with
    /// another. Either would let two (key, slot) pairs share a file name.
    pub fn validate(&self, page: &str, slots: &[FragmentSlot]) -> Result<(), TemplateError> {
        for &slot in slots {
            if self.suffix(slot).is_empty() {
                return Err(TemplateError::EmptySuffix {
                    page: page.to_string(),
                    slot: slot.as_str(),
                });
            }
        }

        for (i, &a) in slots.iter().enumerate() {
            for &b in &slots[i + 1..] {
                let (sa, sb) = (self.suffix(a), self.suffix(b));
                let (shorter, longer) = if sa.len() <= sb.len() { (sa, sb) } else { (sb, sa) };
                if longer.ends_with(shorter) {
                    return Err(TemplateError::AmbiguousSuffix {
                        page: page.to_string(),
                        shorter: shorter.to_string(),
                        longer: longer.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// File name of the fragment filling `slot` for `key`
pub fn fragment_name(key: &LocationKey, slot: FragmentSlot, suffixes: &SuffixTable) -> String {
    let suffix = suffixes.suffix(slot);
    let mut name = String::with_capacity(key.0.len() + suffix.len() + FRAGMENT_EXTENSION.len());
    name.push_str(&key.0);
    name.push_str(suffix);
    name.push_str(FRAGMENT_EXTENSION);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_absent_uses_default() {
        let resolver = LocationResolver::new("Delaware_County_Pennsylvania");
        assert_eq!(resolver.resolve(None).as_str(), "Delaware_County_Pennsylvania");

        let other = LocationResolver::new("Chester_County_Pennsylvania");
        assert_eq!(other.resolve(None).as_str(), "Chester_County_Pennsylvania");
    }

    #[test]
    fn test_resolve_present_is_identity() {
        let resolver = LocationResolver::new("Delaware_County_Pennsylvania");
        for raw in ["Nonexistent_County", "New_York_State", "../etc/passwd", "a b"] {
            assert_eq!(resolver.resolve(Some(raw)).as_str(), raw);
        }
    }

    #[test]
    fn test_resolve_empty_uses_default() {
        let resolver = LocationResolver::new("Delaware_County_Pennsylvania");
        assert_eq!(resolver.resolve(Some("")).as_str(), "Delaware_County_Pennsylvania");
    }

    #[test]
    fn test_empty_default_falls_back_to_builtin() {
        let resolver = LocationResolver::new("");
        assert!(!resolver.resolve(None).as_str().is_empty());
    }

    #[test]
    fn test_display_name() {
        let resolver = LocationResolver::new("Delaware_County_Pennsylvania");
        assert_eq!(
            resolver.resolve(None).display_name(),
            "Delaware County Pennsylvania"
        );
    }

    #[test]
    fn test_fragment_name() {
        let key = LocationResolver::new("x").resolve(Some("Delaware_County_Pennsylvania"));
        let table = SuffixTable::default();
        assert_eq!(
            fragment_name(&key, FragmentSlot::NewCases, &table),
            "Delaware_County_Pennsylvania_new_cases.html"
        );
        assert_eq!(
            fragment_name(&key, FragmentSlot::Target, &table),
            "Delaware_County_Pennsylvania_yellow_target.html"
        );
        assert_eq!(
            fragment_name(&key, FragmentSlot::Target, &SuffixTable::per_capita()),
            "Delaware_County_Pennsylvania_per_capita.html"
        );
        // Deterministic
        assert_eq!(
            fragment_name(&key, FragmentSlot::PosNeg, &table),
            fragment_name(&key, FragmentSlot::PosNeg, &table)
        );
    }

    #[test]
    fn test_fragment_name_injective() {
        let resolver = LocationResolver::new("x");
        let table = SuffixTable::default();
        // Keys chosen to overlap with the suffixes themselves
        let keys = [
            "a",
            "a_trend",
            "a_new",
            "a_new_cases",
            "a_yellow",
            "a_posneg",
            "Pennsylvania_State",
            "Pennsylvania",
        ];

        let mut seen = HashSet::new();
        for key in keys {
            let key = resolver.resolve(Some(key));
            for slot in FragmentSlot::ALL {
                assert!(
                    seen.insert(fragment_name(&key, slot, &table)),
                    "collision for {key} / {slot}"
                );
            }
        }
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        SuffixTable::default()
            .validate("county", &FragmentSlot::ALL)
            .unwrap();
        SuffixTable::per_capita()
            .validate("state", &FragmentSlot::ALL)
            .unwrap();
    }

    #[test]
    fn test_validate_rejects_overlapping_suffixes() {
        let table = SuffixTable {
            trend: "_cases".to_string(),
            ..SuffixTable::default()
        };
        let err = table
            .validate("p", &[FragmentSlot::NewCases, FragmentSlot::Trend])
            .unwrap_err();
        assert!(matches!(err, TemplateError::AmbiguousSuffix { .. }));

        // Only slots the page uses are checked
        table
            .validate("p", &[FragmentSlot::NewCases, FragmentSlot::Target])
            .unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_suffix() {
        let table = SuffixTable {
            posneg: String::new(),
            ..SuffixTable::default()
        };
        let err = table.validate("p", &[FragmentSlot::PosNeg]).unwrap_err();
        assert!(matches!(err, TemplateError::EmptySuffix { .. }));
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!("posneg".parse::<FragmentSlot>(), Ok(FragmentSlot::PosNeg));
        assert_eq!("new_cases".parse::<FragmentSlot>(), Ok(FragmentSlot::NewCases));
        assert!("deaths".parse::<FragmentSlot>().is_err());
    }
}
