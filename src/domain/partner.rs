use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three fixed co-owners sharing net profit equally before
/// deductions. The roster is closed: partner-keyed data is modeled as a
/// total map over this enum rather than string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partner {
    Hamad,
    Fahd,
    Jamil,
}

impl Partner {
    pub const ALL: [Partner; 3] = [Partner::Hamad, Partner::Fahd, Partner::Jamil];
    pub const COUNT: usize = Self::ALL.len();

    pub fn label(self) -> &'static str {
        match self {
            Partner::Hamad => "Hamad",
            Partner::Fahd => "Fahd",
            Partner::Jamil => "Jamil",
        }
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown partner `{0}`; expected hamad, fahd, or jamil")]
pub struct UnknownPartner(String);

impl FromStr for Partner {
    type Err = UnknownPartner;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hamad" => Ok(Partner::Hamad),
            "fahd" => Ok(Partner::Fahd),
            "jamil" => Ok(Partner::Jamil),
            other => Err(UnknownPartner(other.to_string())),
        }
    }
}

/// Total map from `Partner` to an amount. Every partner is always present;
/// fields absent from stored data deserialize to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartnerMap {
    #[serde(default)]
    pub hamad: f64,
    #[serde(default)]
    pub fahd: f64,
    #[serde(default)]
    pub jamil: f64,
}

impl PartnerMap {
    pub fn from_fn(mut value: impl FnMut(Partner) -> f64) -> Self {
        Self {
            hamad: value(Partner::Hamad),
            fahd: value(Partner::Fahd),
            jamil: value(Partner::Jamil),
        }
    }

    pub fn get(&self, partner: Partner) -> f64 {
        match partner {
            Partner::Hamad => self.hamad,
            Partner::Fahd => self.fahd,
            Partner::Jamil => self.jamil,
        }
    }

    pub fn get_mut(&mut self, partner: Partner) -> &mut f64 {
        match partner {
            Partner::Hamad => &mut self.hamad,
            Partner::Fahd => &mut self.fahd,
            Partner::Jamil => &mut self.jamil,
        }
    }

    /// Adds every entry of `other` into this map.
    pub fn add(&mut self, other: &PartnerMap) {
        for partner in Partner::ALL {
            *self.get_mut(partner) += other.get(partner);
        }
    }

    pub fn total(&self) -> f64 {
        Partner::ALL.iter().map(|p| self.get(*p)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Partner, f64)> + '_ {
        Partner::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Persisted roster entry carrying a partner's recorded balance. The roster
/// is reinitialized to zeros on a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartnerBalance {
    pub partner: Partner,
    #[serde(default)]
    pub total: f64,
}

impl PartnerBalance {
    /// Fresh roster with all three partners at zero.
    pub fn zeroed_roster() -> Vec<PartnerBalance> {
        Partner::ALL
            .into_iter()
            .map(|partner| PartnerBalance {
                partner,
                total: 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partner_parses_case_insensitively() {
        assert_eq!("Hamad".parse::<Partner>().unwrap(), Partner::Hamad);
        assert_eq!("FAHD".parse::<Partner>().unwrap(), Partner::Fahd);
        assert!("nadia".parse::<Partner>().is_err());
    }

    #[test]
    fn map_defaults_missing_partners_to_zero() {
        let map: PartnerMap = serde_json::from_str(r#"{"hamad": 12.5}"#).unwrap();
        assert_eq!(map.get(Partner::Hamad), 12.5);
        assert_eq!(map.get(Partner::Fahd), 0.0);
        assert_eq!(map.get(Partner::Jamil), 0.0);
    }

    #[test]
    fn map_add_and_total() {
        let mut map = PartnerMap::from_fn(|_| 10.0);
        map.add(&PartnerMap {
            hamad: 1.0,
            fahd: 2.0,
            jamil: 3.0,
        });
        assert_eq!(map.get(Partner::Jamil), 13.0);
        assert_eq!(map.total(), 36.0);
    }

    #[test]
    fn zeroed_roster_contains_all_partners() {
        let roster = PartnerBalance::zeroed_roster();
        assert_eq!(roster.len(), Partner::COUNT);
        assert!(roster.iter().all(|entry| entry.total == 0.0));
    }
}
