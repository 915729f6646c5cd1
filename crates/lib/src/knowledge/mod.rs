//! # Legal Knowledge Base
//!
//! The fixed corpus of legal provisions the advisor retrieves from, and the
//! types describing a single provision.

mod corpus;
mod init;

pub use corpus::legal_corpus;
pub use init::{ensure_knowledge_base, KnowledgeBaseStatus};

use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The area of law a provision belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ConstitutionalRights,
    CriminalLaw,
    CriminalProcedure,
    CivilProcedure,
    FamilyLaw,
    ContractLaw,
    CommercialLaw,
    CorporateLaw,
    PropertyLaw,
    ConsumerLaw,
    LaborLaw,
    IntellectualProperty,
    Litigation,
    LegalAid,
    CyberLaw,
    FinancialLaw,
    AdministrativeLaw,
}

impl Category {
    pub const ALL: [Category; 17] = [
        Category::ConstitutionalRights,
        Category::CriminalLaw,
        Category::CriminalProcedure,
        Category::CivilProcedure,
        Category::FamilyLaw,
        Category::ContractLaw,
        Category::CommercialLaw,
        Category::CorporateLaw,
        Category::PropertyLaw,
        Category::ConsumerLaw,
        Category::LaborLaw,
        Category::IntellectualProperty,
        Category::Litigation,
        Category::LegalAid,
        Category::CyberLaw,
        Category::FinancialLaw,
        Category::AdministrativeLaw,
    ];

    /// The label stored alongside each provision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ConstitutionalRights => "constitutional_rights",
            Category::CriminalLaw => "criminal_law",
            Category::CriminalProcedure => "criminal_procedure",
            Category::CivilProcedure => "civil_procedure",
            Category::FamilyLaw => "family_law",
            Category::ContractLaw => "contract_law",
            Category::CommercialLaw => "commercial_law",
            Category::CorporateLaw => "corporate_law",
            Category::PropertyLaw => "property_law",
            Category::ConsumerLaw => "consumer_law",
            Category::LaborLaw => "labor_law",
            Category::IntellectualProperty => "intellectual_property",
            Category::Litigation => "litigation",
            Category::LegalAid => "legal_aid",
            Category::CyberLaw => "cyber_law",
            Category::FinancialLaw => "financial_law",
            Category::AdministrativeLaw => "administrative_law",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StoreError::UnknownCategory(s.to_string()))
    }
}

/// One knowledge-base record: a law's title, its explanatory text and its area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    /// Human-readable title, e.g. "Registration Act, 1908".
    pub provision: String,
    pub content: String,
    pub category: Category,
}

impl Provision {
    pub fn new(provision: &str, content: &str, category: Category) -> Self {
        Self {
            provision: provision.to_string(),
            content: content.to_string(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("maritime_law".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_as_its_label() {
        let json = serde_json::to_string(&Category::IntellectualProperty).unwrap();
        assert_eq!(json, "\"intellectual_property\"");
    }

    #[test]
    fn corpus_covers_every_category() {
        let corpus = legal_corpus();
        assert_eq!(corpus.len(), 36);
        for category in Category::ALL {
            assert!(
                corpus.iter().any(|p| p.category == category),
                "no provision for {category}"
            );
        }
    }

    #[test]
    fn corpus_titles_are_unique() {
        let corpus = legal_corpus();
        let mut titles: Vec<_> = corpus.iter().map(|p| p.provision.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), corpus.len());
    }
}
