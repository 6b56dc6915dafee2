//! Static reference data
//!
//! Ingredient lists, contact details and FAQ entries, loaded once at
//! startup from JSON files and read-only thereafter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use isvaryam_core::ProductKey;

use crate::ConfigError;

/// Store contact record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "+91 98765 43210".to_string(),
            email: "care@isvaryam.com".to_string(),
            address: "12, Mill Road, Coimbatore, Tamil Nadu".to_string(),
        }
    }
}

/// One FAQ entry, matched by question-substring containment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// All startup reference data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Product key -> ordered ingredient names
    pub ingredients: BTreeMap<ProductKey, Vec<String>>,
    pub contact: ContactInfo,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        use ProductKey::*;
        let ingredients = BTreeMap::from([
            (GroundnutOil, vec!["cold pressed groundnuts".to_string()]),
            (CoconutOil, vec!["cold pressed copra".to_string()]),
            (SesameOil, vec!["cold pressed sesame seeds".to_string()]),
            (Ghee, vec!["grass-fed cow's milk butter".to_string()]),
            (JaggeryPowder, vec!["sugarcane juice".to_string()]),
            (
                SuperPack,
                vec![
                    "groundnut oil".to_string(),
                    "coconut oil".to_string(),
                    "sesame oil".to_string(),
                ],
            ),
        ]);
        let faq = vec![
            FaqEntry {
                question: "do you ship internationally".to_string(),
                answer: "We currently ship within India only.".to_string(),
            },
            FaqEntry {
                question: "shelf life".to_string(),
                answer: "Our oils keep for 6 months from pressing; ghee and jaggery for a year. Store away from sunlight.".to_string(),
            },
            FaqEntry {
                question: "minimum order".to_string(),
                answer: "There's no minimum order - a single 500ml bottle is fine.".to_string(),
            },
        ];
        Self {
            ingredients,
            contact: ContactInfo::default(),
            faq,
        }
    }
}

impl ReferenceData {
    /// Load from a data directory (`ingredients.json`, `contact.json`,
    /// optional `faq.json`); any missing file falls back to defaults.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let defaults = Self::default();

        let ingredients = match std::fs::read_to_string(dir.join("ingredients.json")) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => defaults.ingredients,
            Err(e) => {
                return Err(ConfigError::FileNotFound {
                    path: dir.join("ingredients.json").display().to_string(),
                    source: e,
                })
            }
        };
        let contact = match std::fs::read_to_string(dir.join("contact.json")) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => defaults.contact,
            Err(e) => {
                return Err(ConfigError::FileNotFound {
                    path: dir.join("contact.json").display().to_string(),
                    source: e,
                })
            }
        };
        let faq = match std::fs::read_to_string(dir.join("faq.json")) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => defaults.faq,
            Err(e) => {
                return Err(ConfigError::FileNotFound {
                    path: dir.join("faq.json").display().to_string(),
                    source: e,
                })
            }
        };

        Ok(Self {
            ingredients,
            contact,
            faq,
        })
    }

    /// Ingredient list for a product
    pub fn ingredients_for(&self, key: ProductKey) -> Option<&[String]> {
        self.ingredients.get(&key).map(|v| v.as_slice())
    }

    /// First FAQ whose question is contained in the text
    pub fn faq_match(&self, text: &str) -> Option<&FaqEntry> {
        self.faq.iter().find(|f| text.contains(f.question.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_products() {
        let data = ReferenceData::default();
        for key in ProductKey::ALL {
            assert!(data.ingredients_for(key).is_some(), "missing ingredients for {}", key);
        }
    }

    #[test]
    fn test_faq_containment() {
        let data = ReferenceData::default();
        let hit = data.faq_match("what is the shelf life of coconut oil").unwrap();
        assert!(hit.answer.contains("6 months"));
        assert!(data.faq_match("random question").is_none());
    }

    #[test]
    fn test_load_dir_missing_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data = ReferenceData::load_dir(dir.path()).unwrap();
        assert_eq!(data.contact.email, ContactInfo::default().email);
    }

    #[test]
    fn test_load_dir_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("contact.json"),
            r#"{"phone": "1234", "email": "x@y.z", "address": "somewhere"}"#,
        )
        .unwrap();
        let data = ReferenceData::load_dir(dir.path()).unwrap();
        assert_eq!(data.contact.phone, "1234");
    }
}
