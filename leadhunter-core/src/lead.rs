//! Business lead data types and search parameter validation.

use serde::{Deserialize, Serialize};

use crate::catalog;

/// A business found by a search, real or generated.
///
/// `website` and `phone` use the empty string for "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessLead {
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone: String,
    pub region: String,
    #[serde(rename = "type")]
    pub business_type: String,
}

impl BusinessLead {
    /// Creates a lead with unknown website and phone.
    pub fn new(name: impl Into<String>, region: &str, business_type: &str) -> Self {
        Self {
            name: name.into(),
            website: String::new(),
            phone: String::new(),
            region: region.to_string(),
            business_type: business_type.to_string(),
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// A lead as persisted, carrying its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLead {
    pub id: i64,
    #[serde(flatten)]
    pub lead: BusinessLead,
}

/// Lead shape accepted by the export endpoints.
///
/// Looser than [`BusinessLead`]: the client may omit website and phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub region: String,
    #[serde(rename = "type")]
    pub business_type: String,
}

impl From<BusinessLead> for LeadRecord {
    fn from(lead: BusinessLead) -> Self {
        Self {
            name: lead.name,
            website: Some(lead.website),
            phone: Some(lead.phone),
            region: lead.region,
            business_type: lead.business_type,
        }
    }
}

/// Regions and business types selected for a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub regions: Vec<String>,
    pub business_types: Vec<String>,
}

/// One rejected field in a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Search parameters failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid search parameters: {} field error(s)", errors.len())]
pub struct InvalidSearchParams {
    pub errors: Vec<FieldError>,
}

impl SearchParams {
    pub fn new(regions: &[&str], business_types: &[&str]) -> Self {
        Self {
            regions: regions.iter().map(|r| r.to_string()).collect(),
            business_types: business_types.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Checks both selections and collapses duplicate labels.
    ///
    /// Every problem is reported, not only the first one found.
    ///
    /// # Errors
    ///
    /// - `InvalidSearchParams` - If a selection is empty or holds a label
    ///   outside the catalog
    pub fn validate(self) -> Result<Self, InvalidSearchParams> {
        let mut errors = Vec::new();

        if self.regions.is_empty() {
            errors.push(FieldError::new(
                "regions",
                "At least one region must be selected",
            ));
        }
        if self.business_types.is_empty() {
            errors.push(FieldError::new(
                "businessTypes",
                "At least one business type must be selected",
            ));
        }

        for region in self.regions.iter().filter(|r| !catalog::is_known_region(r)) {
            errors.push(FieldError::new(
                "regions",
                format!("Unknown region: {region}"),
            ));
        }
        for business_type in self
            .business_types
            .iter()
            .filter(|t| !catalog::is_known_business_type(t))
        {
            errors.push(FieldError::new(
                "businessTypes",
                format!("Unknown business type: {business_type}"),
            ));
        }

        if !errors.is_empty() {
            return Err(InvalidSearchParams { errors });
        }

        Ok(Self {
            regions: dedup_preserving_order(self.regions),
            business_types: dedup_preserving_order(self.business_types),
        })
    }

    /// Every (region, business type) pair, regions outer and types inner.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions.iter().flat_map(move |region| {
            self.business_types
                .iter()
                .map(move |business_type| (region.as_str(), business_type.as_str()))
        })
    }
}

fn dedup_preserving_order(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_serializes_type_field() {
        let lead = BusinessLead::new("Catering Catering Madrid", "Madrid", "Catering companies")
            .with_phone("+34 91 1234567");
        let json = serde_json::to_value(&lead).unwrap();

        assert_eq!(json["type"], "Catering companies");
        assert_eq!(json["website"], "");
        assert_eq!(json["phone"], "+34 91 1234567");
        assert!(json.get("business_type").is_none());
    }

    #[test]
    fn test_stored_lead_is_flat() {
        let stored = StoredLead {
            id: 7,
            lead: BusinessLead::new("A", "Murcia", "Franchises"),
        };
        let json = serde_json::to_value(&stored).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "A");
        assert_eq!(json["region"], "Murcia");
    }

    #[test]
    fn test_search_params_use_camel_case() {
        let params: SearchParams = serde_json::from_str(
            r#"{"regions":["Madrid"],"businessTypes":["Catering companies"]}"#,
        )
        .unwrap();
        assert_eq!(params.business_types, vec!["Catering companies"]);
    }

    #[test]
    fn test_empty_selections_are_rejected() {
        let err = SearchParams::new(&[], &["Franchises"]).validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "regions");

        let err = SearchParams::new(&[], &[]).validate().unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        let err = SearchParams::new(&["Madrid", "Atlantis"], &["X"])
            .validate()
            .unwrap_err();

        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["regions", "businessTypes"]);
        assert!(err.errors[0].message.contains("Atlantis"));
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let params = SearchParams::new(
            &["Valencia", "Madrid", "Valencia"],
            &["Franchises", "Franchises"],
        )
        .validate()
        .unwrap();

        assert_eq!(params.regions, vec!["Valencia", "Madrid"]);
        assert_eq!(params.business_types, vec!["Franchises"]);
    }

    #[test]
    fn test_pairs_iterate_regions_outer() {
        let params = SearchParams::new(
            &["Madrid", "Murcia"],
            &["Franchises", "Catering companies"],
        );
        let pairs: Vec<(&str, &str)> = params.pairs().collect();

        assert_eq!(
            pairs,
            vec![
                ("Madrid", "Franchises"),
                ("Madrid", "Catering companies"),
                ("Murcia", "Franchises"),
                ("Murcia", "Catering companies"),
            ]
        );
    }
}
