//! Fixed vocabularies for regions and business types.
//!
//! Labels are what users pick and what leads carry. Each label maps to the
//! free-text term sent to search providers.

/// Selectable geographic regions with their provider query terms.
const REGION_QUERIES: &[(&str, &str)] = &[
    ("Andalusia", "andalusia spain"),
    ("Murcia", "murcia spain"),
    ("Madrid", "madrid spain"),
    ("Extremadura", "extremadura spain"),
    ("Valencia", "valencia spain"),
];

/// Selectable business categories with their provider query terms.
const BUSINESS_TYPE_QUERIES: &[(&str, &str)] = &[
    (
        "Hospitality equipment distributors",
        "hospitality equipment distributor store warehouse",
    ),
    (
        "Hospitality equipment installers",
        "hospitality equipment installer",
    ),
    (
        "Hospitality equipment technicians",
        "hospitality equipment technician",
    ),
    (
        "Large food service organizations",
        "large food service organization",
    ),
    ("Catering companies", "catering company"),
    ("Franchises", "hospitality franchise"),
    (
        "Kitchen or hospitality project planners",
        "kitchen hospitality project planner",
    ),
];

/// Region labels in display order.
pub fn regions() -> Vec<&'static str> {
    REGION_QUERIES.iter().map(|(label, _)| *label).collect()
}

/// Business type labels in display order.
pub fn business_types() -> Vec<&'static str> {
    BUSINESS_TYPE_QUERIES.iter().map(|(label, _)| *label).collect()
}

pub fn is_known_region(label: &str) -> bool {
    REGION_QUERIES.iter().any(|(known, _)| *known == label)
}

pub fn is_known_business_type(label: &str) -> bool {
    BUSINESS_TYPE_QUERIES.iter().any(|(known, _)| *known == label)
}

/// Provider query term for a region, or the label itself when unmapped.
pub fn region_query(label: &str) -> &str {
    lookup(REGION_QUERIES, label).unwrap_or(label)
}

/// Provider query term for a business type, or the label itself when unmapped.
pub fn business_type_query(label: &str) -> &str {
    lookup(BUSINESS_TYPE_QUERIES, label).unwrap_or(label)
}

fn lookup(table: &'static [(&'static str, &'static str)], label: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, query)| *query)
}
