//! Generated example leads used when no real provider data is available.
//!
//! Output is fully determined by the region and business type labels,
//! except for the seven random digits of each phone number.

use leadhunter_core::BusinessLead;
use rand::Rng;

/// Name prefixes used for business types outside the catalog.
const GENERIC_PREFIXES: [&str; 5] = ["Empresa", "Servicio", "Grupo", "Compañía", "Profesionales"];

const TYPE_PREFIXES: &[(&str, [&str; 5])] = &[
    (
        "Hospitality equipment distributors",
        ["Distribuciones", "Equipos", "Suministros", "Mayorista", "Proveedor"],
    ),
    (
        "Hospitality equipment installers",
        ["Instalaciones", "Montajes", "Servicios", "Técnicos", "Mantenimiento"],
    ),
    (
        "Hospitality equipment technicians",
        ["Servicio Técnico", "Reparaciones", "Asistencia", "Técnicos", "Mantenimiento"],
    ),
    (
        "Large food service organizations",
        ["Catering", "Food Service", "Restauración", "Grupo", "Colectividades"],
    ),
    (
        "Catering companies",
        ["Catering", "Eventos", "Banquetes", "Celebraciones", "Cocina"],
    ),
    (
        "Franchises",
        ["Franquicia", "Grupo", "Cadena", "Restaurantes", "Cafeterías"],
    ),
    (
        "Kitchen or hospitality project planners",
        ["Proyectos", "Interiorismo", "Diseño", "Planificación", "Arquitectura"],
    ),
];

/// Area codes for Madrid, Barcelona, Valencia, Seville and Bilbao, in rotation order.
pub const PHONE_PREFIXES: [&str; 5] = ["91", "93", "96", "95", "94"];

/// Leads before the region gets the "de" connective.
const VERBATIM_REGION_LEADS: usize = 3;

/// Number of leads generated for a pair: between 5 and 14.
pub fn lead_count(region: &str, business_type: &str) -> usize {
    5 + (region.chars().count() + business_type.chars().count()) % 10
}

/// Generates example leads with thread-local randomness for phone digits.
pub fn generate_leads(region: &str, business_type: &str) -> Vec<BusinessLead> {
    generate_leads_with_rng(region, business_type, &mut rand::rng())
}

/// Generates example leads drawing phone digits from `rng`.
pub fn generate_leads_with_rng<R: Rng>(
    region: &str,
    business_type: &str,
    rng: &mut R,
) -> Vec<BusinessLead> {
    let prefixes = name_prefixes(business_type);
    // split always yields at least one item
    let type_word = business_type.split(' ').next().unwrap_or_default();

    (0..lead_count(region, business_type))
        .map(|index| {
            let prefix = prefixes[index % prefixes.len()];
            let name = if index < VERBATIM_REGION_LEADS {
                format!("{prefix} {type_word} {region}")
            } else {
                format!("{prefix} {type_word} de {region}")
            };

            let website = format!("https://www.{}.es", website_slug(&name));
            let phone = format!(
                "+34 {} {}",
                PHONE_PREFIXES[index % PHONE_PREFIXES.len()],
                rng.random_range(1_000_000..=9_999_999u32)
            );

            BusinessLead::new(name, region, business_type)
                .with_website(website)
                .with_phone(phone)
        })
        .collect()
}

fn name_prefixes(business_type: &str) -> &'static [&'static str; 5] {
    TYPE_PREFIXES
        .iter()
        .find(|(label, _)| *label == business_type)
        .map_or(&GENERIC_PREFIXES, |(_, prefixes)| prefixes)
}

/// Lowercases, joins whitespace runs with `-` and drops anything outside `[a-z0-9-]`.
fn website_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use leadhunter_core::catalog;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use regex::Regex;

    use super::*;

    fn website_pattern() -> Regex {
        Regex::new(r"^https://www\.[a-z0-9-]+\.es$").unwrap()
    }

    fn phone_pattern() -> Regex {
        Regex::new(r"^\+34 9[13456] \d{7}$").unwrap()
    }

    #[test]
    fn test_every_catalog_pair_produces_well_formed_leads() {
        let website = website_pattern();
        let phone = phone_pattern();

        for region in catalog::regions() {
            for business_type in catalog::business_types() {
                let leads = generate_leads(region, business_type);

                assert!((5..=14).contains(&leads.len()));
                assert_eq!(leads.len(), lead_count(region, business_type));
                for (index, lead) in leads.iter().enumerate() {
                    assert!(!lead.name.is_empty());
                    assert!(website.is_match(&lead.website), "{}", lead.website);
                    assert!(phone.is_match(&lead.phone), "{}", lead.phone);
                    assert!(lead.phone.starts_with(&format!("+34 {} ", PHONE_PREFIXES[index % 5])));
                    assert_eq!(lead.region, region);
                    assert_eq!(lead.business_type, business_type);
                }
            }
        }
    }

    #[test]
    fn test_names_follow_prefix_rotation_and_region_suffix() {
        // 6 + 18 = 24 -> 5 + 4 = 9 leads
        let leads = generate_leads("Madrid", "Catering companies");
        let names: Vec<&str> = leads.iter().map(|l| l.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Catering Catering Madrid",
                "Eventos Catering Madrid",
                "Banquetes Catering Madrid",
                "Celebraciones Catering de Madrid",
                "Cocina Catering de Madrid",
                "Catering Catering de Madrid",
                "Eventos Catering de Madrid",
                "Banquetes Catering de Madrid",
                "Celebraciones Catering de Madrid",
            ]
        );
        assert_eq!(leads[3].website, "https://www.celebraciones-catering-de-madrid.es");
    }

    #[test]
    fn test_accented_characters_are_stripped_from_websites() {
        let leads = generate_leads("Murcia", "Hospitality equipment technicians");
        assert_eq!(leads[0].name, "Servicio Técnico Hospitality Murcia");
        assert_eq!(
            leads[0].website,
            "https://www.servicio-tcnico-hospitality-murcia.es"
        );
    }

    #[test]
    fn test_unknown_type_uses_generic_prefixes() {
        let leads = generate_leads("Galicia", "Bakeries");
        assert_eq!(leads[0].name, "Empresa Bakeries Galicia");
        assert_eq!(leads[3].name, "Compañía Bakeries de Galicia");
        assert_eq!(leads[3].website, "https://www.compaa-bakeries-de-galicia.es");
    }

    #[test]
    fn test_seeded_rng_reproduces_phone_numbers() {
        let first = generate_leads_with_rng("Valencia", "Franchises", &mut ChaCha8Rng::seed_from_u64(42));
        let second = generate_leads_with_rng("Valencia", "Franchises", &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_phone_digits_vary_between_runs() {
        let first = generate_leads_with_rng("Valencia", "Franchises", &mut ChaCha8Rng::seed_from_u64(1));
        let second = generate_leads_with_rng("Valencia", "Franchises", &mut ChaCha8Rng::seed_from_u64(2));

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.website, b.website);
            assert_eq!(a.phone[..7], b.phone[..7]);
        }
    }

    proptest! {
        #[test]
        fn prop_any_labels_give_valid_shapes(region in "\\PC{1,30}", business_type in "\\PC{1,40}") {
            let leads = generate_leads(&region, &business_type);
            let website = website_pattern();
            let phone = phone_pattern();

            prop_assert!((5..=14).contains(&leads.len()));
            for lead in &leads {
                prop_assert!(website.is_match(&lead.website), "{}", lead.website);
                prop_assert!(phone.is_match(&lead.phone), "{}", lead.phone);
            }
        }
    }
}
