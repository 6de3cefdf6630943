//! Search filter translation against the shipped reference data.

use std::path::PathBuf;

use cog_codes::{
    CogConfig, CogContext, FilterError, FilterField, ResolvedFilters, SearchFilters,
    UnresolvedReason, resolve_filters, section_filter_code,
};

fn shipped() -> CogContext {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    CogContext::new(CogConfig::from_dir(dir))
}

fn filters(
    region: Option<&str>,
    departement: Option<&str>,
    commune: Option<&str>,
    section: Option<&str>,
) -> SearchFilters {
    SearchFilters {
        region: region.map(str::to_string),
        departement: departement.map(str::to_string),
        commune: commune.map(str::to_string),
        section: section.map(str::to_string),
    }
}

#[test]
fn translates_every_filter() {
    let cog = shipped();
    let resolved = resolve_filters(
        &cog,
        &filters(
            Some("Auvergne-Rhône-Alpes"),
            Some("Isère"),
            Some("grenoble"),
            Some("Construction"),
        ),
    )
    .unwrap();
    assert_eq!(
        resolved,
        ResolvedFilters {
            region: Some("84".to_string()),
            departement: Some("38".to_string()),
            commune: Some("38185".to_string()),
            section: Some("F".to_string()),
        }
    );
}

#[test]
fn blank_filters_are_ignored() {
    let cog = shipped();
    let resolved = resolve_filters(&cog, &filters(Some("  "), None, Some(""), None)).unwrap();
    assert_eq!(resolved, ResolvedFilters::default());
}

#[test]
fn section_letters_bypass_label_lookup() {
    let cog = shipped();
    for letter in 'A'..='U' {
        let lower = letter.to_ascii_lowercase().to_string();
        assert_eq!(
            section_filter_code(&cog, &lower).unwrap(),
            Some(letter.to_string())
        );
    }
    assert_eq!(section_filter_code(&cog, "Construction").unwrap(), Some("F".to_string()));
    assert_eq!(section_filter_code(&cog, "Astrologie").unwrap(), None);
}

#[test]
fn ambiguous_commune_lists_candidates_with_departements() {
    let cog = shipped();
    let err = resolve_filters(&cog, &filters(None, None, Some("Saint-Martin"), None)).unwrap_err();
    let unresolved = err.unresolved().expect("resolution failure");
    assert_eq!(unresolved.field, FilterField::Commune);
    assert_eq!(unresolved.reason, UnresolvedReason::Ambiguous);
    assert_eq!(unresolved.candidates.len(), 4);
    assert_eq!(unresolved.candidates[0].departement.as_deref(), Some("32"));

    let message = err.to_string();
    assert!(message.starts_with("commune 'Saint-Martin' is ambiguous (4 matches)"));
    assert!(message.contains("54476 - Saint-Martin (54)"));
}

#[test]
fn departement_filter_disambiguates_commune() {
    let cog = shipped();
    let resolved = resolve_filters(
        &cog,
        &filters(None, Some("Meurthe-et-Moselle"), Some("Saint-Martin"), None),
    )
    .unwrap();
    assert_eq!(resolved.commune.as_deref(), Some("54476"));
}

#[test]
fn unknown_departement_lists_all_departements() {
    let cog = shipped();
    let err = resolve_filters(&cog, &filters(None, Some("Narnia"), Some("Grenoble"), None))
        .unwrap_err();
    let unresolved = err.unresolved().expect("resolution failure");
    assert_eq!(unresolved.field, FilterField::Departement);
    assert_eq!(unresolved.reason, UnresolvedReason::NotFound);
    assert_eq!(unresolved.candidates.len(), 101);
    assert!(err.to_string().ends_with("... and 81 more"));
}

#[test]
fn commune_not_in_departement_suggests_namesakes() {
    let cog = shipped();
    let err = resolve_filters(&cog, &filters(None, Some("38"), Some("Valence"), None))
        .unwrap_err();
    let unresolved = err.unresolved().expect("resolution failure");
    assert_eq!(unresolved.reason, UnresolvedReason::NotFound);
    let codes: Vec<&str> = unresolved
        .candidates
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(codes, vec!["16392", "26362", "82186"]);
}

#[test]
fn unknown_section_lists_all_sections() {
    let cog = shipped();
    let err = resolve_filters(&cog, &filters(None, None, None, Some("Astrologie"))).unwrap_err();
    match err {
        FilterError::Unresolved(unresolved) => {
            assert_eq!(unresolved.field, FilterField::Section);
            assert_eq!(unresolved.candidates.len(), 21);
            assert_eq!(unresolved.candidates[5].code, "F");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_reference_data_is_not_a_resolution_failure() {
    let cog = CogContext::new(CogConfig::from_dir("/nonexistent/cog"));
    let err = resolve_filters(&cog, &filters(Some("Bretagne"), None, None, None)).unwrap_err();
    assert!(matches!(err, FilterError::Dataset(_)));
    assert!(err.unresolved().is_none());
}

#[test]
fn known_codes_are_accepted_as_filters() {
    let cog = shipped();
    let resolved = resolve_filters(
        &cog,
        &filters(Some("84"), Some("2b"), Some("Bastia"), Some("f")),
    )
    .unwrap();
    assert_eq!(resolved.region.as_deref(), Some("84"));
    assert_eq!(resolved.departement.as_deref(), Some("2B"));
    assert_eq!(resolved.commune.as_deref(), Some("2B033"));
    assert_eq!(resolved.section.as_deref(), Some("F"));

    let err = resolve_filters(&cog, &filters(Some("99"), None, None, None)).unwrap_err();
    assert_eq!(err.unresolved().map(|u| u.field), Some(FilterField::Region));
}
