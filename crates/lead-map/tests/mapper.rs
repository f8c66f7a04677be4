use lead_map::{AliasTable, ColumnMapper, MatchKind};
use lead_model::LeadField;

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[test]
fn maps_typical_export_headers() {
    let mapper = ColumnMapper::default();
    let mapping = mapper.map_headers(&headers(&[
        "First Name",
        "Last Name",
        "Title",
        "Company",
        "Email",
        "# Employees",
        "Annual Revenue",
        "Industry",
        "Country",
        "Company Country",
        "Unused Column",
    ]));

    let map = mapping.to_map();
    assert_eq!(map.get("Title"), Some(&LeadField::JobTitle));
    assert_eq!(map.get("# Employees"), Some(&LeadField::Employees));
    assert_eq!(map.get("Annual Revenue"), Some(&LeadField::Revenue));
    assert_eq!(map.get("Country"), Some(&LeadField::PersonCountry));
    assert_eq!(map.get("Company Country"), Some(&LeadField::CompanyCountry));
    assert!(!map.contains_key("Unused Column"));
    assert!(mapping.missing_required().is_empty());
    assert_eq!(mapping.unmapped, vec!["Unused Column".to_string()]);
}

#[test]
fn duplicate_targets_keep_first_column() {
    let mapper = ColumnMapper::default();
    let mapping = mapper.map_headers(&headers(&["Email", "Work Email", "Foo"]));
    assert_eq!(mapping.assignments.len(), 1);
    assert_eq!(mapping.assignments[0].header, "Email");
    assert_eq!(mapping.field_for("Work Email"), None);
    assert_eq!(mapping.field_for("Foo"), None);
}

#[test]
fn case_variants_map_with_case_insensitive_kind() {
    let mapper = ColumnMapper::default();
    let mapping = mapper.map_headers(&headers(&["PROFESSIONAL_EMAIL", "company_name"]));
    assert_eq!(
        mapping.assignments[0].match_kind,
        MatchKind::CaseInsensitive
    );
    assert_eq!(mapping.assignments[1].match_kind, MatchKind::Exact);
}

#[test]
fn custom_aliases_extend_mapping() {
    let aliases = AliasTable::standard()
        .with_overrides([("Contact Mail", "professional_email")])
        .unwrap();
    let mapper = ColumnMapper::new(aliases);
    let mapping = mapper.map_headers(&headers(&["contact mail"]));
    assert_eq!(
        mapping.field_for("contact mail"),
        Some(LeadField::ProfessionalEmail)
    );
}

#[test]
fn mapping_serializes_for_reports() {
    let mapper = ColumnMapper::default();
    let mapping = mapper.map_headers(&headers(&["Email", "Work Email"]));
    let json = serde_json::to_value(&mapping).unwrap();
    assert_eq!(json["assignments"][0]["field"], "professional_email");
    assert_eq!(json["dropped"][0]["kept_header"], "Email");
}
