use chrono::{TimeZone, Utc};

use lead_model::{Lead, LeadDraft, LeadField, LeadId, LeadStatus, ModelError, RangeCatalog};

fn draft(pairs: &[(LeadField, &str)]) -> LeadDraft {
    pairs
        .iter()
        .map(|(field, value)| (*field, (*value).to_string()))
        .collect()
}

#[test]
fn from_draft_derives_full_name() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let lead = Lead::from_draft(
        LeadId::new(7),
        &draft(&[
            (LeadField::FirstName, "Jane"),
            (LeadField::LastName, "Doe"),
            (LeadField::ProfessionalEmail, "jane@example.com"),
            (LeadField::CompanyName, "Example Inc"),
        ]),
        "admin",
        now,
    )
    .expect("build lead");

    assert_eq!(lead.full_name, "Jane Doe");
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.created_by, "admin");
    assert_eq!(lead.created_at, now);
    assert_eq!(lead.to_string(), "Jane Doe - Example Inc");
}

#[test]
fn apply_draft_only_touches_present_fields() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let mut lead = Lead::from_draft(
        LeadId::new(1),
        &draft(&[
            (LeadField::FirstName, "Jane"),
            (LeadField::LastName, "Doe"),
            (LeadField::Industry, "Software"),
            (LeadField::Employees, "51-200"),
        ]),
        "alice",
        created,
    )
    .unwrap();

    lead.apply_draft(
        &draft(&[(LeadField::Employees, "201-500"), (LeadField::Status, "qualified")]),
        later,
    )
    .unwrap();

    assert_eq!(lead.industry, "Software");
    assert_eq!(lead.employees, "201-500");
    assert_eq!(lead.status, LeadStatus::Qualified);
    assert_eq!(lead.created_at, created);
    assert_eq!(lead.updated_at, later);
    assert_eq!(lead.created_by, "alice");
}

#[test]
fn invalid_status_is_rejected() {
    let now = Utc::now();
    let result = Lead::from_draft(
        LeadId::new(1),
        &draft(&[(LeadField::Status, "Won")]),
        "admin",
        now,
    );
    assert_eq!(result, Err(ModelError::InvalidStatus("Won".to_string())));
}

#[test]
fn field_accessor_covers_every_field() {
    let mut lead = Lead::new(LeadId::new(1), "admin", Utc::now());
    for field in LeadField::ALL {
        let value = if field == LeadField::Status {
            "Lost".to_string()
        } else {
            format!("value-{}", field.name())
        };
        lead.set_field(field, &value).unwrap();
        assert_eq!(lead.field(field), value);
    }
}

#[test]
fn lead_serializes_with_snake_case_names() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut lead = Lead::new(LeadId::new(3), "admin", now);
    lead.professional_email = "jane@example.com".to_string();
    let json = serde_json::to_value(&lead).expect("serialize lead");
    assert_eq!(json["id"], 3);
    assert_eq!(json["professional_email"], "jane@example.com");
    assert_eq!(json["status"], "New");

    let back: Lead = serde_json::from_value(json).expect("deserialize lead");
    assert_eq!(back, lead);
}

#[test]
fn standard_catalog_labels() {
    let catalog = RangeCatalog::standard();
    assert_eq!(catalog.employees.len(), 8);
    assert_eq!(catalog.revenue.len(), 9);
    assert_eq!(catalog.employee_label("1001-5000"), Some("1,001-5,000"));
    assert_eq!(catalog.revenue_label("$1B+"), Some("$1B+"));
    assert_eq!(catalog.employee_label("7-9"), None);
}
