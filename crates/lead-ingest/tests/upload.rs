use chrono::{TimeZone, Utc};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use lead_ingest::{
    AppliedChanges, LeadChange, LeadStore, MemoryLeadStore, StoreError, UploadError, UploadFile,
    UploadLimits, UploadRequest, Uploader,
};
use lead_model::{Lead, LeadId, LeadStatus};

fn request(user: &str) -> UploadRequest {
    UploadRequest::new(user).at(Utc.with_ymd_and_hms(2024, 4, 2, 10, 30, 0).unwrap())
}

fn csv(name: &str, body: &str) -> UploadFile {
    UploadFile::new(name, body.as_bytes().to_vec())
}

const BASIC: &str = "\
First Name,Last Name,Email,Company,Employees,Status
Ada,Lovelace,ada@engines.io,Analytical Engines,51-200,Qualified
Grace,Hopper,grace@navy.mil,US Navy,10001+,
";

#[test]
fn creates_leads_from_csv() {
    let mut store = MemoryLeadStore::new();
    let report = Uploader::new()
        .upload(&mut store, &csv("leads.csv", BASIC), &request("ana"))
        .expect("upload");

    assert_eq!((report.total_rows, report.created, report.updated), (2, 2, 0));
    assert!(report.failures.is_empty());

    let ada = store.find_by_email("ADA@engines.io").unwrap().expect("ada");
    assert_eq!(ada.full_name, "Ada Lovelace");
    assert_eq!(ada.status, LeadStatus::Qualified);
    assert_eq!(ada.source, "Uploaded CSV");
    assert_eq!(ada.created_by, "ana");

    let grace = store.find_by_email("grace@navy.mil").unwrap().expect("grace");
    assert_eq!(grace.status, LeadStatus::New);
    assert_eq!(grace.employees, "10001+");
}

#[test]
fn row_failures_are_collected_with_row_numbers() {
    let body = "\
First Name,Last Name,Email,Company
Ada,Lovelace,ada@engines.io,Analytical Engines
,Nobody,nobody@x.io,Nowhere

Linus,Torvalds,not-an-email,Linux
";
    let mut store = MemoryLeadStore::new();
    let report = Uploader::new()
        .upload(&mut store, &csv("leads.csv", body), &request("ana"))
        .expect("upload");

    assert_eq!(report.created, 1);
    assert_eq!(report.succeeded(), 1);
    let rows: Vec<usize> = report.failures.iter().map(|failure| failure.row_number).collect();
    assert_eq!(rows, vec![3, 4]);
    assert_eq!(report.failures[0].message, "first_name is required");
    assert_eq!(
        report.failures[1].values,
        vec!["Linus", "Torvalds", "not-an-email", "Linux"]
    );
    assert_eq!(report.error_report().headers, report.headers);
}

#[test]
fn lead_id_clash_is_a_row_failure() {
    let body = "\
Lead ID,First Name,Last Name,Email
L-1,Ada,Lovelace,ada@engines.io
L-1,Grace,Hopper,grace@navy.mil
,Alan,Turing,alan@bletchley.uk
";
    let mut store = MemoryLeadStore::new();
    let uploader = Uploader::new();
    let report = uploader
        .upload(&mut store, &csv("leads.csv", body), &request("ana"))
        .expect("upload");

    assert_eq!(report.created, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row_number, 3);
    assert_eq!(
        report.failures[0].message,
        "lead_id L-1 is already used by another lead"
    );
    let owner = store.find_by_lead_id("L-1").unwrap().expect("owner");
    assert_eq!(owner.professional_email, "ada@engines.io");

    // The owner may restate its own id; another lead may not take it.
    let body = "\
Lead ID,First Name,Last Name,Email
L-1,Ada,Byron,ada@engines.io
L-1,Alan,Turing,alan@bletchley.uk
";
    let report = uploader
        .upload(
            &mut store,
            &csv("leads.csv", body),
            &request("ana").with_overwrite(true),
        )
        .expect("overwrite upload");
    assert_eq!(report.updated, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row_number, 3);
    let alan = store.find_by_email("alan@bletchley.uk").unwrap().expect("alan");
    assert_eq!(alan.lead_id, "");
}

#[test]
fn duplicates_fail_without_overwrite() {
    let mut store = MemoryLeadStore::new();
    let uploader = Uploader::new();
    uploader
        .upload(&mut store, &csv("leads.csv", BASIC), &request("ana"))
        .expect("first upload");

    let report = uploader
        .upload(&mut store, &csv("leads.csv", BASIC), &request("ana"))
        .expect("second upload");
    assert_eq!(report.created + report.updated, 0);
    assert_eq!(report.failed(), 2);
    assert!(report.failures[0].message.contains("already exists"));
    assert_eq!(store.len(), 2);
}

#[test]
fn overwrite_updates_only_mapped_fields() {
    let mut store = MemoryLeadStore::new();
    let uploader = Uploader::new();
    uploader
        .upload(&mut store, &csv("leads.csv", BASIC), &request("ana"))
        .expect("first upload");

    let update = "\
Email,First Name,Last Name,Company,Job Title
Ada@Engines.io,Ada,Byron,Analytical Engines,Countess
";
    let later = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let report = uploader
        .upload(
            &mut store,
            &csv("update.csv", update),
            &UploadRequest::new("ben").with_overwrite(true).at(later),
        )
        .expect("update upload");
    assert_eq!((report.created, report.updated), (0, 1));

    let ada = store.find_by_email("ada@engines.io").unwrap().expect("ada");
    assert_eq!(ada.last_name, "Byron");
    assert_eq!(ada.job_title, "Countess");
    assert_eq!(ada.employees, "51-200");
    assert_eq!(ada.status, LeadStatus::Qualified);
    assert_eq!(ada.created_by, "ana");
    assert_eq!(ada.updated_at, later);
    assert_eq!(store.len(), 2);
}

#[test]
fn repeated_email_within_one_file() {
    let body = "\
First Name,Last Name,Email,Company,Job Title
Ada,Lovelace,ada@engines.io,Analytical Engines,Analyst
Ada,Lovelace,ADA@engines.io,Analytical Engines,Countess
";
    let mut store = MemoryLeadStore::new();
    let report = Uploader::new()
        .upload(&mut store, &csv("leads.csv", body), &request("ana"))
        .expect("upload");
    assert_eq!(report.created, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row_number, 3);

    let mut store = MemoryLeadStore::new();
    let report = Uploader::new()
        .upload(
            &mut store,
            &csv("leads.csv", body),
            &request("ana").with_overwrite(true),
        )
        .expect("upload");
    assert_eq!((report.created, report.failed()), (1, 0));
    let ada = store.find_by_email("ada@engines.io").unwrap().expect("ada");
    assert_eq!(ada.job_title, "Countess");
}

#[test]
fn first_duplicate_header_wins() {
    let body = "\
First Name,Last Name,Email,Work Email,Company
Ada,Lovelace,ada@engines.io,ada@work.io,Analytical Engines
";
    let mut store = MemoryLeadStore::new();
    let report = Uploader::new()
        .upload(&mut store, &csv("leads.csv", body), &request("ana"))
        .expect("upload");
    assert_eq!(report.mapping.dropped.len(), 1);
    assert!(store.find_by_email("ada@engines.io").unwrap().is_some());
    assert!(store.find_by_email("ada@work.io").unwrap().is_none());
}

#[test]
fn file_level_errors_are_fatal() {
    let mut store = MemoryLeadStore::new();
    let uploader = Uploader::new().with_limits(UploadLimits { max_bytes: 64 });

    let result = uploader.upload(&mut store, &csv("leads.txt", BASIC), &request("ana"));
    assert!(matches!(result, Err(UploadError::UnsupportedExtension { .. })));

    let result = uploader.upload(&mut store, &csv("leads.csv", BASIC), &request("ana"));
    assert!(matches!(result, Err(UploadError::TooLarge { max: 64, .. })));

    let result = uploader.upload(&mut store, &csv("leads.csv", "Email,Company\n"), &request("ana"));
    assert!(matches!(result, Err(UploadError::NoDataRows)));

    let result = uploader.upload(&mut store, &csv("leads.csv", "Foo,Bar\n1,2\n"), &request("ana"));
    assert!(matches!(result, Err(UploadError::NoRecognizedColumns { .. })));

    assert!(store.is_empty());
}

#[test]
fn reads_first_excel_sheet() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = ["First Name", "Last Name", "Email", "Company", "Zip Code", "Comments"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).expect("header");
    }
    sheet.write_string(1, 0, "Grace").expect("cell");
    sheet.write_string(1, 1, "Hopper").expect("cell");
    sheet.write_string(1, 2, "grace@navy.mil").expect("cell");
    sheet.write_string(1, 3, "US Navy").expect("cell");
    sheet.write_number(1, 4, 94105.0).expect("cell");
    let met = ExcelDateTime::from_ymd(2024, 3, 15).expect("date");
    sheet
        .write_datetime_with_format(1, 5, &met, &Format::new().set_num_format("yyyy-mm-dd"))
        .expect("cell");
    let bytes = workbook.save_to_buffer().expect("xlsx");

    let mut store = MemoryLeadStore::new();
    let report = Uploader::new()
        .upload(&mut store, &UploadFile::new("leads.XLSX", bytes), &request("ana"))
        .expect("upload");
    assert_eq!(report.created, 1);

    let grace = store.find_by_email("grace@navy.mil").unwrap().expect("grace");
    assert_eq!(grace.zip_code, "94105");
    assert_eq!(grace.comments, "2024-03-15");
    assert_eq!(grace.source, "Uploaded Excel");
}

/// Store whose commit always fails.
struct FailingStore(MemoryLeadStore);

impl LeadStore for FailingStore {
    fn get(&self, id: LeadId) -> Result<Option<Lead>, StoreError> {
        self.0.get(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError> {
        self.0.find_by_email(email)
    }

    fn find_by_lead_id(&self, lead_id: &str) -> Result<Option<Lead>, StoreError> {
        self.0.find_by_lead_id(lead_id)
    }

    fn list(&self) -> Result<Vec<Lead>, StoreError> {
        self.0.list()
    }

    fn apply(&mut self, _changes: Vec<LeadChange>) -> Result<AppliedChanges, StoreError> {
        Err(StoreError::NotFound(LeadId::new(99)))
    }
}

#[test]
fn failed_commit_keeps_nothing() {
    let mut store = FailingStore(MemoryLeadStore::new());
    let result = Uploader::new().upload(&mut store, &csv("leads.csv", BASIC), &request("ana"));
    assert!(matches!(result, Err(UploadError::Commit(_))));
    assert!(store.0.is_empty());
}
