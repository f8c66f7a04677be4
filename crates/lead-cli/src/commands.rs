use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use lead_ingest::UploadReport;
use lead_model::LeadId;
use lead_report::{
    error_report_xlsx, leads_xlsx, select_leads, write_error_report_csv, write_leads_csv,
    write_sample_csv,
};

use lead_cli::session::Session;

use crate::cli::{
    ErrorsArgs, ExportArgs, ExportFormatArg, ListArgs, SampleArgs, ShowArgs, UploadArgs,
};
use crate::summary::{print_choice_sets, print_lead_table};

pub fn run_upload(session: &Session, args: &UploadArgs) -> Result<UploadReport> {
    session.upload(&args.file, args.overwrite)
}

pub fn run_list(session: &Session, args: &ListArgs) -> Result<()> {
    let leads = session.leads()?;
    let matched = session.filter(&leads, &args.filter.to_query())?;
    let page: Vec<_> = matched
        .iter()
        .skip(args.offset)
        .take(args.limit)
        .cloned()
        .collect();
    print_lead_table(&page, args.offset, matched.len());
    Ok(())
}

pub fn run_show(session: &Session, args: &ShowArgs) -> Result<()> {
    let Some(lead) = session.lead(args.id)? else {
        bail!("lead {} not found", args.id);
    };
    let json = serde_json::to_string_pretty(&lead).context("serialize lead")?;
    println!("{json}");
    Ok(())
}

pub fn run_export(session: &Session, args: &ExportArgs) -> Result<PathBuf> {
    let leads = session.leads()?;
    let mut matched = session.filter(&leads, &args.filter.to_query())?;
    if !args.ids.is_empty() {
        let ids: Vec<LeadId> = args.ids.iter().copied().map(LeadId::new).collect();
        matched = select_leads(&matched, &ids).into_iter().cloned().collect();
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("leads.{}", args.format.extension())));

    match args.format {
        ExportFormatArg::Csv => {
            let file = File::create(&output)
                .with_context(|| format!("create {}", output.display()))?;
            write_leads_csv(BufWriter::new(file), &matched)
                .with_context(|| format!("export {}", output.display()))?;
        }
        ExportFormatArg::Xlsx => {
            let bytes = leads_xlsx(&matched).context("build spreadsheet")?;
            fs::write(&output, bytes).with_context(|| format!("write {}", output.display()))?;
        }
    }
    info!(path = %output.display(), leads = matched.len(), "export written");
    println!("Exported {} leads to {}", matched.len(), output.display());
    Ok(output)
}

pub fn run_errors(session: &Session, args: &ErrorsArgs) -> Result<()> {
    let Some(report) = session.latest_errors()? else {
        println!("Your last upload had no row errors.");
        return Ok(());
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("upload_errors.{}", args.format.extension())));
    match args.format {
        ExportFormatArg::Csv => {
            let file = File::create(&output)
                .with_context(|| format!("create {}", output.display()))?;
            write_error_report_csv(BufWriter::new(file), &report)
                .with_context(|| format!("export {}", output.display()))?;
        }
        ExportFormatArg::Xlsx => {
            let bytes = error_report_xlsx(&report).context("build error report")?;
            fs::write(&output, bytes).with_context(|| format!("write {}", output.display()))?;
        }
    }
    println!(
        "Wrote {} failed rows from {} ({}) to {}",
        report.failures.len(),
        report.file_name,
        report.uploaded_at.format("%Y-%m-%d %H:%M"),
        output.display()
    );
    Ok(())
}

pub fn run_sample(args: &SampleArgs) -> Result<()> {
    let file = File::create(&args.output)
        .with_context(|| format!("create {}", args.output.display()))?;
    write_sample_csv(BufWriter::new(file)).context("write sample")?;
    println!("Sample template written to {}", args.output.display());
    Ok(())
}

pub fn run_choices(session: &Session) -> Result<()> {
    let leads = session.leads()?;
    print_choice_sets(&session.choices(&leads).option_sets());
    Ok(())
}
