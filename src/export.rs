//! Export adapters. Both writers fully materialize the artifact or fail;
//! there is no partial/append contract.

use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::git;
use crate::models::Commit;

pub const CSV_HEADER: [&str; 6] = [
    "commit_hash",
    "author_name",
    "author_email",
    "commit_date",
    "commit_message",
    "file_path",
];

const WORKBOOK_HEADER: [&str; 6] = [
    "Commit Hash",
    "Author Name",
    "Author Email",
    "Commit Date",
    "Commit Message",
    "Files Changed",
];

const WORKBOOK_COLUMN_WIDTHS: [f64; 6] = [15.0, 20.0, 25.0, 18.0, 40.0, 35.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Workbook,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "excel" | "workbook" => Some(Self::Workbook),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Workbook => "xlsx",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write workbook export: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// What a successful export produced, for the completion toast.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub count: usize,
    pub path: PathBuf,
}

/// `<repo>/<name>_commits.<ext>`.
pub fn default_destination(repo: &Path, format: ExportFormat) -> PathBuf {
    repo.join(format!(
        "{}_commits.{}",
        git::repository_name(repo),
        format.extension()
    ))
}

/// Write the commit list next to the repository in the requested format.
pub fn export(
    commits: &[Commit],
    repo: &Path,
    format: ExportFormat,
) -> Result<ExportOutcome, ExportError> {
    let destination = default_destination(repo, format);
    match format {
        ExportFormat::Csv => write_csv(commits, &destination)?,
        ExportFormat::Workbook => write_workbook(commits, repo, &destination)?,
    }
    Ok(ExportOutcome {
        count: commits.len(),
        path: destination,
    })
}

/// Flat delimited export: one row per changed file per commit, and a single
/// row with an empty `file_path` for commits that touched nothing.
pub fn write_csv(commits: &[Commit], destination: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(destination)?;
    writer.write_record(CSV_HEADER)?;

    for commit in commits {
        if commit.files.is_empty() {
            writer.write_record(commit_record(commit, ""))?;
        } else {
            for file in &commit.files {
                writer.write_record(commit_record(commit, file))?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn commit_record<'a>(commit: &'a Commit, file: &'a str) -> [&'a str; 6] {
    [
        &commit.hash,
        &commit.author,
        &commit.email,
        &commit.date,
        &commit.subject,
        file,
    ]
}

/// Styled workbook export: a "Commits" sheet with one row per commit and the
/// file list joined by newlines, plus a "Summary" sheet describing the
/// repository.
pub fn write_workbook(
    commits: &[Commit],
    repo: &Path,
    destination: &Path,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let data_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Top)
        .set_text_wrap();

    let sheet = workbook.add_worksheet().set_name("Commits")?;
    for (col, title) in WORKBOOK_HEADER.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *title, &header_format)?;
    }
    for (col, width) in WORKBOOK_COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    for (i, commit) in commits.iter().enumerate() {
        let row = (i + 1) as u32;
        let files = if commit.files.is_empty() {
            "No files changed".to_string()
        } else {
            commit.files.join("\n")
        };

        sheet.write_with_format(row, 0, &commit.hash, &data_format)?;
        sheet.write_with_format(row, 1, &commit.author, &data_format)?;
        sheet.write_with_format(row, 2, &commit.email, &data_format)?;
        sheet.write_with_format(row, 3, &commit.date, &data_format)?;
        sheet.write_with_format(row, 4, &commit.subject, &data_format)?;
        sheet.write_with_format(row, 5, files, &data_format)?;
    }

    let title_format = Format::new().set_bold().set_font_size(14);
    let label_format = Format::new().set_bold();

    let summary = workbook.add_worksheet().set_name("Summary")?;
    summary.write_with_format(0, 0, "Repository Summary", &title_format)?;
    summary.write_with_format(1, 0, "Repository Name:", &label_format)?;
    summary.write(1, 1, git::repository_name(repo))?;
    summary.write_with_format(2, 0, "Total Commits:", &label_format)?;
    summary.write(2, 1, commits.len() as u32)?;
    summary.write_with_format(3, 0, "Repository Path:", &label_format)?;
    summary.write(3, 1, repo.display().to_string())?;
    summary.write_with_format(4, 0, "Exported At:", &label_format)?;
    summary.write(4, 1, Local::now().format("%Y-%m-%d %H:%M:%S").to_string())?;
    summary.set_column_width(0, 20.0)?;
    summary.set_column_width(1, 40.0)?;

    workbook.save(destination)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_commits() -> Vec<Commit> {
        vec![
            Commit {
                hash: "aaa111".into(),
                author: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                date: "Tue Jul 1 10:00:00 2025".into(),
                subject: "add engine".into(),
                files: vec!["src/engine.rs".into(), "src/lib.rs".into()],
            },
            Commit {
                hash: "bbb222".into(),
                author: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                date: "Wed Jul 2 11:30:00 2025".into(),
                subject: "tag release".into(),
                files: Vec::new(),
            },
        ]
    }

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(ExportFormat::from_name("CSV"), Some(ExportFormat::Csv));
        assert_eq!(
            ExportFormat::from_name("xlsx"),
            Some(ExportFormat::Workbook)
        );
        assert_eq!(
            ExportFormat::from_name("Excel"),
            Some(ExportFormat::Workbook)
        );
        assert_eq!(ExportFormat::from_name("pdf"), None);
    }

    #[test]
    fn default_destination_uses_the_repository_name() {
        let dest = default_destination(Path::new("/tmp/missing/acme"), ExportFormat::Csv);
        assert_eq!(
            dest,
            Path::new("/tmp/missing/acme/acme_commits.csv").to_path_buf()
        );
    }

    #[test]
    fn csv_writes_one_row_per_file_and_a_blank_row_for_empty_commits() {
        let dir = assert_fs::TempDir::new().unwrap();
        let dest = dir.path().join("out.csv");

        write_csv(&sample_commits(), &dest).unwrap();

        let mut reader = csv::Reader::from_path(&dest).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            CSV_HEADER.to_vec()
        );

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "aaa111");
        assert_eq!(rows[0][5], "src/engine.rs");
        assert_eq!(rows[1][5], "src/lib.rs");
        assert_eq!(rows[2][0], "bbb222");
        assert_eq!(rows[2][5], "");
    }

    #[test]
    fn workbook_export_materializes_the_artifact() {
        let dir = assert_fs::TempDir::new().unwrap();
        let dest = dir.path().join("out.xlsx");

        write_workbook(&sample_commits(), dir.path(), &dest).unwrap();

        let written = std::fs::metadata(&dest).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn export_reports_the_commit_count_and_path() {
        let dir = assert_fs::TempDir::new().unwrap();

        let outcome = export(&sample_commits(), dir.path(), ExportFormat::Csv).unwrap();

        assert_eq!(outcome.count, 2);
        assert!(outcome.path.ends_with(format!(
            "{}_commits.csv",
            git::repository_name(dir.path())
        )));
    }
}
