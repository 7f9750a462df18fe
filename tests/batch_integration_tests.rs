//! Integration tests for batch generation and the full workbook run
//!
//! These tests verify:
//! - Counter continuation within and across runs
//! - Sanitizing and lower-casing of source output
//! - Guard order (template check before empty-batch check, no counter writes)
//! - The written workbook layout

use bulkgen::models::DEFAULT_MAIL_DOMAINS;
use bulkgen::services::{
    BatchError, BatchGenerator, CounterStore, EmailSource, FileCounterStore, MemoryCounterStore,
    PersonNameSource, RandomPersonSource, is_valid_nic,
};
use bulkgen::{CliError, GeneratorConfig, StudentRecord, generate_bulk_workbook};
use camino::{Utf8Path, Utf8PathBuf};
use mockall::mock;
use tempfile::TempDir;

mock! {
    pub Source {}

    impl PersonNameSource for Source {
        fn first_name(&mut self) -> String;
        fn last_name(&mut self) -> String;
    }

    impl EmailSource for Source {
        fn email(&mut self, first_name: &str, last_name: &str, providers: &[String]) -> String;
    }
}

fn default_domains() -> Vec<String> {
    DEFAULT_MAIL_DOMAINS.iter().map(|d| d.to_string()).collect()
}

fn seeded_generator() -> BatchGenerator<RandomPersonSource> {
    BatchGenerator::new(RandomPersonSource::with_seed(2024), default_domains()).unwrap()
}

fn write_template(dir: &Utf8Path) -> Utf8PathBuf {
    let mut book = umya_spreadsheet::new_file();
    {
        let sheet = book.get_sheet_mut(&0).unwrap();
        for (col, header) in (1u32..).zip(StudentRecord::HEADERS) {
            sheet.get_cell_mut((col, 1)).set_value_string(header);
        }
        sheet.get_cell_mut((1, 2)).set_value_string("EXAMPLE-ROW");
        sheet.get_cell_mut((1, 3)).set_value_string("ANOTHER-EXAMPLE");
    }
    book.new_sheet("Instructions").unwrap();
    book.get_sheet_mut(&1)
        .unwrap()
        .get_cell_mut((1, 1))
        .set_value_string("Fill one student per row");

    let path = dir.join("template.xlsx");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

fn temp_dir_utf8() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, path)
}

#[test]
fn test_end_to_end_ids_and_finals() {
    let batch = seeded_generator().generate(true, 3, 10, 5).unwrap();

    let ids: Vec<_> = batch.records.iter().map(|r| r.student_id.clone()).collect();
    assert_eq!(ids, ["STUDENT-ID00011", "STUDENT-ID00012", "STUDENT-ID00013"]);
    assert_eq!((batch.final_student_id, batch.final_nic_index), (13, 8));

    let nics: Vec<_> = batch.records.iter().map(|r| r.nic.clone()).collect();
    assert_eq!(nics, ["200600700006", "980080007V", "200800900008"]);
}

#[test]
fn test_records_are_well_formed() {
    let batch = seeded_generator().generate(true, 200, 0, 0).unwrap();

    for record in &batch.records {
        assert!(is_valid_nic(&record.nic));
        assert!(record.first_name.len() >= 3 && record.first_name.len() <= 50);
        assert!(record.last_name.len() >= 3 && record.last_name.len() <= 50);
        assert_eq!(record.email, record.email.to_lowercase());

        let domain = record.email.rsplit('@').next().unwrap();
        assert!(DEFAULT_MAIL_DOMAINS.contains(&domain), "unexpected domain {domain}");
    }

    let mut ids: Vec<_> = batch.records.iter().map(|r| &r.student_id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_source_output_is_sanitized_and_lowercased() {
    let mut source = MockSource::new();
    source
        .expect_first_name()
        .times(2)
        .returning(|| "J0!".to_string());
    source
        .expect_last_name()
        .times(2)
        .returning(|| "O'Neil-Smith".to_string());
    source
        .expect_email()
        .times(2)
        .withf(|first, last, providers| {
            first.to_string() == "Json" && last.to_string() == "ONeilSmith" && providers.len() == 3
        })
        .returning(|first, last, providers| {
            format!("{}.{}@{}", first, last, providers[1]).to_uppercase()
        });

    let mut generator = BatchGenerator::new(source, default_domains()).unwrap();
    let batch = generator.generate(true, 2, 0, 0).unwrap();

    assert_eq!(batch.records[0].first_name, "Json");
    assert_eq!(batch.records[0].last_name, "ONeilSmith");
    assert_eq!(batch.records[1].email, "json.oneilsmith@maildrop.cc");
}

#[test]
fn test_guards_run_before_sources() {
    let mut source = MockSource::new();
    source.expect_first_name().never();
    source.expect_last_name().never();
    source.expect_email().never();

    let mut generator = BatchGenerator::new(source, default_domains()).unwrap();

    assert_eq!(
        generator.generate(false, 0, 0, 0),
        Err(BatchError::TemplateNotFound)
    );
    assert_eq!(generator.generate(true, 0, 0, 0), Err(BatchError::EmptyBatch));
}

#[test]
fn test_runs_continue_across_invocations() {
    let (_temp_dir, dir) = temp_dir_utf8();
    let ids = FileCounterStore::new(dir.join("output").join("last_student_id.txt"));
    let nics = FileCounterStore::new(dir.join("output").join("last_nic_index.txt"));

    let first = seeded_generator().run(true, 4, &ids, &nics).unwrap();
    let second = seeded_generator().run(true, 2, &ids, &nics).unwrap();

    assert_eq!(first.records.last().unwrap().student_id, "STUDENT-ID00004");
    assert_eq!(second.records[0].student_id, "STUDENT-ID00005");
    assert_eq!((ids.load(), nics.load()), (6, 6));
}

#[test]
fn test_failed_run_keeps_counters() {
    let ids = MemoryCounterStore::new(41);
    let nics = MemoryCounterStore::new(7);

    let err = seeded_generator().run(true, 0, &ids, &nics).unwrap_err();

    assert_eq!(err.downcast_ref::<BatchError>(), Some(&BatchError::EmptyBatch));
    assert_eq!((ids.load(), nics.load()), (41, 7));
    assert_eq!(ids.save_count() + nics.save_count(), 0);
}

#[test]
fn test_generate_bulk_workbook_writes_first_sheet() {
    let (_temp_dir, dir) = temp_dir_utf8();
    let template = write_template(&dir);
    let config = GeneratorConfig {
        row_count: 3,
        output_dir: dir.join("output"),
        seed: Some(5),
        ..GeneratorConfig::default()
    };

    let output = generate_bulk_workbook(&template, &config).unwrap();

    assert!(output.starts_with(&config.output_dir));
    assert!(output.file_name().unwrap().starts_with("bulk_upload_"));

    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    let sheet = book.get_sheet(&0).unwrap();
    for (col, header) in (1u32..).zip(StudentRecord::HEADERS) {
        assert_eq!(sheet.get_value((col, 1)), header);
    }
    assert_eq!(sheet.get_value((1, 2)), "STUDENT-ID00001");
    assert_eq!(sheet.get_value((1, 4)), "STUDENT-ID00003");
    assert_eq!(sheet.get_value((5, 3)), "200200300002");
    assert_eq!(sheet.get_highest_row(), 4);

    let instructions = book.get_sheet(&1).unwrap();
    assert_eq!(instructions.get_value((1, 1)), "Fill one student per row");

    assert_eq!(
        FileCounterStore::new(config.student_id_tracker_path()).load(),
        3
    );
    assert_eq!(FileCounterStore::new(config.nic_index_tracker_path()).load(), 3);
}

#[test]
fn test_generate_bulk_workbook_missing_template() {
    let (_temp_dir, dir) = temp_dir_utf8();
    let config = GeneratorConfig {
        output_dir: dir.join("output"),
        ..GeneratorConfig::default()
    };
    let template = dir.join("missing.xlsx");

    let err = generate_bulk_workbook(&template, &config).unwrap_err();

    assert_eq!(
        err.downcast_ref::<CliError>(),
        Some(&CliError::TemplateNotFound(template))
    );
    assert!(!config.student_id_tracker_path().exists());
}

#[test]
fn test_unreadable_template_keeps_counters() {
    let (_temp_dir, dir) = temp_dir_utf8();
    let template = dir.join("template.xlsx");
    std::fs::write(&template, "not a workbook").unwrap();
    let config = GeneratorConfig {
        row_count: 500,
        output_dir: dir.join("output"),
        ..GeneratorConfig::default()
    };

    let result = generate_bulk_workbook(&template, &config);

    assert!(result.is_err());
    assert_eq!(FileCounterStore::new(config.student_id_tracker_path()).load(), 0);
    assert_eq!(FileCounterStore::new(config.nic_index_tracker_path()).load(), 0);
    assert!(!config.student_id_tracker_path().exists());
}

#[test]
fn test_max_tracker_value_is_rejected() {
    let (_temp_dir, dir) = temp_dir_utf8();
    let template = write_template(&dir);
    let config = GeneratorConfig {
        row_count: 1,
        output_dir: dir.join("output"),
        ..GeneratorConfig::default()
    };
    let ids = FileCounterStore::new(config.student_id_tracker_path());
    ids.save(u64::MAX).unwrap();

    let err = generate_bulk_workbook(&template, &config).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BatchError>(),
        Some(BatchError::CounterOverflow { .. })
    ));
    assert_eq!(ids.load(), u64::MAX);
    assert!(!config.nic_index_tracker_path().exists());
}
