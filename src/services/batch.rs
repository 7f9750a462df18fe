use crate::models::StudentRecord;
use crate::services::counter::CounterStore;
use crate::services::identifiers::{generate_nic, generate_student_id, sanitize_name};
use crate::services::people::{EmailSource, PersonNameSource};
use anyhow::Result;
use thiserror::Error;

/// Errors that stop a batch before any counter moves
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BatchError {
    #[error("Template file not found")]
    TemplateNotFound,

    #[error("Batch is empty: row count must be at least 1")]
    EmptyBatch,

    #[error("No mail domains configured")]
    NoMailDomains,

    #[error("Counter overflow: {start} + {row_count} rows exceeds u64")]
    CounterOverflow { start: u64, row_count: usize },
}

/// Records produced by one run plus the counter values they advanced to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub records: Vec<StudentRecord>,
    pub final_student_id: u64,
    pub final_nic_index: u64,
}

impl Batch {
    /// Column headers, taken from the first record.
    pub fn headers(&self) -> Result<Vec<&'static str>, BatchError> {
        let first = self.records.first().ok_or(BatchError::EmptyBatch)?;
        Ok(first.to_row().keys().copied().collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Produces batches of synthetic student records.
///
/// Each record takes the next student id and the next NIC index; both sequences start
/// one past the values passed in, so feeding the returned finals into the next call
/// continues the sequence without gaps or repeats.
pub struct BatchGenerator<S> {
    source: S,
    mail_domains: Vec<String>,
}

impl<S: PersonNameSource + EmailSource> BatchGenerator<S> {
    /// Create a generator drawing names and emails from `source`.
    ///
    /// Blank domains are dropped; at least one must remain.
    pub fn new(source: S, mail_domains: Vec<String>) -> Result<Self, BatchError> {
        let mail_domains: Vec<String> = mail_domains
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        if mail_domains.is_empty() {
            return Err(BatchError::NoMailDomains);
        }

        Ok(Self {
            source,
            mail_domains,
        })
    }

    pub fn mail_domains(&self) -> &[String] {
        &self.mail_domains
    }

    /// Generate `row_count` records continuing from `id_start` and `nic_start`.
    ///
    /// # Errors
    /// - [`BatchError::TemplateNotFound`] when `template_exists` is false
    /// - [`BatchError::EmptyBatch`] when `row_count` is 0
    /// - [`BatchError::CounterOverflow`] when either counter would pass `u64::MAX`
    pub fn generate(
        &mut self,
        template_exists: bool,
        row_count: usize,
        id_start: u64,
        nic_start: u64,
    ) -> Result<Batch, BatchError> {
        if !template_exists {
            return Err(BatchError::TemplateNotFound);
        }
        if row_count == 0 {
            return Err(BatchError::EmptyBatch);
        }
        for start in [id_start, nic_start] {
            let fits = u64::try_from(row_count)
                .ok()
                .and_then(|rows| start.checked_add(rows))
                .is_some();
            if !fits {
                return Err(BatchError::CounterOverflow { start, row_count });
            }
        }

        let mut current_id = id_start;
        let mut current_nic_index = nic_start;
        let mut records = Vec::with_capacity(row_count);

        for _ in 0..row_count {
            current_id += 1;
            current_nic_index += 1;

            let first_name = sanitize_name(&self.source.first_name());
            let last_name = sanitize_name(&self.source.last_name());
            let email = self
                .source
                .email(&first_name, &last_name, &self.mail_domains)
                .to_lowercase();

            records.push(StudentRecord {
                student_id: generate_student_id(current_id),
                first_name,
                last_name,
                email,
                nic: generate_nic(current_nic_index),
            });
        }

        tracing::debug!(
            "Generated {} records: student ids {}..={}, NIC indices {}..={}",
            records.len(),
            id_start + 1,
            current_id,
            nic_start + 1,
            current_nic_index
        );

        Ok(Batch {
            records,
            final_student_id: current_id,
            final_nic_index: current_nic_index,
        })
    }

    /// Load both counters, generate a batch and persist the advanced counters.
    ///
    /// Counters are written only after the whole batch exists, so a failed
    /// generation leaves both tracker files untouched.
    pub fn run(
        &mut self,
        template_exists: bool,
        row_count: usize,
        student_ids: &dyn CounterStore,
        nic_indices: &dyn CounterStore,
    ) -> Result<Batch> {
        self.run_with(template_exists, row_count, student_ids, nic_indices, |_| Ok(()))
    }

    /// Like [`run`](Self::run), but hands the batch to `commit` before saving.
    ///
    /// Counters are saved only if `commit` succeeds, so output that could not be
    /// written does not use up ids.
    pub fn run_with<F>(
        &mut self,
        template_exists: bool,
        row_count: usize,
        student_ids: &dyn CounterStore,
        nic_indices: &dyn CounterStore,
        commit: F,
    ) -> Result<Batch>
    where
        F: FnOnce(&Batch) -> Result<()>,
    {
        let id_start = student_ids.load();
        let nic_start = nic_indices.load();

        tracing::info!(
            "Continuing from student id {} and NIC index {}",
            id_start,
            nic_start
        );

        let batch = self.generate(template_exists, row_count, id_start, nic_start)?;

        commit(&batch)?;

        student_ids.save(batch.final_student_id)?;
        nic_indices.save(batch.final_nic_index)?;

        tracing::info!(
            "Saved counters: student id {}, NIC index {}",
            batch.final_student_id,
            batch.final_nic_index
        );

        Ok(batch)
    }
}
