use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Number of records generated per run when no configuration overrides it.
pub const DEFAULT_ROW_COUNT: usize = 500;

/// Temporary mail providers that accept mail for any address.
pub const DEFAULT_MAIL_DOMAINS: [&str; 3] = ["guerrillamail.com", "maildrop.cc", "mailinator.com"];

/// Generator configuration from bulkgen.yaml
///
/// Every field has a default, so a partial (or missing) file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(rename = "Row Count", default = "default_row_count")]
    pub row_count: usize,

    #[serde(rename = "Output Dir", default = "default_output_dir")]
    pub output_dir: Utf8PathBuf,

    #[serde(rename = "Student ID Tracker", default = "default_student_id_tracker")]
    pub student_id_tracker: String,

    #[serde(rename = "NIC Index Tracker", default = "default_nic_index_tracker")]
    pub nic_index_tracker: String,

    #[serde(rename = "Mail Domains", default = "default_mail_domains")]
    pub mail_domains: Vec<String>,

    #[serde(rename = "Output Prefix", default = "default_output_prefix")]
    pub output_prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Seed", default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            row_count: default_row_count(),
            output_dir: default_output_dir(),
            student_id_tracker: default_student_id_tracker(),
            nic_index_tracker: default_nic_index_tracker(),
            mail_domains: default_mail_domains(),
            output_prefix: default_output_prefix(),
            debug_mode: false,
            seed: None,
        }
    }
}

fn default_row_count() -> usize {
    DEFAULT_ROW_COUNT
}

fn default_output_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("output")
}

fn default_student_id_tracker() -> String {
    "last_student_id.txt".to_string()
}

fn default_nic_index_tracker() -> String {
    "last_nic_index.txt".to_string()
}

fn default_mail_domains() -> Vec<String> {
    DEFAULT_MAIL_DOMAINS.iter().map(|d| d.to_string()).collect()
}

fn default_output_prefix() -> String {
    "bulk_upload".to_string()
}

impl GeneratorConfig {
    /// Tracker file holding the last issued student id
    pub fn student_id_tracker_path(&self) -> Utf8PathBuf {
        self.output_dir.join(&self.student_id_tracker)
    }

    /// Tracker file holding the last used NIC index
    pub fn nic_index_tracker_path(&self) -> Utf8PathBuf {
        self.output_dir.join(&self.nic_index_tracker)
    }

    pub fn log_dir(&self) -> Utf8PathBuf {
        self.output_dir.join("logs")
    }

    /// Reject settings the generator cannot work with.
    ///
    /// A zero row count is left for the batch generator to refuse.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.mail_domains.iter().all(|d| d.trim().is_empty()) {
            anyhow::bail!("Mail Domains must list at least one provider");
        }
        if self.student_id_tracker == self.nic_index_tracker {
            anyhow::bail!(
                "Student ID and NIC index trackers must use distinct files (both are {})",
                self.student_id_tracker
            );
        }
        Ok(())
    }
}
