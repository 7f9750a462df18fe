//! Services module - the generation pipeline.
//!
//! # Components
//!
//! - [`counter`]: Tracker-file counters ([`FileCounterStore`]) and an in-memory stand-in
//!   ([`MemoryCounterStore`]) behind the [`CounterStore`] trait
//! - [`identifiers`]: Pure formatting of student ids and NICs, plus name sanitizing
//! - [`people`]: Name and email sources ([`PersonNameSource`], [`EmailSource`]) with a
//!   seedable random implementation
//! - [`batch`]: [`BatchGenerator`], which advances both counters once per record
//! - [`workbook`]: Reading the template workbook and writing the generated sheet
//!
//! # Run order
//!
//! 1. Read the template workbook
//! 2. Load the student id and NIC index counters
//! 3. Generate the batch in memory
//! 4. Write the workbook to a timestamped file in the output directory
//! 5. Save both advanced counters, only once the workbook is on disk
//!
//! ```ignore
//! use bulkgen::services::{BatchGenerator, FileCounterStore, RandomPersonSource};
//!
//! let mut generator = BatchGenerator::new(RandomPersonSource::with_seed(1), domains)?;
//! let batch = generator.run(
//!     true,
//!     500,
//!     &FileCounterStore::new("output/last_student_id.txt"),
//!     &FileCounterStore::new("output/last_nic_index.txt"),
//! )?;
//! ```

pub mod batch;
pub mod counter;
pub mod identifiers;
pub mod people;
pub mod workbook;

pub use batch::{Batch, BatchError, BatchGenerator};
pub use counter::{CounterStore, FileCounterStore, MemoryCounterStore, load_counter, save_counter};
pub use identifiers::{
    NicFormat, generate_nic, generate_student_id, is_valid_nic, nic_format_for, sanitize_name,
};
pub use people::{EmailSource, PersonNameSource, RandomPersonSource};
pub use workbook::{WorkbookError, output_path, read_template, write_batch, write_workbook};
