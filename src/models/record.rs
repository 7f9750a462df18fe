use indexmap::IndexMap;

/// One synthetic enrollment row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub nic: String,
}

impl StudentRecord {
    /// Column headers expected by the bulk-upload template, in sheet order.
    pub const HEADERS: [&'static str; 5] = [
        "Student ID*",
        "First Name*",
        "Last Name*",
        "Email*",
        "National Identification Number*",
    ];

    /// Record as an ordered header -> value map
    pub fn to_row(&self) -> IndexMap<&'static str, String> {
        let values = [
            &self.student_id,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.nic,
        ];

        Self::HEADERS
            .iter()
            .zip(values)
            .map(|(header, value)| (*header, value.clone()))
            .collect()
    }
}
