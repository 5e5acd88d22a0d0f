//! Lab event entity model
//!
//! A lab event carries both the raw result string (`value`) and the parsed
//! numeric result (`value_num`). The two are independently nullable: a
//! non-numeric result such as "TRACE" has a raw value but no numeric one.
//! The lab report's missingness metric is defined on the raw field.

/// One laboratory measurement for a subject
#[derive(Debug, Clone, PartialEq)]
pub struct LabEvent {
    /// Subject the measurement belongs to
    pub subject_id: i64,
    /// Lab item measured, keyed into the lab item dimension
    pub item_id: i64,
    /// Raw result as recorded; empty strings are normalized to `None`
    pub value: Option<String>,
    /// Numeric result, absent for non-numeric raw values
    pub value_num: Option<f64>,
}

impl LabEvent {
    /// Create a new lab event
    #[must_use]
    pub fn new(
        subject_id: i64,
        item_id: i64,
        value: Option<String>,
        value_num: Option<f64>,
    ) -> Self {
        Self {
            subject_id,
            item_id,
            value,
            value_num,
        }
    }
}
