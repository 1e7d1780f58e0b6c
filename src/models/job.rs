//! Job (production order) model.
//!
//! A job is one discrete production order: a quantity of pieces of one
//! material, cut from one raw material with one tool, due on a given date.
//! The sequencer treats jobs as read-only and addresses them by their dense
//! position in the input slice (`0..N`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A job to be sequenced.
///
/// # Time Representation
/// Processing times are in minutes per piece; due dates are calendar dates
/// evaluated in working days against a reference "today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Number of pieces to produce.
    pub quantity: f64,
    /// Material / tooling family.
    pub material: String,
    /// Raw material the job is cut from.
    pub raw_material: String,
    /// Tool identifier.
    pub tool_id: String,
    /// Processing time per piece (minutes).
    pub time_minutes_per_piece: f64,
    /// Sales price of the whole order.
    pub price: f64,
    /// Date the order is due.
    pub due_date: NaiveDate,
}

impl Job {
    /// Creates a job with the given ID and due date.
    ///
    /// Quantity defaults to 1 piece, everything else to zero/empty.
    pub fn new(id: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            quantity: 1.0,
            material: String::new(),
            raw_material: String::new(),
            tool_id: String::new(),
            time_minutes_per_piece: 0.0,
            price: 0.0,
            due_date,
        }
    }

    /// Sets the quantity (pieces).
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the material / tooling family.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Sets the raw material.
    pub fn with_raw_material(mut self, raw_material: impl Into<String>) -> Self {
        self.raw_material = raw_material.into();
        self
    }

    /// Sets the tool identifier.
    pub fn with_tool(mut self, tool_id: impl Into<String>) -> Self {
        self.tool_id = tool_id.into();
        self
    }

    /// Sets the processing time per piece (minutes).
    pub fn with_time_per_piece(mut self, minutes: f64) -> Self {
        self.time_minutes_per_piece = minutes;
        self
    }

    /// Sets the order price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Total processing duration of the job (minutes).
    #[inline]
    pub fn total_minutes(&self) -> f64 {
        self.quantity * self.time_minutes_per_piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_job_builder() {
        let job = Job::new("J1", date(2024, 3, 15))
            .with_quantity(40.0)
            .with_material("AL-6061")
            .with_raw_material("bar-20")
            .with_tool("T7")
            .with_time_per_piece(1.5)
            .with_price(1200.0);

        assert_eq!(job.id, "J1");
        assert_eq!(job.material, "AL-6061");
        assert_eq!(job.raw_material, "bar-20");
        assert_eq!(job.tool_id, "T7");
        assert!((job.price - 1200.0).abs() < 1e-10);
        assert_eq!(job.due_date, date(2024, 3, 15));
    }

    #[test]
    fn test_job_total_minutes() {
        let job = Job::new("J1", date(2024, 3, 15))
            .with_quantity(40.0)
            .with_time_per_piece(1.5);
        assert!((job.total_minutes() - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_job_default_duration_is_zero() {
        let job = Job::new("J1", date(2024, 3, 15));
        assert_eq!(job.total_minutes(), 0.0);
    }

    #[test]
    fn test_job_serde_due_date() {
        let job = Job::new("J9", date(2024, 12, 2)).with_price(10.0);
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains("\"due_date\":\"2024-12-02\""));
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }
}
