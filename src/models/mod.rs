//! Sequencing domain models.
//!
//! Provides the data types shared by the cost builders, the ACO search
//! and the machine assignment step.
//!
//! # Domain Mappings
//!
//! | u-sequence | Shop floor | Search |
//! |------------|-----------|--------|
//! | Job | Production order | Tour node |
//! | Matrix | Changeover / preference table | Edge weights |
//! | WorkCalendar | Plant working days | Due-date slack |
//! | Schedule | Machine timeline | Decoded tour |

mod calendar;
mod job;
mod matrix;
mod schedule;

pub use calendar::WorkCalendar;
pub use job::Job;
pub use matrix::Matrix;
pub use schedule::{Assignment, Schedule};
