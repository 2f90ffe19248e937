//! End-to-end compilation of change trees

pub mod columns;
pub mod gating;
pub mod ordering;
pub mod scenarios;
pub mod udts;
