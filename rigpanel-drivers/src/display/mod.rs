//! Character display drivers

pub mod acm1602;
pub mod charset;

pub use acm1602::{Acm1602, Frame, ACM1602_ADDR};
