//! Request and response bodies

pub mod insurance;
