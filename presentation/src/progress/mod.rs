//! Progress reporting for retrievals

pub mod reporter;
