// Crate-level pipeline tests and shared helpers
#[cfg(test)]
pub(crate) mod common;
#[cfg(test)]
mod pipeline_tests;
