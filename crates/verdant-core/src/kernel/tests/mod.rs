#[cfg(test)]
mod error_tests;
