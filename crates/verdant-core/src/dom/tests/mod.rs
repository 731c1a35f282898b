// DOM test modules
#[cfg(test)]
mod document_tests;
