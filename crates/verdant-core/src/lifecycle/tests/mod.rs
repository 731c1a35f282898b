// Lifecycle test modules
#[cfg(test)]
mod dispatcher_tests;
