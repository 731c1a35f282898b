// Compiler test modules
#[cfg(test)]
mod compiler_tests;
