pub mod fixtures;

#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod cache_tests;
