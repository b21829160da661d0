//! Integration tests: the full router driven through `oneshot`, backed
//! by the in-memory stores and the mock LCP client.

mod helpers;

mod lending_test;
mod listing_test;
mod status_test;
