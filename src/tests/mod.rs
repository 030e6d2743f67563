pub mod common;

mod materialize;
mod scan;
