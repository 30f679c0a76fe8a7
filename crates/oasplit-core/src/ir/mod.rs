pub mod descriptor;
pub mod grouping;

pub use descriptor::*;
pub use grouping::{TagGroup, partition_by_tag};
