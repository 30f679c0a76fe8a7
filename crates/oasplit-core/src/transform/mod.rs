pub mod method_builder;
pub mod name_normalizer;
pub mod schema_closure;
pub mod subset_builder;
