pub mod comparison;
pub mod record;
pub mod sort;
pub mod tree;
