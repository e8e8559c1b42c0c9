pub mod check;
pub mod cut;
pub mod probe;
