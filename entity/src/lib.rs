pub mod participant;
pub mod prelude;
