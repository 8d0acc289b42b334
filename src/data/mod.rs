//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models to the
//! service layer. All database queries, inserts and updates are performed through
//! these repositories.

pub mod participant;

#[cfg(test)]
mod test;
