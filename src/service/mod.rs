//! Business logic layer.

pub mod raffle;

#[cfg(test)]
mod test;
