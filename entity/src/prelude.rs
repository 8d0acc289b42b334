pub use super::participant::Entity as Participant;
