pub mod commission;
pub mod production;
