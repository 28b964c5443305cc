pub mod ledger;
pub mod money;
pub mod participant;
pub mod record;
