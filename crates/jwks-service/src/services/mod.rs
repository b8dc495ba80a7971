pub mod key_acquisition;
pub mod key_store;
