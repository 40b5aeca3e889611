pub mod factory;
pub mod google;
