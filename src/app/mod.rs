pub mod cart_session;
pub mod views;
