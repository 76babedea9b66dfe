pub mod cart;
pub mod catalogue;
pub mod detail;

pub use crate::domain::model::{Cart, CartLine, Product, Rating};
pub use crate::domain::ports::{ConfigProvider, ProductSource};
pub use crate::utils::error::Result;
