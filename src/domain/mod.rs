// ==========================================
// Banking Data Loader - domain layer
// ==========================================

pub mod entities;
pub mod product;

pub use entities::{Account, BankTransaction, Customer, Interaction};
pub use product::{Product, ProductDetails, ProductType};
