pub mod customers;
pub mod sequences;

pub use customers::{CustomerStore, CUSTOMER_SEQUENCE};
pub use sequences::{SequenceGenerator, OFFSET};
