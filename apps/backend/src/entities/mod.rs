pub mod customers;
pub mod sequences;

pub use customers::Entity as Customers;
pub use customers::Model as CustomerRow;
pub use sequences::Entity as Sequences;
pub use sequences::Model as SequenceRow;
