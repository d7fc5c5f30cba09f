pub mod filter;
pub mod resolver;

pub use filter::QueryBuilder;
pub use resolver::{RelationResolver, Resolution};
