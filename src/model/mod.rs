pub mod dispatch;
pub mod record;

pub use dispatch::{accessor_name, Getter, Model, Setter};
pub use record::{AccessorTable, Record};
