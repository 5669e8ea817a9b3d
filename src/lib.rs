pub mod array_object;
pub mod collection;
pub mod compare;
pub mod deserialization;
pub mod error;
pub mod model;
pub mod ordered_map;
pub mod serialization;
pub mod types;
pub mod value;

pub use array_object::ArrayObject;
pub use collection::Collection;
pub use compare::natural_cmp;
pub use error::ObjectError;
pub use model::{AccessorTable, Getter, Model, Record, Setter};
pub use ordered_map::OrderedMap;
pub use types::{AccessMode, ArrayIter, ArrayObjectOptions, FieldMap, IterationStrategy};
pub use value::{Key, Number, Value};
