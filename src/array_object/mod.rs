pub mod object;
mod property_op;
mod serial_op;
mod sort_op;

pub use object::ArrayObject;

#[cfg(test)]
mod tests;
