pub mod enums;
pub mod field;
pub mod form;
pub mod test_type;

pub use enums::*;
pub use field::*;
pub use form::*;
pub use test_type::*;
