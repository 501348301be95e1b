pub mod result;
pub mod str;

pub mod prelude {
    pub use crate::{assert_contains, assert_err, assert_not_contains, assert_ok};
}
