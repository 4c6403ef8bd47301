//! Basic data types used by the Polycell circuit diagnosis engine.

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! var {
    ($x:expr) => {
        $crate::var::Var::from_index($x)
    };
}

/// Shortcut for tests
///
/// `G` and `U` are the health values, anything else is an integer signal level.
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! value {
    (G) => {
        $crate::value::Value::GOOD
    };
    (U) => {
        $crate::value::Value::UNRELIABLE
    };
    ($x:expr) => {
        $crate::value::Value::Int($x)
    };
}

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! clause {
    ( $( $var:expr => $val:tt ),* $(,)? ) => {
        $crate::clause::Clause::from_lits(&[
            $( $crate::clause::Lit::new($crate::var!($var), $crate::value!($val)) ),*
        ])
    };
}

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! assignment {
    ( $( $var:expr => $val:tt ),* $(,)? ) => {
        <$crate::assignment::Assignment as std::iter::FromIterator<_>>::from_iter(
            vec![ $( ($crate::var!($var), $crate::value!($val)) ),* ]
        )
    };
}

pub mod assignment;
pub mod clause;
pub mod value;
pub mod var;

pub use assignment::Assignment;
pub use clause::{Clause, Lit};
pub use value::{Domain, DomainError, Health, Value};
pub use var::{Var, VarKind, Variable, Variables};
