//! Concrete monads and the modules over them
//!
//! Each monad here comes with at least one module. Where the monad's impure
//! computations form a module of their own, the monad is [`Idealised`] with
//! that module as its ideal:
//!
//! | Monad | Ideal |
//! |---|---|
//! | [`OptionK`] | [`UnitK`] |
//! | [`ResultK<E>`] | [`ConstK<E>`] |
//! | [`NonEmptyK`] | [`AtLeast2K`] |
//! | [`WriterK<W>`] | [`WriterIdealK<W>`] |
//!
//! The identity and free monads are idealised in `resumption_core`.
//! [`WriterK<W>`] is also a module over [`ReaderK<W>`] and [`StateK<W>`].
//!
//! [`Idealised`]: resumption_core::Idealised

pub mod monoid;
pub mod non_empty;
pub mod option;
pub mod reader;
pub mod result;
pub mod state;
pub mod writer;

pub use monoid::{IdealMonoid, Monoid, Semigroup, Sum};
pub use non_empty::{AtLeast2, AtLeast2K, NonEmpty, NonEmptyK};
pub use option::{OptionK, Unit, UnitK};
pub use reader::{Reader, ReaderK};
pub use result::{Const, ConstK, ResultK};
pub use state::{State, StateK};
pub use writer::{Writer, WriterIdeal, WriterIdealK, WriterK};
