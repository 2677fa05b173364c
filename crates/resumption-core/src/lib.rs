// Resumption Core Library
//
// Higher-kinded encodings of functors, monads and right modules, and the
// resumption monad generated by a module over a monad.

// Brands, functors, monads, modules and natural transformations
pub mod kind;

// Binary sums used by splits and steps
pub mod either;

// Identity monad and its empty ideal
pub mod identity;

// Free structures over a functor, the free monad and its ideal
pub mod free;

// Generalised resumptions M (Free R A)
pub mod resumption;

// Moggi and RRR resumptions over F ∘ M
pub mod moggi;

// Tracing subscriber setup
pub mod logging;

pub use either::Either;
pub use free::{Free, FreeK, Suspended, Wrap, WrapK};
pub use identity::{Identity, IdentityK, Void, VoidK};
pub use kind::{
    join, ComposeK, DebugK, EmbedIdeal, EqK, Functor, Idealised, IdentityTransformation, Kind, Monad,
    NaturalTransformation, RModule, ShowKind, ShowWith, TailRec,
};
pub use moggi::{retract_rrr, MoggiResumption, RRRResumption, Step, FM, FMK};
pub use resumption::{Resumption, ResumptionK};
