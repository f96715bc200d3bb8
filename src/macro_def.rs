//! defines macro
//!
//! # getter!
//! getter that return a reference
//! ## Examples
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter!(b, usize);
//! }
//! ```
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter!(const, b, usize);
//! }
//! ```
//! # getter_copy!
//! create a getter that copy the value.
//! ## Examples
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter_copy!(b, usize);
//! }
//! ```
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter_copy!(const, b, usize);
//! }
//! ```

macro_rules! getter {
    (const, $(#[$meta:meta])* $i:ident, $t:ty) => {
        $(#[$meta])*
        #[must_use]
        #[inline]
        pub const fn $i(&self) -> &$t {
            &self.$i
        }
    };
    ($(#[$meta:meta])* $i:ident, $t:ty) => {
        $(#[$meta])*
        #[must_use]
        #[inline]
        pub fn $i(&self) -> &$t {
            &self.$i
        }
    }
}

macro_rules! getter_copy {
    (const, $(#[$meta:meta])* $i:ident, $t:ty) => {
        $(#[$meta])*
        #[must_use]
        #[inline]
        pub const fn $i(&self) -> $t {
            self.$i
        }
    };
    ($(#[$meta:meta])* $i:ident, $t:ty) => {
        $(#[$meta])*
        #[must_use]
        #[inline]
        pub fn $i(&self) -> $t {
            self.$i
        }
    }
}
