//! Internal logging shims.
//!
//! These forward to the `log` crate when the `log` feature is enabled and expand to nothing
//! otherwise, so the rest of the crate can log unconditionally.

macro_rules! trace {
    ($($tokens:tt)*) => {
        #[cfg(feature = "log")]
        {
            ::log::trace!($($tokens)*)
        }
    }
}

macro_rules! debug {
    ($($tokens:tt)*) => {
        #[cfg(feature = "log")]
        {
            ::log::debug!($($tokens)*)
        }
    }
}

pub(crate) use {debug, trace};
