//! `debug!` expands to `log::debug!` when the `log` feature is enabled,
//! and to nothing otherwise, so call sites never need their own
//! `#[cfg(feature = "log")]` guard.

#[cfg(feature = "log")]
macro_rules! debug {
    ($($token:tt)*) => (::log::debug!($($token)*);)
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($token:tt)*) => {};
}
