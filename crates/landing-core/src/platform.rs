//! Thread-safety bounds that relax on `wasm32`.
//!
//! Browser handles (`web-sys` elements, JS closures) are `!Send`, while the
//! native hosts move scopes and transports across tokio tasks. Seams bound on
//! `MaybeSendSync` so one trait definition serves both.

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> MaybeSendSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSendSync for T {}
