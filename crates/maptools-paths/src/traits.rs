use maptools_core::Position;

/// Passability oracle: whether movement may end on a position.
///
/// Must answer the same way for the same position throughout a solve. The
/// solver may ask about a position many times, so implementations should be
/// cheap or cache internally.
pub trait AllowsMovement {
    /// Whether `p` can be entered.
    fn is_allowed(&self, p: Position) -> bool;
}

impl<F: Fn(Position) -> bool> AllowsMovement for F {
    #[inline]
    fn is_allowed(&self, p: Position) -> bool {
        self(p)
    }
}

/// Passability oracle whose lookups can fail.
///
/// A failed lookup aborts the solve and is handed back to the caller as is.
pub trait TryAllowsMovement {
    type Error;

    /// Whether `p` can be entered, or the reason the question could not be
    /// answered.
    fn try_is_allowed(&self, p: Position) -> Result<bool, Self::Error>;
}

/// Oracle that allows every position (an open, wall-less map).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl AllowsMovement for AllowAll {
    #[inline]
    fn is_allowed(&self, _p: Position) -> bool {
        true
    }
}

/// Adapts an infallible oracle to the fallible interface.
pub(crate) struct Infallibly<'a, A: ?Sized>(pub(crate) &'a A);

impl<A: AllowsMovement + ?Sized> TryAllowsMovement for Infallibly<'_, A> {
    type Error = std::convert::Infallible;

    #[inline]
    fn try_is_allowed(&self, p: Position) -> Result<bool, Self::Error> {
        Ok(self.0.is_allowed(p))
    }
}
