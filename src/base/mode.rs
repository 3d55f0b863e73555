use super::MicroError;

/// Selects, at compile time, whether an operation also computes its Jacobians
///
/// Every operation is written once as `op::<M: Mode>(..)`. The values are
/// computed on a single path; the Jacobians go through [Mode::compute],
/// [Mode::then] and [Mode::zip] and are thus skipped entirely with [Values].
pub trait Mode {
    /// Holds derivative data (or nothing)
    type Slot<T>;

    /// Evaluates the derivative closure (or does nothing)
    fn compute<T, F>(f: F) -> Result<Self::Slot<T>, MicroError>
    where
        F: FnOnce() -> Result<T, MicroError>;

    /// Transforms the derivative data of a callee (or does nothing)
    fn then<T, U, F>(slot: Self::Slot<T>, f: F) -> Result<Self::Slot<U>, MicroError>
    where
        F: FnOnce(T) -> Result<U, MicroError>;

    /// Combines two slots into one
    fn zip<T, U>(a: Self::Slot<T>, b: Self::Slot<U>) -> Self::Slot<(T, U)>;
}

/// Computes values only
#[derive(Clone, Copy, Debug)]
pub struct Values;

/// Computes values and consistent tangents
#[derive(Clone, Copy, Debug)]
pub struct Tangents;

impl Mode for Values {
    type Slot<T> = ();

    #[inline]
    fn compute<T, F>(_f: F) -> Result<(), MicroError>
    where
        F: FnOnce() -> Result<T, MicroError>,
    {
        Ok(())
    }

    #[inline]
    fn then<T, U, F>(_slot: (), _f: F) -> Result<(), MicroError>
    where
        F: FnOnce(T) -> Result<U, MicroError>,
    {
        Ok(())
    }

    #[inline]
    fn zip<T, U>(_a: (), _b: ()) {}
}

impl Mode for Tangents {
    type Slot<T> = T;

    #[inline]
    fn compute<T, F>(f: F) -> Result<T, MicroError>
    where
        F: FnOnce() -> Result<T, MicroError>,
    {
        f()
    }

    #[inline]
    fn then<T, U, F>(slot: T, f: F) -> Result<U, MicroError>
    where
        F: FnOnce(T) -> Result<U, MicroError>,
    {
        f(slot)
    }

    #[inline]
    fn zip<T, U>(a: T, b: U) -> (T, U) {
        (a, b)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
