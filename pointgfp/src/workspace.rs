//! Scratch registers for the point arithmetic formulas.

use core::fmt;
use curvegfp::{CurveGFp, FieldElement};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of field element registers in a [`Workspace`].
pub const WORKSPACE_SIZE: usize = 7;

/// Caller-provided scratch storage for [`Point`][crate::Point] addition and
/// doubling.
///
/// A workspace holds no meaningful state between calls: every formula writes a
/// register before reading it. It may be reused across operations, points and
/// even curves, but must not be shared between concurrent computations.
/// Registers are wiped on drop since they hold intermediate values of
/// secret-dependent computations.
pub struct Workspace<const LIMBS: usize> {
    regs: [FieldElement<LIMBS>; WORKSPACE_SIZE],
}

impl<const LIMBS: usize> Workspace<LIMBS> {
    /// Allocate a workspace for points on `curve`.
    pub fn new(curve: &CurveGFp<LIMBS>) -> Self {
        Self {
            regs: [curve.field().zero(); WORKSPACE_SIZE],
        }
    }

    pub(crate) fn registers(&mut self) -> &mut [FieldElement<LIMBS>; WORKSPACE_SIZE] {
        &mut self.regs
    }
}

impl<const LIMBS: usize> fmt::Debug for Workspace<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace").finish_non_exhaustive()
    }
}

impl<const LIMBS: usize> Zeroize for Workspace<LIMBS> {
    fn zeroize(&mut self) {
        self.regs.iter_mut().for_each(Zeroize::zeroize);
    }
}

impl<const LIMBS: usize> Drop for Workspace<LIMBS> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const LIMBS: usize> ZeroizeOnDrop for Workspace<LIMBS> {}
