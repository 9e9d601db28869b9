//! Flush-to-zero scope for kernel calls.
//!
//! Decaying feedback tails drift into subnormal range, which is slow on x86.
//! With the `no-denormals` feature the guard sets FTZ/DAZ for its lifetime
//! and restores the previous MXCSR on drop. Without it the guard is a no-op
//! and results stay bit-identical to plain IEEE arithmetic.

#[cfg(all(feature = "no-denormals", target_arch = "x86_64"))]
const DAZ_FTZ: u32 = 0x8040;

#[cfg(feature = "no-denormals")]
pub struct NoDenormalsGuard {
    #[cfg(target_arch = "x86_64")]
    prev: u32,
}

#[cfg(feature = "no-denormals")]
impl NoDenormalsGuard {
    #[cfg(target_arch = "x86_64")]
    #[inline]
    #[allow(deprecated)]
    pub fn new() -> Self {
        use core::arch::x86_64::{_mm_getcsr, _mm_setcsr};
        // SAFETY: only the FTZ/DAZ bits change; drop restores the previous value.
        let prev = unsafe { _mm_getcsr() };
        unsafe { _mm_setcsr(prev | DAZ_FTZ) };
        Self { prev }
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[inline]
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(feature = "no-denormals")]
impl Drop for NoDenormalsGuard {
    fn drop(&mut self) {
        #[cfg(target_arch = "x86_64")]
        #[allow(deprecated)]
        unsafe {
            core::arch::x86_64::_mm_setcsr(self.prev);
        }
    }
}

#[cfg(not(feature = "no-denormals"))]
#[derive(Clone, Copy, Debug)]
pub struct NoDenormalsGuard;

#[cfg(not(feature = "no-denormals"))]
impl NoDenormalsGuard {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(all(test, feature = "no-denormals", target_arch = "x86_64"))]
mod tests {
    use super::*;

    #[test]
    #[allow(deprecated)]
    fn guard_restores_control_register() {
        use core::arch::x86_64::_mm_getcsr;
        let before = unsafe { _mm_getcsr() };
        {
            let _guard = NoDenormalsGuard::new();
            assert_eq!(unsafe { _mm_getcsr() } & DAZ_FTZ, DAZ_FTZ);
        }
        assert_eq!(unsafe { _mm_getcsr() }, before);
    }
}
