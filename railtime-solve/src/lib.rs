//! Numerical solvers for railtime.
//!
//! - [`quadrature`]: adaptive Gauss–Kronrod integration that always reports an
//!   error estimate alongside the integral.
//! - [`polynomial`]: real roots of quadratic and cubic polynomials.

pub mod polynomial;
pub mod quadrature;
