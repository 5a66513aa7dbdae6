#[macro_use]
extern crate approx;

mod common;
mod contour;
mod degeneracy;
mod refinement;
mod round_trip;
