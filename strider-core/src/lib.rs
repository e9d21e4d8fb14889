#![doc = include_str!("doc.md")]

pub mod algorithm;
pub mod model;
pub mod planner;

pub mod util;

// mock collaborators shared by unit and scenario tests. hosts embedding the
// engine never construct these; they implement the model::scene traits.
pub mod testing;
