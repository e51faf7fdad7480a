pub mod calendar;
pub mod duration;
pub mod reconcile;
pub mod summary;
