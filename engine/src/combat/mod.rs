pub mod mastery;
pub mod rate;
pub mod weapons;
