pub mod grab;
pub mod locomotion;
pub mod session;
