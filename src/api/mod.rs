pub mod attendance;
pub mod balance;
pub mod duration;
pub mod leave_request;
