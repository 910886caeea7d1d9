pub mod me;
pub mod session_detail;
pub mod sessions_list;
