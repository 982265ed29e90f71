pub mod packet;
pub mod primitive;
pub mod response;
