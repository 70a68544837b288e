pub mod audit;
pub mod decode;
pub mod encode;
