pub mod backendbound;
pub mod position;
pub mod proxybound;
pub mod region;
