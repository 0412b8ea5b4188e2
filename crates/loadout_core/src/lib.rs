pub mod allocator;
pub mod capture;
pub mod classifier;
pub mod codec;
pub mod core_api;
pub mod host;
pub mod item;
pub mod preset;
pub mod storage;
