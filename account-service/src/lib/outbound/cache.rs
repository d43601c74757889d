pub mod redis;

pub use redis::RedisProfileCache;
