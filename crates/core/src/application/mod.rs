// Application Layer - Use Cases

pub mod jobs;

// Re-exports
pub use jobs::JobService;
