mod highlight_job;

pub use highlight_job::highlight_job;
