pub mod chart;
pub mod export;
pub mod ideal;
pub mod import;
pub mod init;
pub mod member;
pub mod rate;
pub mod rubric;
pub mod session;
pub mod show;
pub mod snapshot;
pub mod stats;
pub mod sync;
pub mod timeline;
