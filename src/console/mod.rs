pub mod command;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod files;
pub mod history;
pub mod host_info;
pub mod output;
pub mod panels;
pub mod settings;
