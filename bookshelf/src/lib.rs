//! Bookshelf 服务端
//!
//! 作者与书籍的增删查接口。领域与应用层分别位于 `bookshelf-domain`、
//! `bookshelf-application`，本 crate 负责聚合建模、内存持久化、依赖装配与 HTTP 接口。
//!
pub mod author;
pub mod book;
pub mod config;
pub mod container;
pub mod http;
pub mod persistence;
pub mod telemetry;
